//! API route definitions
//!
//! This module defines all routes and the OpenAPI document.

use actix_web::web;
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

use crate::api::handlers;

/// Configure the capture and viewer routes
pub fn config_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/log_additional", web::post().to(handlers::log_additional))
        .route("/logs", web::get().to(handlers::view_logs));
}

/// Configure the API documentation route
pub fn config_doc_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").route("/openapi.json", web::get().to(handlers::openapi_json)),
    );
}

pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi() -> OpenApi {
        OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title("Redirect-Log API")
                    .version("1.0.0")
                    .description(Some("Single-endpoint redirector that logs visitor metadata"))
                    .build(),
            )
            .build()
    }
}
