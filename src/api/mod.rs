//! HTTP surface of the redirect logger
//!
//! Three endpoints: the redirect page, the second-phase metadata sink,
//! and the log viewer.

mod handlers;
pub mod models;
mod routes;

use actix_web::web;

/// Initialize all routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(routes::config_page_routes)
        .configure(routes::config_doc_routes);
}
