mod api;
mod cli;
mod dao;
mod error;
mod model;
mod service;

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber;

use api::models::AppConfig;
use cli::Args;
use dao::CsvLog;
use service::{GeoService, VisitStore};

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    info!("Redirect logger starting");
    info!(
        "Config: port={}, target={}, log_file={}, geo={}, geo_timeout={}ms, visit_ttl={}s, visit_capacity={}",
        args.port, args.target_url, args.log_file, !args.no_geo, args.geo_timeout,
        args.visit_ttl, args.visit_capacity
    );

    let log = CsvLog::new(&args.log_file)?;
    info!("Log file ready: {}", args.log_file);

    let store = VisitStore::new(Duration::from_secs(args.visit_ttl), args.visit_capacity);
    let geo = if args.no_geo {
        info!("Geolocation lookup disabled");
        None
    } else {
        Some(GeoService::new(Duration::from_millis(args.geo_timeout))?)
    };
    let config = AppConfig {
        target_url: args.target_url.clone(),
    };

    let store = web::Data::new(store);
    let log = web::Data::new(log);
    let geo = web::Data::new(geo);
    let config = web::Data::new(config);

    info!("Listening on 0.0.0.0:{}", args.port);
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(log.clone())
            .app_data(geo.clone())
            .app_data(config.clone())
            .configure(api::init_routes)
    })
    .bind(("0.0.0.0", args.port))?
    .run()
    .await?;

    Ok(())
}
