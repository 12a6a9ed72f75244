//! JurisAI HTTP Server
//!
//! Actix-web REST API for semantic indexing and search

pub mod error;
pub mod ids;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod types;

use actix_cors::Cors;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use jurisai_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::ApiError;
pub use service::SearchService;
pub use state::AppState;

/// CORS policy from configuration
pub fn build_cors(config: &AppConfig) -> Cors {
    if config.cors_allows_any() {
        return Cors::permissive();
    }

    config.cors_allowed_origins.iter().fold(
        Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        |cors, origin| cors.allowed_origin(origin),
    )
}

/// Build state, start the metrics exporter and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    if config.metrics_port != 0 {
        telemetry::init_metrics(&config.server_host, config.metrics_port)?;
    }

    let state = web::Data::new(Arc::new(AppState::new(config.clone()).await?));
    let bind_addr = config.server_bind_address();

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(telemetry::track_requests))
            .wrap(TracingLogger::default())
            .wrap(build_cors(&config))
            .app_data(state.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
