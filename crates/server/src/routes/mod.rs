use actix_web::web;

use crate::error::{json_error_handler, query_error_handler, ApiError};

pub mod index;
pub mod search;
pub mod system;

/// Register all routes and extractor configuration
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(system::root)
        .service(system::stats)
        .service(system::health)
        .service(search::search)
        .service(index::index);
}

/// Fallback for unknown paths
pub async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound("Not Found".to_string()))
}
