use actix_web::{get, web, HttpResponse};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{HealthResponse, RootResponse, StatsResponse};

/// Service banner
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "JurisAI API v2.0".to_string(),
        status: "operational".to_string(),
    })
}

#[get("/stats")]
pub async fn stats(
    state: web::Data<std::sync::Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let (count, model) = state.service.stats().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_documents: count,
        model,
        status: "healthy".to_string(),
    }))
}

/// Static status; does not check the embedder or the store
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ml_models: "loaded".to_string(),
        db: "connected".to_string(),
    })
}
