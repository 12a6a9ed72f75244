use actix_web::{post, web, HttpResponse};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{IndexQuery, IndexResponse};

/// Index one document passed as query parameters
#[post("/index")]
pub async fn index(
    query: web::Query<IndexQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    debug!("Index request: {} chars", query.content.len());

    let id = state
        .service
        .index(&query.content, &query.metadata)
        .await
        .map_err(|e| {
            error!("Indexing failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(IndexResponse {
        status: "indexed".to_string(),
        id,
    }))
}
