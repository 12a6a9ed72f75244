use actix_web::{post, web, HttpResponse};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::SearchRequest;

#[post("/search")]
pub async fn search(
    req: web::Json<SearchRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let documents = state
        .service
        .search(&req.query, req.max_results, req.filters.as_ref())
        .await
        .map_err(|e| {
            tracing::error!("Search failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(documents))
}
