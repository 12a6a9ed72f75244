//! API error type mapped to HTTP status codes.
//!
//! Every variant renders as `{"detail": "message"}`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use jurisai_common::JurisError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request (400)
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown resource (404)
    #[error("{0}")]
    NotFound(String),

    /// Embedding backend or store unreachable (503)
    #[error("{0}")]
    BackendUnavailable(String),

    /// Anything else (500)
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

impl From<JurisError> for ApiError {
    fn from(err: JurisError) -> Self {
        let detail = err.to_string();
        match err.status_code() {
            400 => ApiError::InvalidInput(detail),
            404 => ApiError::NotFound(detail),
            503 => ApiError::BackendUnavailable(detail),
            _ => ApiError::Internal(detail),
        }
    }
}

/// Body extractor failures keep the `{detail}` shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidInput(err.to_string()).into()
}

/// Query extractor failures keep the `{detail}` shape
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidInput(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(matches!(
            ApiError::from(JurisError::invalid_input("bad metadata")),
            ApiError::InvalidInput(_)
        ));
        assert!(matches!(
            ApiError::from(JurisError::network("connection refused")),
            ApiError::BackendUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(JurisError::vector_store("duplicate id")),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(JurisError::not_found("doc_9")),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_detail_carries_underlying_message() {
        let err = ApiError::from(JurisError::embedding("model crashed"));
        assert_eq!(err.to_string(), "Embedding error: model crashed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
