//! Error types for triviabox-server
//!
//! Every error class maps to the same JSON envelope:
//! `{"success": false, "error": <status>, "message": <string>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or empty required input (400)
    #[error("bad request")]
    BadRequest,

    /// Entity or filtered result set absent (404)
    #[error("results not found")]
    NotFound,

    /// Delete target absent (422)
    #[error("un-processable")]
    Unprocessable,

    /// Storage failure (500, logged; no detail leaked)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization failure (500, logged)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure opening the database (500, logged)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "results not found"),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "un-processable"),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            ApiError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            ApiError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bad_request_is_400() {
        let response = ApiError::BadRequest.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unprocessable_is_422() {
        let response = ApiError::Unprocessable.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn envelope_shape() {
        let response = ApiError::Unprocessable.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], 422);
        assert_eq!(value["message"], "un-processable");
    }
}
