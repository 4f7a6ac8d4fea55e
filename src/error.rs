//! Request error taxonomy
//!
//! Three failure classes cross the API boundary: bad input rejected before
//! storage is touched, a missing record, and a storage failure surfaced
//! as-is (single attempt, no retry).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage(ref e) = self {
            tracing::error!("storage error: {}", e);
        }

        let body = Json(json!({
            "success": false,
            "data": null,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
