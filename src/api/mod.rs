pub mod analytics;
pub mod auth;
pub mod awards;
pub mod prd;
pub mod server;
pub mod users;

use serde::Serialize;

/// Standard response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            timestamp: chrono::Utc::now().to_rfc3339(),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            message: Some(message.to_string()),
        }
    }
}
