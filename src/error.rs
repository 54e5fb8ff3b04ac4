//! Error taxonomy for the HTTP surface.
//!
//! Handlers return `Result<_, AppError>`; status codes and JSON bodies are
//! chosen only in the `IntoResponse` impl below.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("File not found")]
    FileNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("File too large. Maximum size is {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Internal(String),

    #[error("Internal server error")]
    Unhandled,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EndpointNotFound | AppError::FileNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) | AppError::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts a JSON body rejection. Oversized bodies always become 413,
    /// everything else goes through `otherwise`.
    pub fn from_json_rejection(
        rejection: JsonRejection,
        limit_label: &str,
        otherwise: impl FnOnce(JsonRejection) -> AppError,
    ) -> AppError {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(limit_label.to_string());
        }
        otherwise(rejection)
    }

    fn log(&self) {
        match self {
            AppError::Internal(_) | AppError::Unhandled => {
                tracing::error!(error = %self, status = %self.status_code(), "request failed");
            }
            AppError::PayloadTooLarge(_) => {
                tracing::warn!(error = %self, status = %self.status_code(), "request rejected");
            }
            _ => {
                tracing::debug!(error = %self, status = %self.status_code(), "request rejected");
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let success = match self {
            // Upload lookups answer with a bare `{error}` body.
            AppError::FileNotFound => None,
            _ => Some(false),
        };
        let body = ErrorResponse {
            success,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unhandled_hides_details() {
        let (status, body) = render(AppError::Unhandled).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn file_not_found_has_no_success_flag() {
        let (status, body) = render(AppError::FileNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "File not found"}));
    }

    #[tokio::test]
    async fn payload_too_large_names_the_limit() {
        let (status, body) = render(AppError::PayloadTooLarge("16MB".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "File too large. Maximum size is 16MB");
    }

    #[tokio::test]
    async fn internal_surfaces_message() {
        let (status, body) = render(AppError::Internal("Invalid padding".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid padding");
    }
}
