use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidEmail => {
                tracing::warn!(error = ?self, "Request rejected");
                error_resp(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidEmail,
                    "Valid email is required",
                )
            }
            AppError::AlreadyRegistered => {
                tracing::warn!(error = ?self, "Request rejected");
                error_resp(
                    StatusCode::CONFLICT,
                    ErrorCode::AlreadyRegistered,
                    "Email already registered",
                )
            }
            // Storage details stay in the logs.
            AppError::Storage(_) => {
                tracing::error!(error = ?self, "Request failed");
                error_resp(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageError,
                    "Internal server error",
                )
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message, "code": code.as_str() });
    (status, Json(body)).into_response()
}
