use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::layout::LayoutError;
use crate::session::SessionError;
use crate::store::ScheduleError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(Vec<String>),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Unprocessable(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": "validation failed",
                    "issues": issues,
                })),
            )
                .into_response(),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::Validation(issues) => {
                ApiError::Unprocessable(issues.iter().map(ToString::to_string).collect())
            }
            ScheduleError::NotFound(_) => ApiError::NotFound(value.to_string()),
        }
    }
}

impl From<LayoutError> for ApiError {
    fn from(value: LayoutError) -> Self {
        error!("Layout error: {value}");
        ApiError::Internal("Failed to compute schedule layout".into())
    }
}

impl From<SessionError> for ApiError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::LimitReached(_) => ApiError::Unavailable(value.to_string()),
        }
    }
}
