use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use trailhead_booking::CheckoutError;
use trailhead_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    UnprocessableError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TourNotFound(id) => AppError::NotFoundError(format!("Tour not found: {}", id)),
            // Bad pricing rows are a data problem, not the caller's
            CoreError::InvalidPricing(_) | CoreError::Provider(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        AppError::UnprocessableError(err.to_string())
    }
}
