use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// Client-facing errors. Every variant renders as `{"message": "..."}`;
/// internal detail only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no quotes available")]
    Empty,
    #[error("quote not found")]
    NotFound,
    #[error("invalid request format")]
    BadRequest,
    #[error("API is in read-only mode")]
    ReadOnly,
    #[error("failed to reload quotes")]
    ReloadFailed,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Empty | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::ReadOnly => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::ReloadFailed | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if !e.is_miss() {
            error!(error = %e, "unexpected service error");
            return ApiError::Internal;
        }
        match e {
            ServiceError::EmptyCollection => ApiError::Empty,
            _ => ApiError::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::BadRequest
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(Message::new(self.to_string()))).into_response()
    }
}
