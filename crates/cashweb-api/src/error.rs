//! Error types for cashweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cashweb_core::{CoreError, ErrorCode, ErrorDetails, ErrorSeverity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(ErrorDetails),

    #[error("Service unavailable: {0}")]
    Unavailable(ErrorDetails),

    #[error("Internal server error: {0}")]
    InternalError(ErrorDetails),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            ApiError::BadRequest(details) | ApiError::Unavailable(details) | ApiError::InternalError(details) => details,
        }
    }
}

/// Log a core error at the level its severity calls for
pub fn log_core_error(context: &str, error: &CoreError) {
    match error.severity() {
        ErrorSeverity::Error => log::error!("{}: {}", context, error),
        ErrorSeverity::Warning => log::warn!("{}: {}", context, error),
        ErrorSeverity::Info => log::debug!("{}: {}", context, error),
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        log_core_error("Request failed", &error);
        let details = error.to_details();
        match error.code() {
            ErrorCode::InvalidParameter => ApiError::BadRequest(details),
            ErrorCode::NotLoaded => ApiError::Unavailable(details),
            ErrorCode::StoreError | ErrorCode::InvalidRecord => ApiError::InternalError(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match self {
            ApiError::BadRequest(details) | ApiError::Unavailable(details) | ApiError::InternalError(details) => details,
        };
        (status, Json(details)).into_response()
    }
}
