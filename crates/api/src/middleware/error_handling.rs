//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error
//! responses, so every endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pitchbook_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps a `BookingError` and implements `IntoResponse`, turning it
/// into a status code and a `{"error": message}` body.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use pitchbook_api::middleware::error_handling::AppError;
/// use pitchbook_core::errors::BookingError;
///
/// async fn handler(date: Option<String>) -> Result<Json<String>, AppError> {
///     let date = date.ok_or_else(|| {
///         AppError(BookingError::Validation("Date parameter is required".to_string()))
///     })?;
///     Ok(Json(date))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Store calls return `eyre::Report`; those surface as store errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Store(err))
    }
}

/// Maps a BookingError straight to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
