//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::payments::PaymentsError;
use crate::repository::RepositoryError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation errors**: malformed or inconsistent request data → 400
/// - **Not-found errors**: unknown business or payments account → 404
/// - **External-service errors**: store or payments API failure → 500,
///   details logged but sanitized before reaching the client
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request with the concrete message.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Referenced business does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Business not found")]
    BusinessNotFound,

    /// Repository operation failed.
    #[error(transparent)]
    Storage(#[from] RepositoryError),

    /// Payments provider call failed, classified by category.
    #[error(transparent)]
    Payments(#[from] PaymentsError),
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// { "error": "Human-readable error message" }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `BusinessNotFound`, unknown payments account → 404 Not Found
/// - Payments validation failures → 400 Bad Request
/// - Store failures, payments authentication/transient failures → 500
///   Internal Server Error (details hidden from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BusinessNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Storage(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "Business not found".to_string())
            }
            AppError::Storage(ref err) => {
                tracing::error!("repository failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Payments(PaymentsError::InvalidRequest(ref msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Payments(PaymentsError::AccountNotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Payment account not found".to_string(),
            ),
            AppError::Payments(ref err) => {
                tracing::error!(transient = err.is_transient(), "payments failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Payment provider is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn validation_errors_are_400() {
        assert_eq!(
            status_of(AppError::InvalidRequest("missing email".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Payments(PaymentsError::InvalidRequest(
                "bad account".into()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_errors_are_404() {
        assert_eq!(status_of(AppError::BusinessNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::Storage(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Payments(PaymentsError::AccountNotFound(
                "acct_nope".into()
            ))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn external_failures_are_500() {
        assert_eq!(
            status_of(AppError::Payments(PaymentsError::Unavailable(
                "timeout".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Payments(PaymentsError::Authentication(
                "bad key".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
