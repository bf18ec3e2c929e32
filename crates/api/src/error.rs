//! JSON error responses.
//!
//! Every failure renders as `{ "error": CODE, "message": text }`. Domain errors
//! keep their own codes; storage failures are logged server-side and reported
//! with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tesouraria_core::installment::InstallmentError;
use tesouraria_core::payment::PaymentError;
use tesouraria_core::receivable::StoreError;
use tesouraria_core::reconciliation::ImportError;
use tesouraria_shared::AppError;

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status and code.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 `VALIDATION_ERROR`.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn domain(status: u16, code: &'static str, message: String) -> Self {
        Self::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message,
        )
    }

    fn internal(detail: &str) -> Self {
        tracing::error!(error = %detail, "Request failed");
        AppError::Database(detail.to_string()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::domain(err.status_code(), err.error_code(), err.public_message())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Persistence(detail) => Self::internal(&detail),
            other => Self::domain(other.http_status_code(), other.error_code(), other.to_string()),
        }
    }
}

impl From<InstallmentError> for ApiError {
    fn from(err: InstallmentError) -> Self {
        match err {
            InstallmentError::Persistence(source) => Self::internal(&source.to_string()),
            other => Self::domain(other.http_status_code(), other.error_code(), other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Receivable {id}")).into(),
            other => Self::internal(&other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tesouraria_shared::types::ReceivableId;

    #[test]
    fn test_exceeds_balance_is_unprocessable() {
        let err = ApiError::from(PaymentError::ExceedsBalance {
            amount: dec!(0.01),
            remaining: dec!(0),
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "EXCEEDS_BALANCE");
    }

    #[test]
    fn test_missing_receivable_is_not_found() {
        let err = ApiError::from(PaymentError::NotFound(ReceivableId::new()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "RECEIVABLE_NOT_FOUND");
    }

    #[test]
    fn test_persistence_detail_is_hidden() {
        let err = ApiError::from(PaymentError::Persistence("connection reset by peer".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.message(), "An internal error occurred");
    }

    #[test]
    fn test_store_backend_error_is_hidden() {
        let err = ApiError::from(StoreError::Backend("pool timed out".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("pool"));
    }

    #[rstest]
    #[case(ImportError::EmptyFile, "EMPTY_FILE")]
    #[case(ImportError::UndetectableLayout, "UNDETECTABLE_LAYOUT")]
    fn test_import_errors_are_bad_request(#[case] source: ImportError, #[case] code: &str) {
        let err = ApiError::from(source);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[case(InstallmentError::EmptySchedule, StatusCode::BAD_REQUEST)]
    #[case(InstallmentError::MissingDescription, StatusCode::BAD_REQUEST)]
    #[case(
        InstallmentError::Persistence(StoreError::Backend("deadlock detected".into())),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_installment_error_status(#[case] source: InstallmentError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(source).status(), status);
    }

    #[test]
    fn test_validation_helper() {
        let err = ApiError::validation("bad layout");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.message(), "Validation error: bad layout");
    }
}
