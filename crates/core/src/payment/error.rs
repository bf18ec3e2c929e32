//! Payment error types.

use rust_decimal::Decimal;
use tesouraria_shared::types::ReceivableId;
use thiserror::Error;

use crate::receivable::StoreError;

/// Errors that can occur while applying a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment amount must be greater than zero.
    #[error("Payment amount must be greater than zero")]
    NonPositiveAmount,

    /// Payment amount has fractions of a cent.
    #[error("Payment amount must have at most two decimal places")]
    SubCentAmount,

    /// Payment is larger than the outstanding balance.
    #[error("Payment of {amount} exceeds the remaining balance of {remaining}")]
    ExceedsBalance {
        /// Requested amount.
        amount: Decimal,
        /// Outstanding balance.
        remaining: Decimal,
    },

    /// Receivable does not accept payments in its current status.
    #[error("Receivable {0} is not open for payments")]
    NotOpen(ReceivableId),

    /// Receivable does not exist for the tenant.
    #[error("Receivable not found: {0}")]
    NotFound(ReceivableId),

    /// Bank event does not move money (registration, rejection, zero value).
    #[error("Bank event is not a settlement")]
    NotASettlement,

    /// Bank event was already applied.
    #[error("Bank event was already processed")]
    AlreadyProcessed,

    /// Storage failed; nothing was written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::SubCentAmount => "SUB_CENT_AMOUNT",
            Self::ExceedsBalance { .. } => "EXCEEDS_BALANCE",
            Self::NotOpen(_) => "RECEIVABLE_NOT_OPEN",
            Self::NotFound(_) => "RECEIVABLE_NOT_FOUND",
            Self::NotASettlement => "NOT_A_SETTLEMENT",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed input
            Self::NonPositiveAmount | Self::SubCentAmount => 400,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::AlreadyProcessed => 409,

            // 422 Unprocessable Entity - business rules
            Self::ExceedsBalance { .. } | Self::NotOpen(_) | Self::NotASettlement => 422,

            // 500 Internal Server Error
            Self::Persistence(_) => 500,
        }
    }
}

impl From<StoreError> for PaymentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::DuplicateEvent(_) => Self::AlreadyProcessed,
            StoreError::Backend(msg) => Self::Persistence(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(PaymentError::NonPositiveAmount.error_code(), "NON_POSITIVE_AMOUNT");
        assert_eq!(
            PaymentError::ExceedsBalance {
                amount: dec!(1),
                remaining: dec!(0)
            }
            .error_code(),
            "EXCEEDS_BALANCE"
        );
        assert_eq!(PaymentError::AlreadyProcessed.error_code(), "ALREADY_PROCESSED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(PaymentError::NonPositiveAmount.http_status_code(), 400);
        assert_eq!(PaymentError::NotFound(ReceivableId::new()).http_status_code(), 404);
        assert_eq!(
            PaymentError::ExceedsBalance {
                amount: dec!(0.01),
                remaining: dec!(0)
            }
            .http_status_code(),
            422
        );
        assert_eq!(PaymentError::Persistence("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_store_error_mapping() {
        let id = ReceivableId::new();
        assert!(matches!(
            PaymentError::from(StoreError::NotFound(id)),
            PaymentError::NotFound(found) if found == id
        ));
        assert!(matches!(
            PaymentError::from(StoreError::DuplicateEvent("abc".into())),
            PaymentError::AlreadyProcessed
        ));
        assert!(matches!(
            PaymentError::from(StoreError::Backend("down".into())),
            PaymentError::Persistence(_)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = PaymentError::ExceedsBalance {
            amount: dec!(0.01),
            remaining: dec!(0.00),
        };
        assert_eq!(
            err.to_string(),
            "Payment of 0.01 exceeds the remaining balance of 0.00"
        );
    }
}
