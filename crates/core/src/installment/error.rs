//! Installment error types.

use thiserror::Error;

use crate::receivable::StoreError;

/// Errors that can occur while planning or creating installments.
#[derive(Debug, Error)]
pub enum InstallmentError {
    /// Total must be greater than zero.
    #[error("Total amount must be greater than zero")]
    InvalidTotal,

    /// Total has fractions of a cent.
    #[error("Total amount must have at most two decimal places")]
    SubCentTotal,

    /// Installment count out of range.
    #[error("Installment count must be between 1 and {max}, got {count}")]
    InvalidCount {
        /// Requested count.
        count: u32,
        /// Maximum allowed.
        max: u32,
    },

    /// Interest rate cannot be negative.
    #[error("Interest rate cannot be negative")]
    NegativeRate,

    /// The rate is too large to compute the plan.
    #[error("Interest rate is too large")]
    RateOverflow,

    /// A due date falls outside the calendar range.
    #[error("Due date out of range")]
    DateOverflow,

    /// Schedule has no items.
    #[error("Schedule must have at least one installment")]
    EmptySchedule,

    /// Schedule item below one cent.
    #[error("Installment {number} must be at least 0.01")]
    InvalidScheduledAmount {
        /// 1-based position.
        number: usize,
    },

    /// Description is blank.
    #[error("Description is required")]
    MissingDescription,

    /// Storage failed; no installment was created.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl InstallmentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTotal => "INVALID_TOTAL",
            Self::SubCentTotal => "SUB_CENT_TOTAL",
            Self::InvalidCount { .. } => "INVALID_INSTALLMENT_COUNT",
            Self::NegativeRate => "NEGATIVE_RATE",
            Self::RateOverflow => "RATE_OVERFLOW",
            Self::DateOverflow => "DATE_OVERFLOW",
            Self::EmptySchedule => "EMPTY_SCHEDULE",
            Self::InvalidScheduledAmount { .. } => "INVALID_INSTALLMENT_AMOUNT",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Persistence(_) => 500,
            _ => 400,
        }
    }
}
