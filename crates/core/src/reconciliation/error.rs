//! Import error types.

use thiserror::Error;

use crate::cnab::SkipReason;
use crate::payment::PaymentError;

/// Errors that reject a whole import request.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file has no non-blank lines.
    #[error("Return file is empty")]
    EmptyFile,

    /// No layout was given and none could be inferred.
    #[error("Could not detect the CNAB layout; specify cnab240 or cnab400")]
    UndetectableLayout,
}

impl ImportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyFile => "EMPTY_FILE",
            Self::UndetectableLayout => "UNDETECTABLE_LAYOUT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

/// A single line that could not be reconciled. Reported, never fatal.
#[derive(Debug, Error)]
pub enum LineError {
    /// Detail record with corrupt content.
    #[error("Line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Decoder diagnosis.
        reason: SkipReason,
    },

    /// Matched receivable refused the payment.
    #[error("Line {line}: {reason}")]
    Rejected {
        /// 1-based line number.
        line: usize,
        /// Ledger diagnosis.
        reason: PaymentError,
    },

    /// Storage failed. Detail goes to the logs, not to the caller.
    #[error("Line {line}: could not be saved")]
    Persistence {
        /// 1-based line number.
        line: usize,
    },
}
