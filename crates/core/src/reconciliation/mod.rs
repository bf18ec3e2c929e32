//! Bank return reconciliation.
//!
//! Decodes a return file line by line, pairs CNAB240 T/U segments, matches each
//! event to an open receivable and applies settlements through the payment ledger.
//! One bad line never aborts the batch; the outcome is a set of counters.

mod error;
mod matcher;
mod service;
mod types;


pub use error::{ImportError, LineError};
pub use matcher::{MatchStrategy, SubstringMatch};
pub use service::ReconciliationService;
pub use types::{ImportDirection, ImportRequest, ImportSummary};
