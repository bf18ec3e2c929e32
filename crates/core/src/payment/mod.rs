//! Payment ledger.
//!
//! Two ways money reaches a receivable:
//! - reconciled bank events from a return file ([`PaymentLedger::apply_reconciled`])
//! - manual partial payments ([`PaymentLedger::apply_partial`])
//!
//! The ledger functions are pure. [`PaymentService`] runs them against a
//! [`crate::receivable::ReceivableStore`] under a row lock.

mod error;
mod ledger;
mod service;
mod types;

#[cfg(test)]
mod ledger_props;

pub use error::PaymentError;
pub use ledger::PaymentLedger;
pub use service::PaymentService;
pub use types::{LedgerWrite, PartialPayment, PartialPaymentOutcome, PaymentRecord};
