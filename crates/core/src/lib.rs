//! Core business logic for Tesouraria.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `cnab` - Fixed-width bank return file parsing (CNAB240 / CNAB400)
//! - `reconciliation` - Matching bank events to open receivables and batch import
//! - `payment` - Payment ledger: reconciled and manual partial payments
//! - `installment` - Installment plan simulation and materialization
//! - `aging` - Aging buckets and delinquency reporting
//! - `receivable` - The receivable model and the store seam persistence plugs into
//! - `clock` - Injectable time source

pub mod aging;
pub mod clock;
pub mod cnab;
pub mod installment;
pub mod payment;
pub mod receivable;
pub mod reconciliation;

pub use clock::{Clock, FixedClock, SystemClock};
