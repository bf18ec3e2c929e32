//! Installment plans.
//!
//! [`InstallmentScheduler`] splits a total into monthly installments, either
//! interest-free (equal parts, the last absorbing the cents) or with Price-table
//! amortization. [`InstallmentService`] turns a plan or a hand-made schedule into
//! receivables, all or nothing.

mod error;
mod scheduler;
mod service;
mod types;

#[cfg(test)]
mod scheduler_props;

pub use error::InstallmentError;
pub use scheduler::InstallmentScheduler;
pub use service::InstallmentService;
pub use types::{Installment, InstallmentParams, InstallmentPlan, ScheduledInstallment};
