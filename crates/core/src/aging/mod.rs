//! Aging and delinquency reporting.
//!
//! Buckets overdue receivables by days past due and builds the delinquency
//! dashboard: totals, rate, top debtors and a six-month trend.

mod classifier;
mod service;
mod types;


pub use classifier::AgingClassifier;
pub use service::DelinquencyService;
pub use types::{AgingBucket, AgingRange, DelinquencyReport, TopCustomer, TrendPoint};
