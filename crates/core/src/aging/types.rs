//! Aging report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesouraria_shared::types::CustomerId;

/// Days-past-due ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingRange {
    /// 1 to 30 days.
    #[serde(rename = "1-30")]
    Days1To30,
    /// 31 to 60 days.
    #[serde(rename = "31-60")]
    Days31To60,
    /// 61 to 90 days.
    #[serde(rename = "61-90")]
    Days61To90,
    /// More than 90 days.
    #[serde(rename = "90+")]
    Over90,
}

impl AgingRange {
    /// All ranges, youngest first.
    pub const ALL: [Self; 4] = [
        Self::Days1To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Over90,
    ];

    /// Range of a positive number of days past due.
    #[must_use]
    pub const fn for_days(days: i64) -> Self {
        match days {
            ..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// Aggregate of one aging range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Range.
    pub range: AgingRange,
    /// Number of receivables.
    pub count: usize,
    /// Sum of original amounts.
    pub total_value: Decimal,
    /// Number of distinct debtors.
    pub distinct_customers: usize,
}

/// One of the largest debtors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCustomer {
    /// Debtor.
    pub customer_id: CustomerId,
    /// Sum of overdue amounts.
    pub total_due: Decimal,
    /// Number of overdue receivables.
    pub count: usize,
}

/// Overdue total as reconstructed at a month's end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM`.
    pub month: String,
    /// Overdue total.
    pub total: Decimal,
}

/// The delinquency dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelinquencyReport {
    /// Reference date.
    pub as_of: NaiveDate,
    /// Sum of overdue amounts.
    pub total_overdue: Decimal,
    /// Number of overdue receivables.
    pub overdue_count: usize,
    /// Overdue share of the open total, percent with one decimal.
    pub delinquency_rate: Decimal,
    /// All four ranges, youngest first.
    pub aging_buckets: Vec<AgingBucket>,
    /// Largest debtors, at most ten.
    pub top_customers: Vec<TopCustomer>,
    /// Six months, oldest first, ending with the month of `as_of`.
    pub trend: Vec<TrendPoint>,
}
