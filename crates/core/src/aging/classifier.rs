//! Aging classification.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{AgingBucket, AgingRange, DelinquencyReport, TopCustomer, TrendPoint};
use crate::receivable::Receivable;

/// Builds delinquency reports from a snapshot of receivables. Pure, no I/O.
pub struct AgingClassifier;

impl AgingClassifier {
    /// Number of debtors listed in a report.
    pub const TOP_CUSTOMERS: usize = 10;

    /// Number of months in the trend.
    pub const TREND_MONTHS: u32 = 6;

    /// Classifies `receivables` as of `as_of`.
    ///
    /// Receivables outside the open statuses are ignored, so callers may pass
    /// any superset of the open receivables.
    #[must_use]
    pub fn classify(receivables: &[Receivable], as_of: NaiveDate) -> DelinquencyReport {
        let overdue: Vec<&Receivable> = receivables
            .iter()
            .filter(|r| Self::is_overdue(r, as_of))
            .collect();

        let total_overdue: Decimal = overdue.iter().map(|r| r.amount).sum();
        let total_open: Decimal = receivables
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.amount)
            .sum();

        DelinquencyReport {
            as_of,
            total_overdue,
            overdue_count: overdue.len(),
            delinquency_rate: Self::rate(total_overdue, total_open),
            aging_buckets: Self::buckets(&overdue, as_of),
            top_customers: Self::top_customers(&overdue),
            trend: Self::trend(receivables, as_of),
        }
    }

    /// Pending or overdue, and due strictly before `as_of`.
    #[must_use]
    pub fn is_overdue(receivable: &Receivable, as_of: NaiveDate) -> bool {
        receivable.status.is_delinquent_candidate() && receivable.due_date < as_of
    }

    /// Whole days between due date and `as_of`.
    #[must_use]
    pub fn days_overdue(due_date: NaiveDate, as_of: NaiveDate) -> i64 {
        (as_of - due_date).num_days()
    }

    fn rate(overdue: Decimal, open: Decimal) -> Decimal {
        if open.is_zero() {
            return Decimal::ZERO;
        }
        (overdue / open * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }

    fn buckets(overdue: &[&Receivable], as_of: NaiveDate) -> Vec<AgingBucket> {
        AgingRange::ALL
            .into_iter()
            .map(|range| {
                let members: Vec<&&Receivable> = overdue
                    .iter()
                    .filter(|r| AgingRange::for_days(Self::days_overdue(r.due_date, as_of)) == range)
                    .collect();
                let customers: BTreeSet<_> = members.iter().map(|r| r.customer_id).collect();
                AgingBucket {
                    range,
                    count: members.len(),
                    total_value: members.iter().map(|r| r.amount).sum(),
                    distinct_customers: customers.len(),
                }
            })
            .collect()
    }

    fn top_customers(overdue: &[&Receivable]) -> Vec<TopCustomer> {
        let mut totals: BTreeMap<_, (Decimal, usize)> = BTreeMap::new();
        for receivable in overdue {
            let entry = totals.entry(receivable.customer_id).or_default();
            entry.0 += receivable.amount;
            entry.1 += 1;
        }

        let mut ranked: Vec<TopCustomer> = totals
            .into_iter()
            .map(|(customer_id, (total_due, count))| TopCustomer {
                customer_id,
                total_due,
                count,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.total_due
                .cmp(&a.total_due)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });
        ranked.truncate(Self::TOP_CUSTOMERS);
        ranked
    }

    /// Reconstructs the overdue total at each of the trailing month ends.
    fn trend(receivables: &[Receivable], as_of: NaiveDate) -> Vec<TrendPoint> {
        let Some(current_month) = as_of.with_day(1) else {
            return Vec::new();
        };

        (0..Self::TREND_MONTHS)
            .rev()
            .filter_map(|offset| {
                let start = current_month.checked_sub_months(Months::new(offset))?;
                let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
                let total = receivables
                    .iter()
                    .filter(|r| {
                        r.status.is_delinquent_candidate()
                            && r.due_date <= end
                            && r.created_at.date_naive() <= end
                    })
                    .map(|r| r.amount)
                    .sum();
                Some(TrendPoint {
                    month: start.format("%Y-%m").to_string(),
                    total,
                })
            })
            .collect()
    }
}
