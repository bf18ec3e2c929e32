//! Installment types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentParams {
    /// Financed total, at cent precision.
    pub total_amount: Decimal,
    /// Number of monthly installments.
    pub installments: u32,
    /// Monthly interest rate as a fraction (`0.02` is 2% a month).
    pub monthly_rate: Decimal,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
}

/// One row of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position.
    pub number: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount charged.
    pub amount: Decimal,
    /// Principal portion.
    pub principal: Decimal,
    /// Interest portion.
    pub interest: Decimal,
    /// Principal still owed after this installment.
    pub remaining_balance: Decimal,
}

/// A simulated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Financed total.
    pub total_amount: Decimal,
    /// Sum of all installment amounts.
    pub total_with_interest: Decimal,
    /// Monthly rate in percent.
    pub interest_rate: Decimal,
    /// Installments in due order.
    pub installments: Vec<Installment>,
}

/// One item of a schedule to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
}

impl From<&Installment> for ScheduledInstallment {
    fn from(installment: &Installment) -> Self {
        Self {
            due_date: installment.due_date,
            amount: installment.amount,
        }
    }
}
