//! Plan computation.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use tesouraria_shared::types::Money;

use super::error::InstallmentError;
use super::types::{Installment, InstallmentParams, InstallmentPlan};

/// Computes installment plans. Pure, no I/O.
pub struct InstallmentScheduler;

impl InstallmentScheduler {
    /// Largest number of installments in one plan.
    pub const MAX_INSTALLMENTS: u32 = 120;

    /// Simulates a plan.
    ///
    /// Interest-free plans sum exactly to the total. Interest-bearing plans use
    /// a fixed payment (Price table) rounded to cents; the last installment
    /// repays whatever principal is left, so the final balance is exactly zero.
    pub fn simulate(params: &InstallmentParams) -> Result<InstallmentPlan, InstallmentError> {
        Self::validate(params)?;

        let installments = if params.monthly_rate.is_zero() {
            Self::interest_free(params)?
        } else {
            Self::amortized(params)?
        };

        let total_with_interest = installments.iter().map(|i| i.amount).sum();
        Ok(InstallmentPlan {
            total_amount: params.total_amount,
            total_with_interest,
            interest_rate: (params.monthly_rate * Decimal::ONE_HUNDRED).normalize(),
            installments,
        })
    }

    /// Due date of the `number`-th installment (1-based), clamped to month end.
    pub fn due_date(first: NaiveDate, number: u32) -> Result<NaiveDate, InstallmentError> {
        first
            .checked_add_months(Months::new(number.saturating_sub(1)))
            .ok_or(InstallmentError::DateOverflow)
    }

    fn validate(params: &InstallmentParams) -> Result<(), InstallmentError> {
        if params.total_amount <= Decimal::ZERO {
            return Err(InstallmentError::InvalidTotal);
        }
        if Money::round_cents(params.total_amount) != params.total_amount {
            return Err(InstallmentError::SubCentTotal);
        }
        if params.installments == 0 || params.installments > Self::MAX_INSTALLMENTS {
            return Err(InstallmentError::InvalidCount {
                count: params.installments,
                max: Self::MAX_INSTALLMENTS,
            });
        }
        if params.monthly_rate < Decimal::ZERO {
            return Err(InstallmentError::NegativeRate);
        }
        Ok(())
    }

    fn interest_free(params: &InstallmentParams) -> Result<Vec<Installment>, InstallmentError> {
        let n = params.installments;
        let count = Decimal::from(n);
        let base = Money::floor_cents(params.total_amount / count);
        let remainder = params.total_amount - base * count;

        let mut balance = params.total_amount;
        (1..=n)
            .map(|number| {
                let amount = if number == n { base + remainder } else { base };
                balance -= amount;
                Ok(Installment {
                    number,
                    due_date: Self::due_date(params.first_due_date, number)?,
                    amount,
                    principal: amount,
                    interest: Decimal::ZERO,
                    remaining_balance: balance,
                })
            })
            .collect()
    }

    fn amortized(params: &InstallmentParams) -> Result<Vec<Installment>, InstallmentError> {
        let n = params.installments;
        let rate = params.monthly_rate;
        let payment = Money::round_cents(Self::fixed_payment(params.total_amount, rate, n)?);

        let mut balance = params.total_amount;
        let mut installments = Vec::with_capacity(n as usize);
        for number in 1..=n {
            let interest = Money::round_cents(
                balance
                    .checked_mul(rate)
                    .ok_or(InstallmentError::RateOverflow)?,
            );
            let (principal, amount) = if number == n {
                (balance, balance + interest)
            } else {
                (payment - interest, payment)
            };
            balance -= principal;

            installments.push(Installment {
                number,
                due_date: Self::due_date(params.first_due_date, number)?,
                amount,
                principal,
                interest,
                remaining_balance: balance,
            });
        }
        Ok(installments)
    }

    /// `PMT = P·r(1+r)^n / ((1+r)^n − 1)`, unrounded.
    fn fixed_payment(total: Decimal, rate: Decimal, n: u32) -> Result<Decimal, InstallmentError> {
        let factor = (Decimal::ONE + rate)
            .checked_powu(u64::from(n))
            .ok_or(InstallmentError::RateOverflow)?;
        total
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor))
            .and_then(|v| v.checked_div(factor - Decimal::ONE))
            .ok_or(InstallmentError::RateOverflow)
    }
}
