//! Property-based tests for installment plans.
//!
//! Interest-free plans sum exactly to the total; amortized plans repay exactly
//! the total in principal and end with a zero balance.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::scheduler::InstallmentScheduler;
use super::types::InstallmentParams;

/// Totals from 0.01 to 1,000,000.00.
fn total() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Monthly rates from 0.01% to 10.00%.
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

fn params(total: Decimal, n: u32, rate: Decimal) -> InstallmentParams {
    InstallmentParams {
        total_amount: total,
        installments: n,
        monthly_rate: rate,
        first_due_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Interest-free amounts sum exactly to the total, all but the last are equal.
    #[test]
    fn prop_interest_free_sums_exactly(amount in total(), n in 1u32..=120) {
        let plan = InstallmentScheduler::simulate(&params(amount, n, Decimal::ZERO)).unwrap();

        let sum: Decimal = plan.installments.iter().map(|i| i.amount).sum();
        prop_assert_eq!(sum, amount);
        prop_assert_eq!(plan.installments.len(), n as usize);

        let first = plan.installments[0].amount;
        for installment in &plan.installments[..plan.installments.len() - 1] {
            prop_assert_eq!(installment.amount, first);
        }
        prop_assert!(plan.installments[plan.installments.len() - 1].amount >= first);
    }

    /// Amortized principal sums to the total and the balance ends at zero.
    #[test]
    fn prop_amortized_repays_principal(amount in total(), n in 1u32..=120, r in rate()) {
        let plan = InstallmentScheduler::simulate(&params(amount, n, r)).unwrap();

        let principal: Decimal = plan.installments.iter().map(|i| i.principal).sum();
        prop_assert_eq!(principal, amount);
        prop_assert_eq!(plan.installments[plan.installments.len() - 1].remaining_balance, Decimal::ZERO);

        for installment in &plan.installments {
            prop_assert_eq!(installment.amount, installment.principal + installment.interest);
            prop_assert_eq!(installment.amount.round_dp(2), installment.amount);
        }
    }

    /// Due dates are strictly increasing, one month apart.
    #[test]
    fn prop_due_dates_monthly(n in 2u32..=120) {
        let plan = InstallmentScheduler::simulate(&params(Decimal::new(100_000, 2), n, Decimal::ZERO)).unwrap();
        for pair in plan.installments.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }
}
