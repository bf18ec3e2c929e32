//! Property-based tests for the payment ledger.
//!
//! Manual payments keep `0 <= amount_paid <= amount` and the status law:
//! paid iff `amount_paid >= amount`, partial iff `0 < amount_paid < amount`.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tesouraria_shared::types::{CustomerId, TenantId};

use super::error::PaymentError;
use super::ledger::PaymentLedger;
use super::types::PartialPayment;
use crate::receivable::{NewReceivable, Receivable, ReceivableStatus};

/// Amounts from 0.01 to 100,000.00.
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

fn receivable(amount: Decimal) -> Receivable {
    Receivable::from_draft(
        TenantId::new(),
        NewReceivable {
            customer_id: CustomerId::new(),
            description: "Property".to_string(),
            notes: None,
            amount,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            installment: None,
        },
        Utc::now(),
    )
}

fn payment(amount: Decimal) -> PartialPayment {
    PartialPayment {
        amount,
        payment_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        payment_method: None,
        notes: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any sequence of payments keeps the paid total within bounds and the status consistent.
    #[test]
    fn prop_payments_keep_invariants(
        amount in cents(),
        payments in proptest::collection::vec(cents(), 1..12),
    ) {
        let mut current = receivable(amount);

        for value in payments {
            let before = current.clone();
            match PaymentLedger::apply_partial(&current, &payment(value), Utc::now()) {
                Ok(outcome) => {
                    prop_assert_eq!(outcome.receivable.amount_paid, before.amount_paid + value);
                    prop_assert_eq!(outcome.remaining, amount - outcome.receivable.amount_paid);
                    current = outcome.receivable;
                }
                Err(PaymentError::ExceedsBalance { remaining, .. }) => {
                    prop_assert!(value > remaining);
                    prop_assert_eq!(remaining, before.remaining());
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }

            prop_assert!(current.amount_paid >= Decimal::ZERO);
            prop_assert!(current.amount_paid <= current.amount);
            let paid = current.amount_paid >= current.amount;
            prop_assert_eq!(current.status == ReceivableStatus::Paid, paid);
            prop_assert_eq!(
                current.status == ReceivableStatus::Partial,
                current.amount_paid > Decimal::ZERO && !paid
            );
        }
    }

    /// Paying exactly the remaining balance always settles.
    #[test]
    fn prop_exact_balance_settles(amount in cents(), first in cents()) {
        prop_assume!(first < amount);
        let start = receivable(amount);
        let partial = PaymentLedger::apply_partial(&start, &payment(first), Utc::now()).unwrap();
        let rest = partial.remaining;
        let done = PaymentLedger::apply_partial(&partial.receivable, &payment(rest), Utc::now()).unwrap();

        prop_assert_eq!(done.receivable.status, ReceivableStatus::Paid);
        prop_assert_eq!(done.remaining, Decimal::ZERO);
    }

    /// Reconciled amounts never push `amount_paid` above the face value; the surplus is interest.
    #[test]
    fn prop_reconciled_paid_capped(amount in cents(), paid in cents()) {
        use crate::cnab::{CnabLayout, PaymentEvent, PaymentOutcome, RecordSegment};

        let event = PaymentEvent {
            layout: CnabLayout::Cnab400,
            segment: RecordSegment::Detail,
            reference_token_1: "1".to_string(),
            reference_token_2: String::new(),
            paid_amount: paid,
            face_amount: None,
            interest: Decimal::ZERO,
            discount: Decimal::ZERO,
            due_date: None,
            paid_at: None,
            outcome: PaymentOutcome::Unknown,
            fingerprint: String::new(),
        };
        let updated = PaymentLedger::apply_reconciled(&receivable(amount), &event, Utc::now()).unwrap();

        prop_assert!(updated.amount_paid <= amount);
        prop_assert_eq!(updated.amount_paid + updated.interest_amount, paid);
    }
}
