//! Pure payment application rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tesouraria_shared::types::{Money, PaymentRecordId};

use super::error::PaymentError;
use super::types::{PartialPayment, PartialPaymentOutcome, PaymentRecord};
use crate::cnab::{PaymentEvent, PaymentOutcome};
use crate::receivable::{Receivable, ReceivableStatus};

/// Applies payments to receivables. Inputs are never mutated; callers get a new state.
pub struct PaymentLedger;

impl PaymentLedger {
    /// Applies a reconciled bank event.
    ///
    /// `amount_paid` is capped at the face value. Any surplus is booked as
    /// interest, and a bank-confirmed settlement below face value books the
    /// shortfall as discount. Explicit interest and discount on the event are
    /// not double counted against those.
    pub fn apply_reconciled(
        receivable: &Receivable,
        event: &PaymentEvent,
        now: DateTime<Utc>,
    ) -> Result<Receivable, PaymentError> {
        if !receivable.is_open() {
            return Err(PaymentError::NotOpen(receivable.id));
        }
        if !event.is_settlement() {
            return Err(PaymentError::NotASettlement);
        }

        let confirmed = event.outcome == PaymentOutcome::Paid;
        let new_paid = receivable.amount_paid + event.paid_amount;
        let settled = confirmed || new_paid >= receivable.amount;

        let surplus = (new_paid - receivable.amount).max(Decimal::ZERO);
        let shortfall = if confirmed {
            (receivable.amount - new_paid).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let mut updated = receivable.clone();
        updated.amount_paid = new_paid.min(receivable.amount);
        updated.interest_amount += surplus.max(event.interest);
        updated.discount_amount += shortfall.max(event.discount);
        if settled {
            updated.status = ReceivableStatus::Paid;
            updated.paid_at = Some(event.paid_at.unwrap_or_else(|| now.date_naive()));
        } else {
            updated.status = ReceivableStatus::Partial;
        }
        updated.reconciled_at = Some(now);
        updated.updated_at = now;

        Ok(updated)
    }

    /// Applies a manual partial payment.
    ///
    /// Over-payment is rejected and leaves the receivable untouched.
    pub fn apply_partial(
        receivable: &Receivable,
        payment: &PartialPayment,
        now: DateTime<Utc>,
    ) -> Result<PartialPaymentOutcome, PaymentError> {
        if payment.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        if Money::round_cents(payment.amount) != payment.amount {
            return Err(PaymentError::SubCentAmount);
        }
        if receivable.status == ReceivableStatus::Cancelled {
            return Err(PaymentError::NotOpen(receivable.id));
        }

        let remaining = receivable.remaining();
        if payment.amount > remaining {
            return Err(PaymentError::ExceedsBalance {
                amount: payment.amount,
                remaining,
            });
        }

        let new_paid = receivable.amount_paid + payment.amount;
        let mut updated = receivable.clone();
        updated.amount_paid = new_paid;
        updated.status = Self::status_for(receivable.amount, new_paid);
        if updated.status == ReceivableStatus::Paid {
            updated.paid_at = Some(payment.payment_date);
        }
        updated.updated_at = now;

        let record = PaymentRecord {
            id: PaymentRecordId::new(),
            tenant_id: receivable.tenant_id,
            receivable_id: receivable.id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            payment_method: payment.payment_method.clone(),
            notes: payment.notes.clone(),
            created_at: now,
        };

        Ok(PartialPaymentOutcome {
            remaining: receivable.amount - new_paid,
            receivable: updated,
            record,
        })
    }

    /// Status implied by a paid total: paid once the face value is covered.
    #[must_use]
    pub fn status_for(amount: Decimal, amount_paid: Decimal) -> ReceivableStatus {
        if amount_paid >= amount {
            ReceivableStatus::Paid
        } else if amount_paid > Decimal::ZERO {
            ReceivableStatus::Partial
        } else {
            ReceivableStatus::Pending
        }
    }
}
