//! Store-backed payment operations.

use chrono::{DateTime, Utc};
use tesouraria_shared::types::{ReceivableId, TenantId};

use super::error::PaymentError;
use super::ledger::PaymentLedger;
use super::types::{LedgerWrite, PartialPayment, PartialPaymentOutcome};
use crate::cnab::PaymentEvent;
use crate::receivable::{Receivable, ReceivableStore};

/// Runs ledger rules against a store, one locked unit of work per payment.
pub struct PaymentService;

impl PaymentService {
    /// Records a manual partial payment and its payment record atomically.
    pub async fn record_partial<S: ReceivableStore>(
        store: &S,
        tenant_id: TenantId,
        receivable_id: ReceivableId,
        payment: PartialPayment,
        now: DateTime<Utc>,
    ) -> Result<PartialPaymentOutcome, PaymentError> {
        let write = store
            .update_locked(tenant_id, receivable_id, move |current| {
                let outcome = PaymentLedger::apply_partial(current, &payment, now)?;
                Ok(LedgerWrite {
                    receivable: outcome.receivable,
                    payment_record: Some(outcome.record),
                    event_fingerprint: None,
                })
            })
            .await
            .inspect_err(|err| log_failure(err, receivable_id))?;

        let record = write
            .payment_record
            .ok_or_else(|| PaymentError::Persistence("payment record not returned".to_string()))?;

        tracing::info!(
            receivable_id = %receivable_id,
            amount = %record.amount,
            status = %write.receivable.status,
            "Partial payment recorded"
        );

        Ok(PartialPaymentOutcome {
            remaining: write.receivable.remaining(),
            receivable: write.receivable,
            record,
        })
    }

    /// Applies a matched bank event, storing its fingerprint in the same unit of work.
    pub async fn apply_reconciled<S: ReceivableStore>(
        store: &S,
        tenant_id: TenantId,
        receivable_id: ReceivableId,
        event: PaymentEvent,
        now: DateTime<Utc>,
    ) -> Result<Receivable, PaymentError> {
        let write = store
            .update_locked(tenant_id, receivable_id, move |current| {
                let receivable = PaymentLedger::apply_reconciled(current, &event, now)?;
                Ok(LedgerWrite {
                    receivable,
                    payment_record: None,
                    event_fingerprint: Some(event.fingerprint),
                })
            })
            .await
            .inspect_err(|err| log_failure(err, receivable_id))?;

        Ok(write.receivable)
    }
}

fn log_failure(err: &PaymentError, receivable_id: ReceivableId) {
    if let PaymentError::Persistence(detail) = err {
        tracing::error!(receivable_id = %receivable_id, error = %detail, "Payment write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnab::{CnabLayout, PaymentOutcome, RecordSegment};
    use crate::receivable::{InMemoryReceivableStore, NewReceivable, ReceivableStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tesouraria_shared::types::CustomerId;

    async fn seeded(store: &InMemoryReceivableStore, tenant: TenantId) -> Receivable {
        store
            .insert(
                tenant,
                NewReceivable {
                    customer_id: CustomerId::new(),
                    description: "Inspection".to_string(),
                    notes: None,
                    amount: dec!(500),
                    due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    installment: None,
                },
                Utc::now(),
            )
            .await
            .unwrap()
    }

    fn payment(amount: rust_decimal::Decimal) -> PartialPayment {
        PartialPayment {
            amount,
            payment_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            payment_method: None,
            notes: Some("front desk".to_string()),
        }
    }

    #[tokio::test]
    async fn test_record_partial_persists_receivable_and_record() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let created = seeded(&store, tenant).await;

        let outcome =
            PaymentService::record_partial(&store, tenant, created.id, payment(dec!(200)), Utc::now())
                .await
                .unwrap();

        assert_eq!(outcome.remaining, dec!(300));
        let stored = store.find(tenant, created.id).await.unwrap().unwrap();
        assert_eq!(stored.amount_paid, dec!(200));
        assert_eq!(stored.status, ReceivableStatus::Partial);
        assert_eq!(store.payments_for(created.id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_over_payment_leaves_store_untouched() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let created = seeded(&store, tenant).await;

        let result =
            PaymentService::record_partial(&store, tenant, created.id, payment(dec!(500.01)), Utc::now())
                .await;

        assert!(matches!(result, Err(PaymentError::ExceedsBalance { .. })));
        assert_eq!(store.find(tenant, created.id).await.unwrap(), Some(created.clone()));
        assert!(store.payments_for(created.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_manual_payment_after_bank_shortfall_is_rejected() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let created = seeded(&store, tenant).await;
        let bank = PaymentEvent {
            layout: CnabLayout::Cnab400,
            segment: RecordSegment::Detail,
            reference_token_1: "12345".to_string(),
            reference_token_2: String::new(),
            paid_amount: dec!(480),
            face_amount: None,
            interest: dec!(0),
            discount: dec!(0),
            due_date: None,
            paid_at: NaiveDate::from_ymd_opt(2024, 1, 12),
            outcome: PaymentOutcome::Paid,
            fingerprint: "bank-480".to_string(),
        };
        let settled = PaymentService::apply_reconciled(&store, tenant, created.id, bank, Utc::now())
            .await
            .unwrap();
        assert_eq!(settled.discount_amount, dec!(20));

        let result =
            PaymentService::record_partial(&store, tenant, created.id, payment(dec!(20)), Utc::now())
                .await;

        assert!(matches!(result, Err(PaymentError::ExceedsBalance { .. })));
        assert_eq!(store.find(tenant, created.id).await.unwrap(), Some(settled));
        assert!(store.payments_for(created.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_rolls_back() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let created = seeded(&store, tenant).await;
        store.fail_writes(true);

        let result =
            PaymentService::record_partial(&store, tenant, created.id, payment(dec!(10)), Utc::now())
                .await;

        assert!(matches!(result, Err(PaymentError::Persistence(_))));
        assert_eq!(store.find(tenant, created.id).await.unwrap(), Some(created.clone()));
        assert!(store.payments_for(created.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_tenant_cannot_pay() {
        let store = InMemoryReceivableStore::new();
        let created = seeded(&store, TenantId::new()).await;

        let result = PaymentService::record_partial(
            &store,
            TenantId::new(),
            created.id,
            payment(dec!(10)),
            Utc::now(),
        )
        .await;

        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }
}
