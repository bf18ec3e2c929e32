//! In-memory receivable store for tests and local development.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tesouraria_shared::types::{ReceivableId, TenantId};

use super::store::{ReceivableStore, StoreError};
use super::types::{NewReceivable, Receivable};
use crate::payment::{LedgerWrite, PaymentError, PaymentRecord};

#[derive(Debug, Default)]
struct Tables {
    receivables: HashMap<TenantId, Vec<Receivable>>,
    payments: Vec<PaymentRecord>,
    processed: HashSet<(TenantId, String)>,
}

/// Mutex-guarded store. One lock covers every table, so each call is atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceivableStore {
    tables: Arc<Mutex<Tables>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryReceivableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a backend error (rollback testing).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds an existing receivable as-is.
    pub fn seed(&self, receivable: Receivable) -> Result<(), StoreError> {
        self.lock()?
            .receivables
            .entry(receivable.tenant_id)
            .or_default()
            .push(receivable);
        Ok(())
    }

    /// Returns all receivables of a tenant, in insertion order.
    pub fn receivables(&self, tenant_id: TenantId) -> Result<Vec<Receivable>, StoreError> {
        Ok(self
            .lock()?
            .receivables
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Returns the manual payment records of a receivable.
    pub fn payments_for(&self, receivable_id: ReceivableId) -> Result<Vec<PaymentRecord>, StoreError> {
        Ok(self
            .lock()?
            .payments
            .iter()
            .filter(|record| record.receivable_id == receivable_id)
            .cloned()
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReceivableStore for InMemoryReceivableStore {
    async fn find(
        &self,
        tenant_id: TenantId,
        id: ReceivableId,
    ) -> Result<Option<Receivable>, StoreError> {
        Ok(self
            .lock()?
            .receivables
            .get(&tenant_id)
            .and_then(|rows| rows.iter().find(|r| r.id == id).cloned()))
    }

    async fn list_open(&self, tenant_id: TenantId) -> Result<Vec<Receivable>, StoreError> {
        Ok(self
            .lock()?
            .receivables
            .get(&tenant_id)
            .map(|rows| rows.iter().filter(|r| r.is_open()).cloned().collect())
            .unwrap_or_default())
    }

    async fn is_event_processed(
        &self,
        tenant_id: TenantId,
        fingerprint: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .lock()?
            .processed
            .contains(&(tenant_id, fingerprint.to_string())))
    }

    async fn update_locked<F>(
        &self,
        tenant_id: TenantId,
        id: ReceivableId,
        apply: F,
    ) -> Result<LedgerWrite, PaymentError>
    where
        F: FnOnce(&Receivable) -> Result<LedgerWrite, PaymentError> + Send + 'static,
    {
        let mut tables = self.lock()?;

        let (index, current) = tables
            .receivables
            .get(&tenant_id)
            .and_then(|rows| {
                rows.iter()
                    .enumerate()
                    .find(|(_, r)| r.id == id)
                    .map(|(index, r)| (index, r.clone()))
            })
            .ok_or(PaymentError::NotFound(id))?;

        let write = apply(&current)?;

        if let Some(fingerprint) = &write.event_fingerprint
            && tables.processed.contains(&(tenant_id, fingerprint.clone()))
        {
            return Err(StoreError::DuplicateEvent(fingerprint.clone()).into());
        }
        self.check_writable()?;

        if let Some(rows) = tables.receivables.get_mut(&tenant_id) {
            rows[index] = write.receivable.clone();
        }
        if let Some(record) = &write.payment_record {
            tables.payments.push(record.clone());
        }
        if let Some(fingerprint) = &write.event_fingerprint {
            tables.processed.insert((tenant_id, fingerprint.clone()));
        }

        Ok(write)
    }

    async fn insert_batch(
        &self,
        tenant_id: TenantId,
        drafts: Vec<NewReceivable>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Receivable>, StoreError> {
        let mut tables = self.lock()?;
        self.check_writable()?;

        let created: Vec<Receivable> = drafts
            .into_iter()
            .map(|draft| Receivable::from_draft(tenant_id, draft, now))
            .collect();
        tables
            .receivables
            .entry(tenant_id)
            .or_default()
            .extend(created.iter().cloned());

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receivable::ReceivableStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tesouraria_shared::types::CustomerId;

    fn draft(amount: rust_decimal::Decimal) -> NewReceivable {
        NewReceivable {
            customer_id: CustomerId::new(),
            description: "Maintenance".to_string(),
            notes: None,
            amount,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            installment: None,
        }
    }

    #[tokio::test]
    async fn test_list_open_is_tenant_scoped() {
        let store = InMemoryReceivableStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();

        store.insert(tenant_a, draft(dec!(10)), Utc::now()).await.unwrap();
        store.insert(tenant_b, draft(dec!(20)), Utc::now()).await.unwrap();

        let open = store.list_open(tenant_a).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].amount, dec!(10));
    }

    #[tokio::test]
    async fn test_list_open_skips_settled() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let mut paid = Receivable::from_draft(tenant, draft(dec!(5)), Utc::now());
        paid.status = ReceivableStatus::Paid;
        store.seed(paid).unwrap();
        store.insert(tenant, draft(dec!(7)), Utc::now()).await.unwrap();

        let open = store.list_open(tenant).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].amount, dec!(7));
    }

    #[tokio::test]
    async fn test_failed_batch_inserts_nothing() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        store.fail_writes(true);

        let result = store
            .insert_batch(tenant, vec![draft(dec!(1)), draft(dec!(2))], Utc::now())
            .await;

        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert!(store.receivables(tenant).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_locked_unknown_id() {
        let store = InMemoryReceivableStore::new();
        let result = store
            .update_locked(TenantId::new(), ReceivableId::new(), |r| {
                Ok(LedgerWrite::receivable_only(r.clone()))
            })
            .await;
        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_locked_rejected_write_leaves_row() {
        let store = InMemoryReceivableStore::new();
        let tenant = TenantId::new();
        let created = store.insert(tenant, draft(dec!(9)), Utc::now()).await.unwrap();

        let result = store
            .update_locked(tenant, created.id, |_| Err(PaymentError::NonPositiveAmount))
            .await;

        assert!(matches!(result, Err(PaymentError::NonPositiveAmount)));
        assert_eq!(store.find(tenant, created.id).await.unwrap(), Some(created));
    }
}
