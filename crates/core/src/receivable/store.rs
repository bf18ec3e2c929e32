//! The receivable persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tesouraria_shared::types::{ReceivableId, TenantId};
use thiserror::Error;

use super::types::{NewReceivable, Receivable};
use crate::payment::{LedgerWrite, PaymentError};

/// Errors raised by a [`ReceivableStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The receivable does not exist for the tenant.
    #[error("Receivable not found: {0}")]
    NotFound(ReceivableId),

    /// The bank event fingerprint was already recorded.
    #[error("Bank event already processed: {0}")]
    DuplicateEvent(String),

    /// The backend failed (connection, constraint, serialization).
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Tenant-scoped receivable persistence.
///
/// Implementations must run [`ReceivableStore::update_locked`] as a single unit:
/// the receivable is re-read under an exclusive lock, `apply` computes the new state
/// from that fresh copy, and the receivable, the optional payment record and the
/// optional event fingerprint are written together or not at all.
#[async_trait]
pub trait ReceivableStore: Send + Sync {
    /// Loads one receivable.
    async fn find(
        &self,
        tenant_id: TenantId,
        id: ReceivableId,
    ) -> Result<Option<Receivable>, StoreError>;

    /// Lists open receivables (pending, partial, overdue) in creation order.
    async fn list_open(&self, tenant_id: TenantId) -> Result<Vec<Receivable>, StoreError>;

    /// Returns true if a bank event with this fingerprint was already applied.
    async fn is_event_processed(
        &self,
        tenant_id: TenantId,
        fingerprint: &str,
    ) -> Result<bool, StoreError>;

    /// Applies a ledger write to a receivable under an exclusive lock.
    ///
    /// Fails with [`PaymentError::NotFound`] for unknown ids and
    /// [`PaymentError::AlreadyProcessed`] when the write's fingerprint already exists.
    async fn update_locked<F>(
        &self,
        tenant_id: TenantId,
        id: ReceivableId,
        apply: F,
    ) -> Result<LedgerWrite, PaymentError>
    where
        F: FnOnce(&Receivable) -> Result<LedgerWrite, PaymentError> + Send + 'static;

    /// Inserts all drafts atomically. On failure nothing is inserted.
    async fn insert_batch(
        &self,
        tenant_id: TenantId,
        drafts: Vec<NewReceivable>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Receivable>, StoreError>;

    /// Inserts a single receivable.
    async fn insert(
        &self,
        tenant_id: TenantId,
        draft: NewReceivable,
        now: DateTime<Utc>,
    ) -> Result<Receivable, StoreError> {
        self.insert_batch(tenant_id, vec![draft], now)
            .await?
            .pop()
            .ok_or_else(|| StoreError::Backend("insert returned no rows".to_string()))
    }
}
