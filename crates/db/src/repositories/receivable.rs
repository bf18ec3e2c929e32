//! Receivable repository: the Postgres [`ReceivableStore`].
//!
//! Ledger updates run inside one database transaction: the receivable row is
//! re-read with `SELECT ... FOR UPDATE`, the new state is computed from that
//! fresh copy, and the receivable, payment record and processed-event marker
//! are written before commit. Any error drops the transaction, rolling it back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tesouraria_core::payment::{LedgerWrite, PaymentError, PaymentRecord};
use tesouraria_core::receivable::{NewReceivable, Receivable, ReceivableStore, StoreError};
use tesouraria_shared::types::{CustomerId, ReceivableId, TenantId};

use crate::entities::sea_orm_active_enums::ReceivableStatus;
use crate::entities::{partial_payments, processed_cnab_events, receivables};

/// Receivable repository backed by `SeaORM`.
#[derive(Debug, Clone)]
pub struct ReceivableRepository {
    db: DatabaseConnection,
}

impl ReceivableRepository {
    /// Creates a new receivable repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the manual payments of a receivable, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn payments_for(
        &self,
        tenant_id: TenantId,
        receivable_id: ReceivableId,
    ) -> Result<Vec<partial_payments::Model>, DbErr> {
        partial_payments::Entity::find()
            .filter(partial_payments::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(partial_payments::Column::ReceivableId.eq(receivable_id.into_inner()))
            .order_by_asc(partial_payments::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}

fn backend(err: DbErr) -> StoreError {
    tracing::error!(error = %err, "Receivable store query failed");
    StoreError::Backend(err.to_string())
}

fn to_domain(model: receivables::Model) -> Receivable {
    Receivable {
        id: ReceivableId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        customer_id: CustomerId::from_uuid(model.customer_id),
        description: model.description,
        notes: model.notes,
        amount: model.amount,
        amount_paid: model.amount_paid,
        interest_amount: model.interest_amount,
        discount_amount: model.discount_amount,
        due_date: model.due_date,
        status: model.status.into(),
        paid_at: model.paid_at,
        installment: model.installment,
        reconciled_at: model.reconciled_at.map(|at| at.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn to_active(receivable: &Receivable) -> receivables::ActiveModel {
    receivables::ActiveModel {
        id: Set(receivable.id.into_inner()),
        tenant_id: Set(receivable.tenant_id.into_inner()),
        customer_id: Set(receivable.customer_id.into_inner()),
        description: Set(receivable.description.clone()),
        notes: Set(receivable.notes.clone()),
        amount: Set(receivable.amount),
        amount_paid: Set(receivable.amount_paid),
        interest_amount: Set(receivable.interest_amount),
        discount_amount: Set(receivable.discount_amount),
        due_date: Set(receivable.due_date),
        status: Set(ReceivableStatus::from(receivable.status)),
        paid_at: Set(receivable.paid_at),
        installment: Set(receivable.installment.clone()),
        reconciled_at: Set(receivable.reconciled_at.map(Into::into)),
        created_at: Set(receivable.created_at.into()),
        updated_at: Set(receivable.updated_at.into()),
    }
}

fn payment_to_active(record: &PaymentRecord) -> partial_payments::ActiveModel {
    partial_payments::ActiveModel {
        id: Set(record.id.into_inner()),
        tenant_id: Set(record.tenant_id.into_inner()),
        receivable_id: Set(record.receivable_id.into_inner()),
        amount: Set(record.amount),
        payment_date: Set(record.payment_date),
        payment_method: Set(record.payment_method.clone()),
        notes: Set(record.notes.clone()),
        created_at: Set(record.created_at.into()),
    }
}

#[async_trait]
impl ReceivableStore for ReceivableRepository {
    async fn find(
        &self,
        tenant_id: TenantId,
        id: ReceivableId,
    ) -> Result<Option<Receivable>, StoreError> {
        let model = receivables::Entity::find_by_id(id.into_inner())
            .filter(receivables::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(backend)?;
        Ok(model.map(to_domain))
    }

    async fn list_open(&self, tenant_id: TenantId) -> Result<Vec<Receivable>, StoreError> {
        let models = receivables::Entity::find()
            .filter(receivables::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(receivables::Column::Status.is_in(ReceivableStatus::OPEN))
            .order_by_asc(receivables::Column::CreatedAt)
            .order_by_asc(receivables::Column::Id)
            .all(&self.db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn is_event_processed(
        &self,
        tenant_id: TenantId,
        fingerprint: &str,
    ) -> Result<bool, StoreError> {
        let found =
            processed_cnab_events::Entity::find_by_id((tenant_id.into_inner(), fingerprint.to_string()))
                .one(&self.db)
                .await
                .map_err(backend)?;
        Ok(found.is_some())
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
        let txn = self.db.begin().await.map_err(backend)?;

        // Row lock held until commit or rollback
        let current = receivables::Entity::find_by_id(id.into_inner())
            .filter(receivables::Column::TenantId.eq(tenant_id.into_inner()))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(backend)?
            .map(to_domain)
            .ok_or(PaymentError::NotFound(id))?;

        let write = apply(&current)?;

        if let Some(fingerprint) = &write.event_fingerprint {
            let seen = processed_cnab_events::Entity::find_by_id((
                tenant_id.into_inner(),
                fingerprint.clone(),
            ))
            .one(&txn)
            .await
            .map_err(backend)?;
            if seen.is_some() {
                return Err(PaymentError::AlreadyProcessed);
            }
        }

        to_active(&write.receivable)
            .update(&txn)
            .await
            .map_err(backend)?;

        if let Some(record) = &write.payment_record {
            payment_to_active(record)
                .insert(&txn)
                .await
                .map_err(backend)?;
        }

        if let Some(fingerprint) = &write.event_fingerprint {
            processed_cnab_events::ActiveModel {
                tenant_id: Set(tenant_id.into_inner()),
                fingerprint: Set(fingerprint.clone()),
                receivable_id: Set(id.into_inner()),
                processed_at: Set(write.receivable.updated_at.into()),
            }
            .insert(&txn)
            .await
            .map_err(backend)?;
        }

        txn.commit().await.map_err(backend)?;
        Ok(write)
    }

    async fn insert_batch(
        &self,
        tenant_id: TenantId,
        drafts: Vec<NewReceivable>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Receivable>, StoreError> {
        let txn = self.db.begin().await.map_err(backend)?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let receivable = Receivable::from_draft(tenant_id, draft, now);
            let model = to_active(&receivable).insert(&txn).await.map_err(backend)?;
            created.push(to_domain(model));
        }

        txn.commit().await.map_err(backend)?;
        Ok(created)
    }
}
