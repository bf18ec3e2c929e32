//! Materialization of installment plans into receivables.

use chrono::{DateTime, Utc};
use tesouraria_shared::types::{CustomerId, Money, TenantId};

use super::error::InstallmentError;
use super::scheduler::InstallmentScheduler;
use super::types::{InstallmentParams, ScheduledInstallment};
use crate::receivable::{NewReceivable, Receivable, ReceivableStore};

/// Creates one receivable per installment.
pub struct InstallmentService;

impl InstallmentService {
    /// Simulates a plan and persists it.
    pub async fn materialize<S: ReceivableStore>(
        store: &S,
        tenant_id: TenantId,
        customer_id: CustomerId,
        description: &str,
        params: &InstallmentParams,
        now: DateTime<Utc>,
    ) -> Result<Vec<Receivable>, InstallmentError> {
        let plan = InstallmentScheduler::simulate(params)?;
        let schedule: Vec<ScheduledInstallment> =
            plan.installments.iter().map(ScheduledInstallment::from).collect();
        Self::create_from_schedule(store, tenant_id, customer_id, description, &schedule, now)
            .await
    }

    /// Persists a schedule as pending receivables, `description (i/n)`, in one batch.
    pub async fn create_from_schedule<S: ReceivableStore>(
        store: &S,
        tenant_id: TenantId,
        customer_id: CustomerId,
        description: &str,
        schedule: &[ScheduledInstallment],
        now: DateTime<Utc>,
    ) -> Result<Vec<Receivable>, InstallmentError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InstallmentError::MissingDescription);
        }
        if schedule.is_empty() {
            return Err(InstallmentError::EmptySchedule);
        }
        if let Some(index) = schedule
            .iter()
            .position(|item| item.amount < Money::MINOR_UNIT || Money::round_cents(item.amount) != item.amount)
        {
            return Err(InstallmentError::InvalidScheduledAmount { number: index + 1 });
        }

        let count = schedule.len();
        let drafts = schedule
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = format!("{}/{count}", index + 1);
                NewReceivable {
                    customer_id,
                    description: format!("{description} ({label})"),
                    notes: None,
                    amount: item.amount,
                    due_date: item.due_date,
                    installment: Some(label),
                }
            })
            .collect();

        let created = store
            .insert_batch(tenant_id, drafts, now)
            .await
            .inspect_err(|err| {
                tracing::error!(tenant_id = %tenant_id, error = %err, "Failed to create installments");
            })?;

        tracing::info!(
            tenant_id = %tenant_id,
            customer_id = %customer_id,
            count,
            "Installments created"
        );
        Ok(created)
    }
}
