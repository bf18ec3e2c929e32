//! Installment plan routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesouraria_core::installment::{
    InstallmentParams, InstallmentPlan, InstallmentScheduler, InstallmentService,
    ScheduledInstallment,
};
use tesouraria_core::receivable::ReceivableStore;
use tesouraria_shared::types::{CustomerId, ReceivableId, TenantId};

use crate::AppState;
use crate::error::ApiError;

/// Creates the installment routes.
pub fn routes<S: ReceivableStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/installments/simulate",
            post(simulate_installments),
        )
        .route("/tenants/{tenant_id}/installments", post(create_installments::<S>))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a simulation.
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    /// Amount to finance.
    pub total_amount: Decimal,
    /// Number of monthly installments (1-120).
    pub installments: u32,
    /// Monthly interest rate in percent (`2` is 2% a month). Absent means interest-free.
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
}

impl SimulateRequest {
    fn params(&self) -> InstallmentParams {
        InstallmentParams {
            total_amount: self.total_amount,
            installments: self.installments,
            monthly_rate: self.interest_rate.unwrap_or_default() / Decimal::ONE_HUNDRED,
            first_due_date: self.first_due_date,
        }
    }
}

/// Request body for creating installments from a schedule.
#[derive(Debug, Deserialize)]
pub struct CreateInstallmentsRequest {
    /// Debtor.
    pub customer_id: CustomerId,
    /// Base description; each receivable gets ` (i/n)` appended.
    pub description: String,
    /// Schedule, usually the output of a simulation.
    pub installments: Vec<ScheduledInstallment>,
}

/// Response after creating installments.
#[derive(Debug, Serialize)]
pub struct CreateInstallmentsResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Created receivables, in schedule order.
    pub ids: Vec<ReceivableId>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /tenants/{tenant_id}/installments/simulate
///
/// Pure computation; nothing is stored.
async fn simulate_installments(
    Path(_tenant_id): Path<TenantId>,
    Json(payload): Json<SimulateRequest>,
) -> Result<Json<InstallmentPlan>, ApiError> {
    let plan = InstallmentScheduler::simulate(&payload.params())?;
    Ok(Json(plan))
}

/// POST /tenants/{tenant_id}/installments
async fn create_installments<S: ReceivableStore>(
    State(state): State<AppState<S>>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<CreateInstallmentsRequest>,
) -> Result<(StatusCode, Json<CreateInstallmentsResponse>), ApiError> {
    let created = InstallmentService::create_from_schedule(
        state.store.as_ref(),
        tenant_id,
        payload.customer_id,
        &payload.description,
        &payload.installments,
        state.clock.now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInstallmentsResponse {
            message: format!("{} installments created", created.len()),
            ids: created.into_iter().map(|receivable| receivable.id).collect(),
        }),
    ))
}
