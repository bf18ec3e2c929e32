//! Receivable payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesouraria_core::payment::{PartialPayment, PaymentService};
use tesouraria_core::receivable::{ReceivableStatus, ReceivableStore};
use tesouraria_shared::types::{PaymentRecordId, ReceivableId, TenantId};

use crate::AppState;
use crate::error::ApiError;

/// Creates the receivable routes.
pub fn routes<S: ReceivableStore + 'static>() -> Router<AppState<S>> {
    Router::new().route(
        "/tenants/{tenant_id}/receivables/{receivable_id}/partial-payments",
        post(record_partial_payment::<S>),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a manual partial payment.
#[derive(Debug, Deserialize)]
pub struct PartialPaymentRequest {
    /// Amount received, at cent precision.
    pub amount: Decimal,
    /// Date the money was received.
    pub payment_date: NaiveDate,
    /// Free-form payment method (cash, PIX, transfer, ...).
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response after a partial payment.
#[derive(Debug, Serialize)]
pub struct PartialPaymentResponse {
    /// Human-readable outcome.
    pub message: &'static str,
    /// Id of the stored payment record.
    pub payment_id: PaymentRecordId,
    /// Total paid so far.
    pub amount_paid: Decimal,
    /// Balance still owed.
    pub remaining: Decimal,
    /// Status after the payment.
    pub status: ReceivableStatus,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /tenants/{tenant_id}/receivables/{receivable_id}/partial-payments
async fn record_partial_payment<S: ReceivableStore>(
    State(state): State<AppState<S>>,
    Path((tenant_id, receivable_id)): Path<(TenantId, ReceivableId)>,
    Json(payload): Json<PartialPaymentRequest>,
) -> Result<Json<PartialPaymentResponse>, ApiError> {
    let payment = PartialPayment {
        amount: payload.amount,
        payment_date: payload.payment_date,
        payment_method: payload.payment_method,
        notes: payload.notes,
    };

    let outcome = PaymentService::record_partial(
        state.store.as_ref(),
        tenant_id,
        receivable_id,
        payment,
        state.clock.now(),
    )
    .await?;

    let message = if outcome.receivable.status == ReceivableStatus::Paid {
        "Payment recorded; receivable settled"
    } else {
        "Partial payment recorded"
    };

    Ok(Json(PartialPaymentResponse {
        message,
        payment_id: outcome.record.id,
        amount_paid: outcome.receivable.amount_paid,
        remaining: outcome.remaining,
        status: outcome.receivable.status,
    }))
}
