//! Delinquency dashboard.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tesouraria_core::aging::{DelinquencyReport, DelinquencyService};
use tesouraria_core::receivable::ReceivableStore;
use tesouraria_shared::types::TenantId;

use crate::AppState;
use crate::error::ApiError;

/// Creates the delinquency routes.
pub fn routes<S: ReceivableStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/tenants/{tenant_id}/delinquency", get(delinquency_report::<S>))
}

/// GET /tenants/{tenant_id}/delinquency
async fn delinquency_report<S: ReceivableStore>(
    State(state): State<AppState<S>>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<DelinquencyReport>, ApiError> {
    let report =
        DelinquencyService::report(state.store.as_ref(), tenant_id, state.clock.as_ref()).await?;
    Ok(Json(report))
}
