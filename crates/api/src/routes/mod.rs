//! API route definitions.

use axum::Router;
use tesouraria_core::receivable::ReceivableStore;
use tesouraria_shared::config::ImportConfig;

use crate::AppState;

pub mod cnab;
pub mod delinquency;
pub mod health;
pub mod installments;
pub mod receivables;

/// Creates the API router with all routes.
///
/// Tenant resolution happens upstream; every business route carries the
/// tenant in its path.
pub fn api_routes<S>(import: &ImportConfig) -> Router<AppState<S>>
where
    S: ReceivableStore + 'static,
{
    Router::new()
        .merge(health::routes())
        .merge(cnab::routes(import))
        .merge(receivables::routes())
        .merge(installments::routes())
        .merge(delinquency::routes())
}
