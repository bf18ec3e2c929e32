//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for bank-file import, partial payments, installments and delinquency
//! - Mapping of domain errors to JSON error bodies
//!
//! Handlers are generic over the [`ReceivableStore`], so the same router runs
//! against Postgres in the server and against the in-memory store in tests.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tesouraria_core::Clock;
use tesouraria_core::receivable::ReceivableStore;
use tesouraria_core::reconciliation::ReconciliationService;
use tesouraria_shared::config::ImportConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<S> {
    /// Receivable persistence.
    pub store: Arc<S>,
    /// Time source, read once per request.
    pub clock: Arc<dyn Clock>,
    /// Bank return reconciler.
    pub reconciliation: Arc<ReconciliationService>,
    /// Upload limits.
    pub import: ImportConfig,
}

impl<S> AppState<S> {
    /// Creates the state with the default substring matcher.
    pub fn new(store: S, clock: Arc<dyn Clock>, import: ImportConfig) -> Self {
        Self {
            store: Arc::new(store),
            clock,
            reconciliation: Arc::new(ReconciliationService::new()),
            import,
        }
    }
}

// Manual impl: `S` itself does not need to be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            reconciliation: Arc::clone(&self.reconciliation),
            import: self.import.clone(),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: ReceivableStore + 'static,
{
    Router::new()
        .nest("/api/v1", routes::api_routes(&state.import))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
