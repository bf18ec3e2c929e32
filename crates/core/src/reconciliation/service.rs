//! Batch import of bank return files.

use chrono::{DateTime, Utc};
use tesouraria_shared::types::TenantId;

use super::error::{ImportError, LineError};
use super::matcher::{MatchStrategy, SubstringMatch};
use super::types::{ImportDirection, ImportRequest, ImportSummary};
use crate::cnab::{CnabLayout, CnabParser, PaymentEvent, RecordSegment};
use crate::payment::{PaymentError, PaymentService};
use crate::receivable::{Receivable, ReceivableStore, StoreError};

/// Reconciles bank return files against open receivables.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationService<M = SubstringMatch> {
    strategy: M,
}

impl ReconciliationService {
    /// Creates a service using substring matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: MatchStrategy> ReconciliationService<M> {
    /// Creates a service with a custom matching strategy.
    pub fn with_strategy(strategy: M) -> Self {
        Self { strategy }
    }

    /// Imports one file.
    ///
    /// Lines are processed in order. A CNAB240 segment T waits for the segment U
    /// that follows it; a T without U is reconciled on its own. Open receivables
    /// are reloaded for every event so earlier lines of the same file are visible.
    pub async fn import<S: ReceivableStore>(
        &self,
        store: &S,
        tenant_id: TenantId,
        request: &ImportRequest,
        now: DateTime<Utc>,
    ) -> Result<ImportSummary, ImportError> {
        let first_line = request
            .content
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or(ImportError::EmptyFile)?;

        let layout = match request.layout {
            Some(layout) => layout,
            None => CnabLayout::detect(first_line, request.filename.as_deref())
                .ok_or(ImportError::UndetectableLayout)?,
        };

        let mut summary = ImportSummary {
            layout: Some(layout),
            ..ImportSummary::default()
        };

        if request.direction == ImportDirection::Remessa {
            tracing::info!(tenant_id = %tenant_id, %layout, "Remessa file accepted without processing");
            return Ok(summary);
        }

        let mut pending_t: Option<(usize, PaymentEvent)> = None;

        for (index, raw) in request.content.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let event = match CnabParser::decode(raw, layout) {
                Ok(event) => event,
                Err(reason) if reason.is_malformed() => {
                    tracing::warn!(line, %reason, "Malformed CNAB detail record");
                    summary
                        .errors
                        .push(LineError::Malformed { line, reason }.to_string());
                    continue;
                }
                Err(reason) => {
                    tracing::debug!(line, %reason, "Skipping CNAB line");
                    summary.skipped += 1;
                    continue;
                }
            };

            match event.segment {
                RecordSegment::T => {
                    if let Some((t_line, t_event)) = pending_t.replace((line, event)) {
                        self.reconcile(store, tenant_id, t_line, t_event, now, &mut summary)
                            .await;
                    }
                }
                RecordSegment::U => {
                    let (event_line, merged) = match pending_t.take() {
                        Some((t_line, t_event)) => (t_line, t_event.with_segment_u(event)),
                        None => (line, event),
                    };
                    self.reconcile(store, tenant_id, event_line, merged, now, &mut summary)
                        .await;
                }
                RecordSegment::Detail => {
                    self.reconcile(store, tenant_id, line, event, now, &mut summary)
                        .await;
                }
            }
        }

        if let Some((t_line, t_event)) = pending_t.take() {
            self.reconcile(store, tenant_id, t_line, t_event, now, &mut summary)
                .await;
        }

        tracing::info!(
            tenant_id = %tenant_id,
            %layout,
            processed = summary.processed,
            matched = summary.matched,
            applied = summary.applied,
            duplicates = summary.duplicates,
            errors = summary.errors.len(),
            "CNAB import finished"
        );

        Ok(summary)
    }

    async fn reconcile<S: ReceivableStore>(
        &self,
        store: &S,
        tenant_id: TenantId,
        line: usize,
        event: PaymentEvent,
        now: DateTime<Utc>,
        summary: &mut ImportSummary,
    ) {
        summary.processed += 1;

        let candidates = match unprocessed_candidates(store, tenant_id, &event.fingerprint).await {
            Ok(Some(candidates)) => candidates,
            Ok(None) => {
                tracing::debug!(line, "Bank event already processed");
                summary.duplicates += 1;
                return;
            }
            Err(err) => {
                tracing::error!(line, error = %err, "Failed to load receivables");
                summary.errors.push(LineError::Persistence { line }.to_string());
                return;
            }
        };

        let Some(target) = self.strategy.find(&event, &candidates) else {
            tracing::info!(
                line,
                reference_1 = %event.reference_token_1,
                reference_2 = %event.reference_token_2,
                "No open receivable matches bank event"
            );
            summary.unmatched += 1;
            return;
        };
        summary.matched += 1;

        if !event.is_settlement() {
            tracing::debug!(line, receivable_id = %target.id, outcome = ?event.outcome, "Bank event is not a settlement");
            summary.ignored += 1;
            return;
        }

        match PaymentService::apply_reconciled(store, tenant_id, target.id, event, now).await {
            Ok(_) => summary.applied += 1,
            Err(PaymentError::AlreadyProcessed) => summary.duplicates += 1,
            Err(PaymentError::Persistence(_)) => {
                summary.errors.push(LineError::Persistence { line }.to_string());
            }
            Err(reason) => {
                summary
                    .errors
                    .push(LineError::Rejected { line, reason }.to_string());
            }
        }
    }
}

/// Open receivables, or `None` when the event was already applied.
async fn unprocessed_candidates<S: ReceivableStore>(
    store: &S,
    tenant_id: TenantId,
    fingerprint: &str,
) -> Result<Option<Vec<Receivable>>, StoreError> {
    if store.is_event_processed(tenant_id, fingerprint).await? {
        return Ok(None);
    }
    store.list_open(tenant_id).await.map(Some)
}
