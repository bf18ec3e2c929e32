//! Store-backed delinquency report.

use tesouraria_shared::types::TenantId;

use super::classifier::AgingClassifier;
use super::types::DelinquencyReport;
use crate::clock::Clock;
use crate::receivable::{ReceivableStore, StoreError};

/// Loads a tenant's open receivables and classifies them.
pub struct DelinquencyService;

impl DelinquencyService {
    /// Builds the report. `as_of` is read from the clock exactly once.
    pub async fn report<S: ReceivableStore>(
        store: &S,
        tenant_id: TenantId,
        clock: &dyn Clock,
    ) -> Result<DelinquencyReport, StoreError> {
        let as_of = clock.today();
        let open = store.list_open(tenant_id).await?;
        Ok(AgingClassifier::classify(&open, as_of))
    }
}
