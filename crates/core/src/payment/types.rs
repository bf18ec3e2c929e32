//! Payment types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesouraria_shared::types::{PaymentRecordId, ReceivableId, TenantId};

use crate::receivable::Receivable;

/// A manual payment against one receivable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialPayment {
    /// Amount received, at cent precision.
    pub amount: Decimal,
    /// Date the money was received.
    pub payment_date: NaiveDate,
    /// Free-form method (pix, boleto, cash...).
    pub payment_method: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Persisted trace of a manual payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Record ID.
    pub id: PaymentRecordId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Paid receivable.
    pub receivable_id: ReceivableId,
    /// Amount received.
    pub amount: Decimal,
    /// Date the money was received.
    pub payment_date: NaiveDate,
    /// Payment method.
    pub payment_method: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Result of a manual partial payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialPaymentOutcome {
    /// Receivable after the payment.
    pub receivable: Receivable,
    /// The payment trace.
    pub record: PaymentRecord,
    /// Balance still owed.
    pub remaining: Decimal,
}

/// Everything one locked ledger update writes, committed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWrite {
    /// New receivable state.
    pub receivable: Receivable,
    /// Manual payment trace, if any.
    pub payment_record: Option<PaymentRecord>,
    /// Fingerprint of the bank event being applied, if any.
    pub event_fingerprint: Option<String>,
}

impl LedgerWrite {
    /// A write that only updates the receivable.
    #[must_use]
    pub fn receivable_only(receivable: Receivable) -> Self {
        Self {
            receivable,
            payment_record: None,
            event_fingerprint: None,
        }
    }
}
