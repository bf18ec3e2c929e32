//! Receivable domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesouraria_shared::types::{CustomerId, ReceivableId, TenantId};

/// Lifecycle status of a receivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceivableStatus {
    /// Nothing paid yet.
    Pending,
    /// Partially paid.
    Partial,
    /// Fully settled.
    Paid,
    /// Past due, flagged by the billing flows.
    Overdue,
    /// Cancelled, never collected.
    Cancelled,
}

impl ReceivableStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Partial,
        Self::Paid,
        Self::Overdue,
        Self::Cancelled,
    ];

    /// Returns true if the receivable still expects money.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Partial | Self::Overdue)
    }

    /// Returns true if the receivable counts as delinquent once its due date passes.
    ///
    /// Partially paid receivables are excluded from the overdue set.
    #[must_use]
    pub const fn is_delinquent_candidate(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }

    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceivableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown receivable status: {s}"))
    }
}

/// An amount owed to a tenant by one of its customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivable {
    /// Receivable ID.
    pub id: ReceivableId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Debtor.
    pub customer_id: CustomerId,
    /// Text shown to users.
    pub description: String,
    /// Free text; bank identifiers are matched against it.
    pub notes: Option<String>,
    /// Face value.
    pub amount: Decimal,
    /// Amount received so far, never above `amount`.
    pub amount_paid: Decimal,
    /// Interest and surplus reported by the bank.
    pub interest_amount: Decimal,
    /// Discounts and shortfalls confirmed by the bank.
    pub discount_amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Current status.
    pub status: ReceivableStatus,
    /// Settlement date, set when the receivable becomes paid.
    pub paid_at: Option<NaiveDate>,
    /// Installment label (`i/n`) for receivables created from a plan.
    pub installment: Option<String>,
    /// Last bank-file reconciliation.
    pub reconciled_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Receivable {
    /// Creates a pending receivable from a draft.
    #[must_use]
    pub fn from_draft(tenant_id: TenantId, draft: NewReceivable, now: DateTime<Utc>) -> Self {
        Self {
            id: ReceivableId::new(),
            tenant_id,
            customer_id: draft.customer_id,
            description: draft.description,
            notes: draft.notes,
            amount: draft.amount,
            amount_paid: Decimal::ZERO,
            interest_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            due_date: draft.due_date,
            status: ReceivableStatus::Pending,
            paid_at: None,
            installment: draft.installment,
            reconciled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Text bank reference tokens are searched in. Empty when there are no notes.
    #[must_use]
    pub fn matching_text(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Outstanding balance.
    ///
    /// A paid receivable owes nothing, even when the bank settled it below face
    /// value: that shortfall is already booked in `discount_amount`.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        if self.status == ReceivableStatus::Paid {
            return Decimal::ZERO;
        }
        (self.amount - self.amount_paid).max(Decimal::ZERO)
    }

    /// Returns true if the receivable still expects money.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Input for creating a receivable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReceivable {
    /// Debtor.
    pub customer_id: CustomerId,
    /// Text shown to users.
    pub description: String,
    /// Free text used for bank matching.
    pub notes: Option<String>,
    /// Face value.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Installment label (`i/n`).
    pub installment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft(notes: Option<&str>) -> NewReceivable {
        NewReceivable {
            customer_id: CustomerId::new(),
            description: "Service order 42".to_string(),
            notes: notes.map(str::to_string),
            amount: dec!(500.00),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            installment: None,
        }
    }

    #[rstest]
    #[case(ReceivableStatus::Pending, true, true)]
    #[case(ReceivableStatus::Partial, true, false)]
    #[case(ReceivableStatus::Overdue, true, true)]
    #[case(ReceivableStatus::Paid, false, false)]
    #[case(ReceivableStatus::Cancelled, false, false)]
    fn test_status_classification(
        #[case] status: ReceivableStatus,
        #[case] open: bool,
        #[case] delinquent: bool,
    ) {
        assert_eq!(status.is_open(), open);
        assert_eq!(status.is_delinquent_candidate(), delinquent);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ReceivableStatus::ALL {
            assert_eq!(status.as_str().parse::<ReceivableStatus>(), Ok(status));
        }
        assert!("settled".parse::<ReceivableStatus>().is_err());
    }

    #[test]
    fn test_from_draft_starts_pending() {
        let now = Utc::now();
        let receivable = Receivable::from_draft(TenantId::new(), draft(Some("NN 123")), now);

        assert_eq!(receivable.status, ReceivableStatus::Pending);
        assert_eq!(receivable.amount_paid, Decimal::ZERO);
        assert_eq!(receivable.remaining(), dec!(500.00));
        assert_eq!(receivable.created_at, now);
        assert_eq!(receivable.matching_text(), "NN 123");
    }

    #[test]
    fn test_paid_receivable_owes_nothing() {
        let mut receivable = Receivable::from_draft(TenantId::new(), draft(None), Utc::now());
        receivable.amount_paid = dec!(475.00);
        receivable.discount_amount = dec!(25.00);
        receivable.status = ReceivableStatus::Paid;

        assert_eq!(receivable.remaining(), Decimal::ZERO);
    }

    #[test]
    fn test_matching_text_empty_without_notes() {
        let receivable = Receivable::from_draft(TenantId::new(), draft(None), Utc::now());
        assert_eq!(receivable.matching_text(), "");
    }
}
