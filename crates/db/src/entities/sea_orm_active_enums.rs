//! Database enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tesouraria_core::receivable::ReceivableStatus as DomainStatus;

/// Receivable status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReceivableStatus {
    /// Nothing paid yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due.
    #[sea_orm(string_value = "overdue")]
    Overdue,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl ReceivableStatus {
    /// Statuses that still expect money.
    pub const OPEN: [Self; 3] = [Self::Pending, Self::Partial, Self::Overdue];
}

impl From<DomainStatus> for ReceivableStatus {
    fn from(status: DomainStatus) -> Self {
        match status {
            DomainStatus::Pending => Self::Pending,
            DomainStatus::Partial => Self::Partial,
            DomainStatus::Paid => Self::Paid,
            DomainStatus::Overdue => Self::Overdue,
            DomainStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ReceivableStatus> for DomainStatus {
    fn from(status: ReceivableStatus) -> Self {
        match status {
            ReceivableStatus::Pending => Self::Pending,
            ReceivableStatus::Partial => Self::Partial,
            ReceivableStatus::Paid => Self::Paid,
            ReceivableStatus::Overdue => Self::Overdue,
            ReceivableStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_round_trips() {
        for status in DomainStatus::ALL {
            assert_eq!(DomainStatus::from(ReceivableStatus::from(status)), status);
        }
    }

    #[test]
    fn test_open_matches_domain() {
        for status in DomainStatus::ALL {
            assert_eq!(
                ReceivableStatus::OPEN.contains(&ReceivableStatus::from(status)),
                status.is_open()
            );
        }
    }
}
