//! `SeaORM` Entity for receivables table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReceivableStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receivables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub customer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount_paid: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub interest_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub discount_amount: Decimal,
    pub due_date: Date,
    pub status: ReceivableStatus,
    pub paid_at: Option<Date>,
    pub installment: Option<String>,
    pub reconciled_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::partial_payments::Entity")]
    PartialPayments,
}

impl Related<super::partial_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartialPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
