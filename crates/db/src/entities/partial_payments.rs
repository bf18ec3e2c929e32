//! `SeaORM` Entity for partial_payments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partial_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub receivable_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub payment_date: Date,
    pub payment_method: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receivables::Entity",
        from = "Column::ReceivableId",
        to = "super::receivables::Column::Id",
        on_delete = "Cascade"
    )]
    Receivables,
}

impl Related<super::receivables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receivables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
