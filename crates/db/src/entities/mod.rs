//! `SeaORM` entities.

pub mod partial_payments;
pub mod processed_cnab_events;
pub mod receivables;
pub mod sea_orm_active_enums;
