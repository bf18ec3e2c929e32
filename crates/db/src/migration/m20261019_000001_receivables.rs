//! Receivables migration.
//!
//! Creates receivables, their manual payment trail and the processed bank
//! event registry.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RECEIVABLES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS processed_cnab_events CASCADE;
             DROP TABLE IF EXISTS partial_payments CASCADE;
             DROP TABLE IF EXISTS receivables CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const RECEIVABLES_SQL: &str = r"
CREATE TABLE receivables (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    customer_id UUID NOT NULL,
    description TEXT NOT NULL,
    notes TEXT,
    amount NUMERIC(15, 2) NOT NULL,
    amount_paid NUMERIC(15, 2) NOT NULL DEFAULT 0,
    interest_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    discount_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    due_date DATE NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'pending',
    paid_at DATE,
    installment VARCHAR(16),
    reconciled_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_receivables_amount CHECK (amount >= 0),
    CONSTRAINT chk_receivables_paid CHECK (amount_paid >= 0 AND amount_paid <= amount),
    CONSTRAINT chk_receivables_adjustments CHECK (interest_amount >= 0 AND discount_amount >= 0),
    CONSTRAINT chk_receivables_status CHECK (
        status IN ('pending', 'partial', 'paid', 'overdue', 'cancelled')
    )
);

-- Open receivables per tenant, in creation order (matching and aging)
CREATE INDEX idx_receivables_tenant_status ON receivables(tenant_id, status, created_at, id);

-- Overdue scans
CREATE INDEX idx_receivables_tenant_due ON receivables(tenant_id, due_date);

CREATE TABLE partial_payments (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    receivable_id UUID NOT NULL REFERENCES receivables(id) ON DELETE CASCADE,
    amount NUMERIC(15, 2) NOT NULL,
    payment_date DATE NOT NULL,
    payment_method VARCHAR(50),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_partial_payments_amount CHECK (amount > 0)
);

CREATE INDEX idx_partial_payments_receivable ON partial_payments(receivable_id, created_at);

CREATE TABLE processed_cnab_events (
    tenant_id UUID NOT NULL,
    fingerprint CHAR(64) NOT NULL,
    receivable_id UUID NOT NULL REFERENCES receivables(id) ON DELETE CASCADE,
    processed_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (tenant_id, fingerprint)
);
";
