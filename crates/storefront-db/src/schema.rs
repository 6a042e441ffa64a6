//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs and monetary amounts are stored as strings. Enums are stored
//! as strings with ASSERT constraints for validation. Per-tenant
//! uniqueness (product slug, variant SKU, customer email, stock
//! variant) is backed by composite unique indexes — the backstop for
//! the check-then-act existence queries in the domain services.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Brands (tenant-scoped)
-- =======================================================================
DEFINE TABLE brand SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE brand TYPE string;
DEFINE FIELD name ON TABLE brand TYPE string;
DEFINE FIELD description ON TABLE brand TYPE option<string>;
DEFINE FIELD created_at ON TABLE brand TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE brand TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_brand_tenant ON TABLE brand COLUMNS tenant_id;

-- =======================================================================
-- Categories (tenant-scoped, tree via parent_id)
-- =======================================================================
DEFINE TABLE category SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE category TYPE string;
DEFINE FIELD name ON TABLE category TYPE string;
DEFINE FIELD description ON TABLE category TYPE option<string>;
DEFINE FIELD parent_id ON TABLE category TYPE option<string>;
DEFINE FIELD created_at ON TABLE category TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE category TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_category_tenant ON TABLE category COLUMNS tenant_id;

-- =======================================================================
-- Products (tenant-scoped; slug unique per tenant)
-- =======================================================================
DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE product TYPE string;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD slug ON TABLE product TYPE string;
DEFINE FIELD description ON TABLE product TYPE option<string>;
DEFINE FIELD brand_id ON TABLE product TYPE option<string>;
DEFINE FIELD category_id ON TABLE product TYPE option<string>;
DEFINE FIELD tags ON TABLE product TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_product_tenant_slug ON TABLE product \
    COLUMNS tenant_id, slug UNIQUE;

-- =======================================================================
-- Product variants (tenant-scoped; SKU unique per tenant)
-- =======================================================================
DEFINE TABLE product_variant SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE product_variant TYPE string;
DEFINE FIELD product_id ON TABLE product_variant TYPE string;
DEFINE FIELD sku_code ON TABLE product_variant TYPE string;
DEFINE FIELD barcode ON TABLE product_variant TYPE option<string>;
DEFINE FIELD price ON TABLE product_variant TYPE string;
DEFINE FIELD promotional_price ON TABLE product_variant \
    TYPE option<string>;
DEFINE FIELD currency ON TABLE product_variant TYPE string;
DEFINE FIELD weight_kg ON TABLE product_variant TYPE option<float>;
DEFINE FIELD height_cm ON TABLE product_variant TYPE option<float>;
DEFINE FIELD width_cm ON TABLE product_variant TYPE option<float>;
DEFINE FIELD depth_cm ON TABLE product_variant TYPE option<float>;
DEFINE FIELD created_at ON TABLE product_variant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product_variant TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_variant_tenant_sku ON TABLE product_variant \
    COLUMNS tenant_id, sku_code UNIQUE;
DEFINE INDEX idx_variant_product ON TABLE product_variant \
    COLUMNS tenant_id, product_id;

-- =======================================================================
-- Carts (tenant-scoped; items embedded)
-- =======================================================================
DEFINE TABLE cart SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE cart TYPE string;
DEFINE FIELD customer_id ON TABLE cart TYPE option<string>;
DEFINE FIELD status ON TABLE cart TYPE string \
    ASSERT $value IN ['Active', 'Abandoned', 'Converted'];
DEFINE FIELD items ON TABLE cart TYPE array<object> FLEXIBLE DEFAULT [];
DEFINE FIELD created_at ON TABLE cart TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE cart TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_cart_tenant ON TABLE cart COLUMNS tenant_id;

-- =======================================================================
-- Orders (tenant-scoped; items embedded)
-- =======================================================================
DEFINE TABLE orders SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE orders TYPE string;
DEFINE FIELD cart_id ON TABLE orders TYPE string;
DEFINE FIELD customer_id ON TABLE orders TYPE string;
DEFINE FIELD status ON TABLE orders TYPE string \
    ASSERT $value IN ['Pending', 'Confirmed', 'Processing', 'Shipped', \
    'Delivered', 'Cancelled'];
DEFINE FIELD items ON TABLE orders TYPE array<object> FLEXIBLE DEFAULT [];
DEFINE FIELD total ON TABLE orders TYPE string;
DEFINE FIELD currency ON TABLE orders TYPE string;
DEFINE FIELD created_at ON TABLE orders TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE orders TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_order_tenant ON TABLE orders COLUMNS tenant_id;
DEFINE INDEX idx_order_tenant_status ON TABLE orders \
    COLUMNS tenant_id, status;

-- =======================================================================
-- Customers (tenant-scoped; email unique per tenant)
-- =======================================================================
DEFINE TABLE customer SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE customer TYPE string;
DEFINE FIELD name ON TABLE customer TYPE string;
DEFINE FIELD email ON TABLE customer TYPE string;
DEFINE FIELD password_hash ON TABLE customer TYPE string;
DEFINE FIELD status ON TABLE customer TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD created_at ON TABLE customer TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE customer TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_customer_tenant_email ON TABLE customer \
    COLUMNS tenant_id, email UNIQUE;

-- =======================================================================
-- Stock levels (tenant-scoped; one row per variant)
-- =======================================================================
DEFINE TABLE stock_level SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE stock_level TYPE string;
DEFINE FIELD variant_id ON TABLE stock_level TYPE string;
DEFINE FIELD quantity ON TABLE stock_level TYPE int;
DEFINE FIELD updated_at ON TABLE stock_level TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_stock_tenant_variant ON TABLE stock_level \
    COLUMNS tenant_id, variant_id UNIQUE;

-- =======================================================================
-- Outbox events (polled across tenants)
-- =======================================================================
DEFINE TABLE outbox_event SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE outbox_event TYPE string;
DEFINE FIELD event_type ON TABLE outbox_event TYPE string;
DEFINE FIELD payload ON TABLE outbox_event TYPE string;
DEFINE FIELD published ON TABLE outbox_event TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE outbox_event TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_outbox_published ON TABLE outbox_event \
    COLUMNS published;
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

/// Apply all pending migrations in ascending version order.
///
/// Idempotent: already-applied versions (tracked in the `_migration`
/// table) are skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_defines_every_aggregate_table() {
        for table in [
            "brand",
            "category",
            "product",
            "product_variant",
            "cart",
            "orders",
            "customer",
            "stock_level",
            "outbox_event",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} ")),
                "missing table definition: {table}"
            );
        }
    }
}
