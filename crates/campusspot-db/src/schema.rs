//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables use SCHEMAFULL mode. Descriptive spot fields are optional
//! because spots may be created from partial payloads. UUIDs live in the
//! record id; `review.spot_id` is a plain string with no link to `spot`.

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
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Spots
-- =======================================================================
DEFINE TABLE spot SCHEMAFULL;
DEFINE FIELD name ON TABLE spot TYPE option<string>;
DEFINE FIELD building ON TABLE spot TYPE option<string>;
DEFINE FIELD floor ON TABLE spot TYPE option<string>;
DEFINE FIELD has_outlet ON TABLE spot TYPE option<bool>;
DEFINE FIELD noise_level ON TABLE spot TYPE option<string> \
    ASSERT $value IN [NONE, 'quiet', 'moderate', 'noisy'];
DEFINE FIELD likes ON TABLE spot TYPE int DEFAULT 0;
DEFINE FIELD created_at ON TABLE spot TYPE datetime \
    DEFAULT time::now() READONLY;
DEFINE INDEX idx_spot_created_at ON TABLE spot COLUMNS created_at;

-- =======================================================================
-- Reviews (append-only)
-- =======================================================================
DEFINE TABLE review SCHEMAFULL;
DEFINE FIELD spot_id ON TABLE review TYPE string;
DEFINE FIELD rating ON TABLE review TYPE int;
DEFINE FIELD comment ON TABLE review TYPE string;
DEFINE FIELD created_at ON TABLE review TYPE datetime \
    DEFAULT time::now() READONLY;
DEFINE INDEX idx_review_spot_id ON TABLE review COLUMNS spot_id;
";

/// Apply all pending schema migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

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

        db.query("CREATE _migration SET version = $version, name = $name")
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

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
