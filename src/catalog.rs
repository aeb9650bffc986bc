//! Table-name discovery for the active schema.
//!
//! A GET without `modelName` answers with the raw catalog listing so a
//! caller can enumerate available tables without prior schema knowledge.
//! The query is backend-specific but the result shape is not: one
//! `table_name` column, sorted.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};

/// List the table names of the primary schema.
///
/// Postgres and MySQL go through `information_schema.tables` restricted to
/// the active schema; SQLite reads `sqlite_master` and hides its internal
/// `sqlite_*` bookkeeping tables.
///
/// # Errors
///
/// Returns a `DbErr` if the catalog query fails.
pub async fn table_names(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Postgres => {
            "SELECT table_name \
             FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
             ORDER BY table_name"
        }
        DatabaseBackend::MySql => {
            "SELECT TABLE_NAME AS table_name \
             FROM information_schema.tables \
             WHERE TABLE_SCHEMA = DATABASE() \
             ORDER BY TABLE_NAME"
        }
        DatabaseBackend::Sqlite => {
            "SELECT name AS table_name \
             FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name"
        }
    };

    let rows = db
        .query_all(Statement::from_string(backend, sql.to_string()))
        .await?;

    rows.iter().map(|row| row.try_get("", "table_name")).collect()
}
