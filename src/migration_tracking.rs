use crate::config::types::TrackingTable;
use crate::migration::Direction;
use anyhow::{Context, Result, bail};
use sqlx::PgConnection;

/// Safely format a schema-qualified table name for SQL queries
///
/// Only plain identifiers are accepted, so the quoted result can be
/// interpolated into statements.
pub fn format_tracking_table_name(tracking_table: &TrackingTable) -> Result<String> {
    // Letters, digits, underscore and dollar sign; no leading digit or dollar
    fn is_valid_sql_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {}
            _ => return false,
        }

        chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    }

    if !is_valid_sql_identifier(&tracking_table.schema) {
        bail!(
            "Invalid tracking table schema '{}': must contain only letters, numbers, underscores, and dollar signs, starting with letter or underscore",
            tracking_table.schema
        );
    }

    if !is_valid_sql_identifier(&tracking_table.name) {
        bail!(
            "Invalid tracking table name '{}': must contain only letters, numbers, underscores, and dollar signs, starting with letter or underscore",
            tracking_table.name
        );
    }

    Ok(format!(
        r#""{}"."{}""#,
        tracking_table.schema, tracking_table.name
    ))
}

/// Create the version tracking table (and its schema) if missing
pub async fn ensure_tracking_table_exists(
    conn: &mut PgConnection,
    tracking_table: &TrackingTable,
) -> Result<()> {
    let table_name = format_tracking_table_name(tracking_table)?;

    sqlx::query(&format!(
        r#"CREATE SCHEMA IF NOT EXISTS "{}""#,
        tracking_table.schema
    ))
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to create schema {}", tracking_table.schema))?;

    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {} (version VARCHAR(255) NOT NULL PRIMARY KEY)",
        table_name
    ))
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to create tracking table {}", table_name))?;

    Ok(())
}

/// Every version currently recorded, in no particular order
pub async fn applied_versions(conn: &mut PgConnection, table_name: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(&format!("SELECT version FROM {}", table_name))
        .fetch_all(conn)
        .await
        .with_context(|| format!("Failed to read applied versions from {}", table_name))
}

/// Record that `version` ran in `direction`: up inserts it, down deletes it
pub async fn record_version(
    conn: &mut PgConnection,
    table_name: &str,
    version: &str,
    direction: Direction,
) -> Result<()> {
    let sql = match direction {
        Direction::Up => format!("INSERT INTO {} (version) VALUES ($1)", table_name),
        Direction::Down => format!("DELETE FROM {} WHERE version = $1", table_name),
    };

    sqlx::query(&sql)
        .bind(version)
        .execute(conn)
        .await
        .with_context(|| {
            format!(
                "Failed to record version {} ({}) in {}",
                version, direction, table_name
            )
        })?;

    Ok(())
}
