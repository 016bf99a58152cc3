use super::Driver;
use crate::config::types::TrackingTable;
use crate::db::{ConnectionConfig, SqlErrorContext, connect_with_retry};
use crate::migration::PlannedMigration;
use crate::migration_tracking::{
    applied_versions, ensure_tracking_table_exists, format_tracking_table_name, record_version,
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use sqlx::{Executor, PgConnection, PgPool};
use tracing::debug;

/// Applies migrations to PostgreSQL and tracks versions in a table with a
/// single `version` column
pub struct PostgresDriver {
    pool: PgPool,
    table_name: String,
}

impl PostgresDriver {
    pub async fn connect(
        url: &str,
        connection: &ConnectionConfig,
        tracking_table: &TrackingTable,
    ) -> Result<Self> {
        let pool = connect_with_retry(url, connection).await?;
        Self::from_pool(pool, tracking_table).await
    }

    /// Use an existing pool; the tracking table is created if needed.
    ///
    /// The driver takes over the pool: `close()` shuts it down, and with it
    /// every clone the caller still holds.
    pub async fn from_pool(pool: PgPool, tracking_table: &TrackingTable) -> Result<Self> {
        let table_name = format_tracking_table_name(tracking_table)?;

        let mut conn = pool
            .acquire()
            .await
            .context("Failed to acquire a database connection")?;
        ensure_tracking_table_exists(&mut conn, tracking_table).await?;

        Ok(Self { pool, table_name })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl Driver for PostgresDriver {
    async fn versions(&mut self) -> Result<Vec<String>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire a database connection")?;

        applied_versions(&mut conn, &self.table_name).await
    }

    async fn migrate(&mut self, migration: &PlannedMigration<'_>) -> Result<()> {
        let body = migration.body();
        let statements = body.map(|b| b.statements.as_slice()).unwrap_or_default();

        if body.is_none_or(|b| b.use_transaction) {
            let mut tx = self
                .pool
                .begin()
                .await
                .with_context(|| format!("Failed to start transaction for {}", migration))?;

            execute_statements(&mut tx, migration, statements).await?;
            record_version(&mut tx, &self.table_name, migration.id(), migration.direction).await?;

            tx.commit()
                .await
                .with_context(|| format!("Failed to commit {}", migration))?;
        } else {
            debug!("Running {} without a transaction", migration);

            let mut conn = self
                .pool
                .acquire()
                .await
                .context("Failed to acquire a database connection")?;

            execute_statements(&mut conn, migration, statements).await?;
            record_version(&mut conn, &self.table_name, migration.id(), migration.direction)
                .await?;
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

// A single unit may hold several commands (e.g. a function body plus its grants)
async fn execute_statements(
    conn: &mut PgConnection,
    migration: &PlannedMigration<'_>,
    statements: &[String],
) -> Result<()> {
    for (index, statement) in statements.iter().enumerate() {
        debug!("{} statement {}: {}", migration, index + 1, statement);

        // No bind arguments, so sqlx sends it as a simple query
        Executor::execute(&mut *conn, statement.as_str())
            .await
            .map_err(|e| {
                let report = SqlErrorContext::from_sqlx_error(&e, statement).format(
                    &migration.to_string(),
                    index + 1,
                    statement,
                );
                anyhow!(report)
            })?;
    }

    Ok(())
}
