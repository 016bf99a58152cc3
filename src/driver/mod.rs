pub mod function;
pub mod memory;
pub mod postgres;

pub use function::{FunctionDriver, FunctionSource, MigrationFn};
pub use memory::MemoryDriver;
pub use postgres::PostgresDriver;

use crate::migration::PlannedMigration;
use anyhow::Result;
use async_trait::async_trait;

/// A backend migrations are applied to.
///
/// The engine calls these sequentially on a single task. A driver owns its
/// version tracking storage and must create it if it doesn't exist yet.
#[async_trait]
pub trait Driver: Send {
    /// Ids of all migrations currently recorded as applied, in any order
    async fn versions(&mut self) -> Result<Vec<String>>;

    /// Execute the statements for `migration.direction` and record the new
    /// version state. Up adds the id to the applied set, down removes it.
    async fn migrate(&mut self, migration: &PlannedMigration<'_>) -> Result<()>;

    /// Release backend resources; calling it twice is not an error
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
impl<D: Driver + ?Sized> Driver for Box<D> {
    async fn versions(&mut self) -> Result<Vec<String>> {
        (**self).versions().await
    }

    async fn migrate(&mut self, migration: &PlannedMigration<'_>) -> Result<()> {
        (**self).migrate(migration).await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }
}
