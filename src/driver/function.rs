//! Migrations written as Rust closures instead of SQL files.
//!
//! ```ignore
//! let mut source = FunctionSource::new();
//! source.add_migration("1_seed", Direction::Up, || seed_cache());
//! source.add_migration("1_seed", Direction::Down, || clear_cache());
//! let source = Arc::new(source);
//!
//! let mut driver = FunctionDriver::new(
//!     source.clone(),
//!     |id, direction| store.record(id, direction),
//!     || store.versions(),
//! );
//! migrate(&mut driver, &*source, Direction::Up, 0, &NullReporter).await?;
//! ```

use super::Driver;
use crate::migration::{Direction, PlannedMigration};
use crate::source::Source;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

pub type MigrationFn = Box<dyn Fn() -> Result<()> + Send + Sync>;
type UpdateVersionFn = Box<dyn FnMut(&str, Direction) -> Result<()> + Send>;
type AppliedVersionsFn = Box<dyn FnMut() -> Result<Vec<String>> + Send>;

const FUNCTION_FILE_EXTENSION: &str = "rs";

fn file_key(id: &str, direction: Direction) -> String {
    format!("{}.{}", id, direction)
}

/// Registry of closure migrations.
///
/// Each closure is listed as `{id}.{up|down}.rs` with an empty body, so the
/// resolver picks it up like any other migration file.
#[derive(Default)]
pub struct FunctionSource {
    migrations: BTreeMap<String, MigrationFn>,
}

impl FunctionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `migration` for `id` in one direction, replacing any previous one
    pub fn add_migration<F>(&mut self, id: &str, direction: Direction, migration: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.migrations
            .insert(file_key(id, direction), Box::new(migration));
    }

    fn get_migration(&self, id: &str, direction: Direction) -> Option<&MigrationFn> {
        self.migrations.get(&file_key(id, direction))
    }
}

impl Source for FunctionSource {
    fn list_migration_files(&self) -> Result<Vec<String>> {
        Ok(self
            .migrations
            .keys()
            .map(|key| format!("{}.{}", key, FUNCTION_FILE_EXTENSION))
            .collect())
    }

    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let exists = name
            .strip_suffix(FUNCTION_FILE_EXTENSION)
            .and_then(|key| key.strip_suffix('.'))
            .is_some_and(|key| self.migrations.contains_key(key));
        if !exists {
            bail!("Function migration {} does not exist", name);
        }

        Ok(Box::new(std::io::empty()))
    }
}

/// Driver that runs closures from a [`FunctionSource`] and delegates version
/// bookkeeping to the caller
pub struct FunctionDriver {
    source: Arc<FunctionSource>,
    update_version: UpdateVersionFn,
    applied: AppliedVersionsFn,
}

impl FunctionDriver {
    /// `update_version` is called after each successful closure with the
    /// migration id and the direction it ran in. `applied` lists the
    /// versions currently recorded.
    pub fn new<U, A>(source: Arc<FunctionSource>, update_version: U, applied: A) -> Self
    where
        U: FnMut(&str, Direction) -> Result<()> + Send + 'static,
        A: FnMut() -> Result<Vec<String>> + Send + 'static,
    {
        Self {
            source,
            update_version: Box::new(update_version),
            applied: Box::new(applied),
        }
    }
}

#[async_trait]
impl Driver for FunctionDriver {
    async fn versions(&mut self) -> Result<Vec<String>> {
        (self.applied)()
    }

    async fn migrate(&mut self, migration: &PlannedMigration<'_>) -> Result<()> {
        let id = migration.id();

        if let Some(function) = self.source.get_migration(id, migration.direction) {
            function().with_context(|| format!("Function migration {} failed", migration))?;
        }

        (self.update_version)(id, migration.direction)
            .with_context(|| format!("Failed to update version for {}", migration))
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
