use super::Driver;
use crate::migration::{Direction, PlannedMigration};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashSet;

/// Driver that keeps its applied set in memory and records what it executed
#[derive(Debug, Default)]
pub struct MemoryDriver {
    applied: Vec<String>,
    executed: Vec<String>,
    migrations: Vec<(String, Direction)>,
    fail_on: HashSet<(String, Direction)>,
    closed: usize,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given versions already applied
    pub fn with_applied<I, V>(applied: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            applied: applied.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make `migrate` fail for this id in the given direction
    pub fn fail_on(mut self, id: impl Into<String>, direction: Direction) -> Self {
        self.fail_on.insert((id.into(), direction));
        self
    }

    /// Applied versions in the order they were recorded
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Every statement executed so far, in order
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Every successful `migrate` call, in order
    pub fn migrations(&self) -> &[(String, Direction)] {
        &self.migrations
    }

    /// How many times `close` was called
    pub fn close_count(&self) -> usize {
        self.closed
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn versions(&mut self) -> Result<Vec<String>> {
        Ok(self.applied.clone())
    }

    async fn migrate(&mut self, migration: &PlannedMigration<'_>) -> Result<()> {
        let id = migration.id();

        if self
            .fail_on
            .contains(&(id.to_string(), migration.direction))
        {
            bail!("simulated failure for {}", migration);
        }

        if let Some(body) = migration.body() {
            self.executed.extend(body.statements.iter().cloned());
        }

        match migration.direction {
            Direction::Up => {
                if !self.applied.iter().any(|v| v == id) {
                    self.applied.push(id.to_string());
                }
            }
            Direction::Down => self.applied.retain(|v| v != id),
        }

        self.migrations
            .push((id.to_string(), migration.direction));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}
