//! Error types surfaced by the migration engine.
//!
//! Collaborators (sources, drivers) report failures as `anyhow::Error`; the
//! engine wraps them into [`Error`] so callers can tell which stage failed.

use crate::migration::Direction;
use std::fmt;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A directive used where the statement grammar does not allow it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(
        "'-- +migration NoTransaction' at line {line} must come before any statements in the migration"
    )]
    MisplacedNoTransaction { line: usize },

    #[error("'-- +migration NoTransaction' at line {line} is not allowed inside a statement block")]
    NoTransactionInsideBlock { line: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to list migration files")]
    SourceList(#[source] BoxError),

    #[error("failed to read migration file {file}")]
    SourceRead {
        file: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to parse migration file {file}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("migration {id} has more than one {direction} file: {first} and {second}")]
    DuplicateMigration {
        id: String,
        direction: Direction,
        first: String,
        second: String,
    },

    #[error("failed to read applied migration versions")]
    Versions(#[source] BoxError),

    #[error("error while running migration {id} ({direction})")]
    Execution {
        id: String,
        direction: Direction,
        #[source]
        source: BoxError,
    },

    #[error("failed to close migration driver")]
    Close(#[source] BoxError),
}

/// Failure of a migration run, with the number of migrations that were
/// applied (and committed) before it happened
#[derive(Debug)]
pub struct MigrateError {
    pub applied: usize,
    pub kind: Error,
}

impl MigrateError {
    pub fn new(applied: usize, kind: Error) -> Self {
        Self { applied, kind }
    }
}

impl From<Error> for MigrateError {
    fn from(kind: Error) -> Self {
        Self::new(0, kind)
    }
}

impl fmt::Display for MigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.applied > 0 {
            write!(
                f,
                " ({} migration{} applied before the failure)",
                self.applied,
                if self.applied == 1 { "" } else { "s" }
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for MigrateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
