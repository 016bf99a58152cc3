//! SQL migrations for PostgreSQL, planned from versioned `{id}.up.sql` /
//! `{id}.down.sql` files.
//!
//! ```ignore
//! let source = DirectorySource::new("migrations");
//! let mut driver = PostgresDriver::connect(url, &ConnectionConfig::from(&config.database), &table).await?;
//! let applied = migrate(&mut driver, &source, Direction::Up, 0, &TracingReporter).await?;
//! ```

pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod driver;
pub mod error;
pub mod migration;
pub mod migration_tracking;
pub mod progress;
pub mod prompts;
pub mod source;

pub use driver::{Driver, FunctionDriver, FunctionSource, MemoryDriver, PostgresDriver};
pub use error::{Error, MigrateError, ParseError};
pub use migration::{
    Direction, Migration, ParsedMigration, PlannedMigration, migrate, plan, plan_for, resolve,
    status,
};
pub use progress::{ConsoleReporter, NullReporter, Reporter, TracingReporter};
pub use source::{DirectorySource, EmbeddedSource, MemorySource, Source};
