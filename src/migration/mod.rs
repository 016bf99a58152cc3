pub mod parser;
pub mod planner;
pub mod resolver;
pub mod runner;
pub mod status;
pub mod types;

pub use parser::{ParsedMigration, parse_statements};
pub use planner::plan;
pub use resolver::{parse_migration_filename, resolve};
pub use runner::{PlannedStep, migrate, plan_for};
pub use status::{MigrationState, MigrationStatus, StatusReport, status};
pub use types::{Direction, Migration, PlannedMigration, compare_ids, sort_migrations};
