pub mod migrate;

// Re-export all command functions
pub use migrate::{
    MigrateOptions, StatusFormat, cmd_migrate, cmd_migrate_new, cmd_migrate_status,
};
