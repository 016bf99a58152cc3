use std::time::Duration;

// Directive lines embedded in migration bodies
pub const DIRECTIVE_PREFIX: &str = "-- +migration ";
pub const NO_TRANSACTION_DIRECTIVE: &str = "NoTransaction";
pub const BEGIN_STATEMENT_DIRECTIVE: &str = "BeginStatement";
pub const END_STATEMENT_DIRECTIVE: &str = "EndStatement";

// Migration file naming conventions
pub const MIGRATION_FILE_EXTENSION: &str = "sql";
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

// Environment fallback for the database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

// Configuration file name
pub const CONFIG_FILENAME: &str = "tidemark.yaml";

// Version bookkeeping defaults
pub const DEFAULT_TRACKING_SCHEMA: &str = "public";
pub const DEFAULT_TRACKING_TABLE: &str = "schema_migration";

// Connection retry defaults
pub const DEFAULT_CONNECT_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

