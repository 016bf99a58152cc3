use clap::Args;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub migrations: Option<MigrationsInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: Database,
    pub migrations: Migrations,
}

// Database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub url: Option<String>,
    pub connect_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Database {
    /// Connection URL; commands that need a database fail when it is unset
    pub url: Option<String>,
    pub connect_retries: u32,
    pub retry_delay: Duration,
}

impl Database {
    pub fn require_url(&self) -> anyhow::Result<&str> {
        self.url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No database URL configured.\n\n\
                 Provide one of:\n\n\
                 • tidemark up --database-url postgres://host/db\n\
                 • export DATABASE_URL=postgres://host/db\n\
                 • Add 'database: {{ url: ... }}' to tidemark.yaml"
            )
        })
    }
}

// Migrations configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MigrationsInput {
    pub dir: Option<String>,
    pub tracking_table: Option<TrackingTableInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackingTableInput {
    pub schema: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Migrations {
    pub dir: String,
    pub tracking_table: TrackingTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingTable {
    pub schema: String,
    pub name: String,
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, help = "Database URL (falls back to DATABASE_URL)")]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MigrationsArgs {
    #[arg(long, help = "Migrations directory path")]
    pub migrations_dir: Option<String>,

    #[arg(long, help = "Schema of the version tracking table")]
    pub tracking_schema: Option<String>,

    #[arg(long, help = "Name of the version tracking table")]
    pub tracking_table: Option<String>,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            url: args.database_url,
            connect_retries: None,
            retry_delay_ms: None,
        }
    }
}

impl From<MigrationsArgs> for MigrationsInput {
    fn from(args: MigrationsArgs) -> Self {
        let tracking_table = if args.tracking_schema.is_some() || args.tracking_table.is_some() {
            Some(TrackingTableInput {
                schema: args.tracking_schema,
                name: args.tracking_table,
            })
        } else {
            None
        };

        Self {
            dir: args.migrations_dir,
            tracking_table,
        }
    }
}
