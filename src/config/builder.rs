use crate::config::{merge::Merge, types::*};
use crate::constants::DATABASE_URL_ENV;
use anyhow::{Result, bail};
use std::time::Duration;

type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

pub struct ConfigBuilder {
    config_input: ConfigInput,
    env: EnvLookup,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
            env: process_env,
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    /// Replace how environment fallbacks are looked up
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            database: self.resolve_database(&defaults.database)?,
            migrations: self.resolve_migrations(&defaults.migrations)?,
        })
    }

    fn resolve_database(&self, defaults: &Database) -> Result<Database> {
        let db_input = self.config_input.database.as_ref();

        let url = db_input
            .and_then(|d| d.url.as_ref())
            .cloned()
            .or_else(|| (self.env)(DATABASE_URL_ENV))
            .or_else(|| defaults.url.clone());

        let retry_delay = db_input
            .and_then(|d| d.retry_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_delay);

        Ok(Database {
            url,
            connect_retries: db_input
                .and_then(|d| d.connect_retries)
                .unwrap_or(defaults.connect_retries),
            retry_delay,
        })
    }

    fn resolve_migrations(&self, defaults: &Migrations) -> Result<Migrations> {
        let mig_input = self.config_input.migrations.as_ref();

        let dir = mig_input
            .and_then(|m| m.dir.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.dir.clone());
        if dir.trim().is_empty() {
            bail!("migrations.dir cannot be empty");
        }

        let tracking_table = mig_input
            .and_then(|m| m.tracking_table.as_ref())
            .map(|t| TrackingTable {
                schema: t
                    .schema
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.tracking_table.schema.clone()),
                name: t
                    .name
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.tracking_table.name.clone()),
            })
            .unwrap_or_else(|| defaults.tracking_table.clone());

        Ok(Migrations {
            dir,
            tracking_table,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
