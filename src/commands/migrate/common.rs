use crate::config::Config;
use crate::db::{ConnectionConfig, mask_url_password};
use crate::driver::PostgresDriver;
use crate::source::DirectorySource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Migrations directory, relative paths taken from the config file's directory
pub fn migrations_dir(config: &Config, root_dir: &Path) -> PathBuf {
    root_dir.join(&config.migrations.dir)
}

pub fn migrations_source(config: &Config, root_dir: &Path) -> DirectorySource {
    DirectorySource::new(migrations_dir(config, root_dir))
}

pub async fn connect_driver(config: &Config) -> Result<PostgresDriver> {
    let url = config.database.require_url()?;

    PostgresDriver::connect(
        url,
        &ConnectionConfig::from(&config.database),
        &config.migrations.tracking_table,
    )
    .await
    .with_context(|| format!("Failed to open migration driver for {}", mask_url_password(url)))
}
