use crate::config::types::Database;
use anyhow::{Context, Result, anyhow};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing::log::LevelFilter;

/// Mask password in database URL for display
pub fn mask_url_password(url: &str) -> String {
    let Some((protocol, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    // Only user:pass@host carries a password
    if let Some((user_info, host_and_path)) = rest.split_once('@')
        && let Some((username, _)) = user_info.split_once(':')
    {
        return format!("{}://{}:***@{}", protocol, username, host_and_path);
    }

    url.to_string()
}

/// Database connection retry policy
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay between connection attempts
    pub retry_delay: Duration,
}

impl From<&Database> for ConnectionConfig {
    fn from(database: &Database) -> Self {
        Self {
            max_retries: database.connect_retries,
            retry_delay: database.retry_delay,
        }
    }
}

/// Connect with retries, for databases that may still be starting up.
///
/// Slow statement logging is off: long-running migrations are expected and
/// sqlx would otherwise log their full SQL.
pub async fn connect_with_retry(url: &str, config: &ConnectionConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database URL {}", mask_url_password(url)))?
        .log_slow_statements(LevelFilter::Off, Duration::from_secs(0));

    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match PgPoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => {
                if attempt > 0 {
                    info!(
                        "Connected to {} (after {} retr{})",
                        mask_url_password(url),
                        attempt,
                        if attempt == 1 { "y" } else { "ies" }
                    );
                } else {
                    info!("Connected to {}", mask_url_password(url));
                }
                return Ok(pool);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < config.max_retries {
                    if attempt == 0 {
                        info!("Database not ready, retrying...");
                    }
                    tokio::time::sleep(config.retry_delay).await;
                }
            }
        }
    }

    let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
    Err(anyhow!(
        "Failed to connect to database at {} after {} attempt{}: {}",
        mask_url_password(url),
        config.max_retries + 1,
        if config.max_retries == 0 { "" } else { "s" },
        reason
    ))
}
