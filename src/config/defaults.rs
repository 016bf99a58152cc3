use crate::config::types::*;
use crate::constants::{
    DEFAULT_CONNECT_RETRIES, DEFAULT_MIGRATIONS_DIR, DEFAULT_RETRY_DELAY, DEFAULT_TRACKING_SCHEMA,
    DEFAULT_TRACKING_TABLE,
};

impl Default for Database {
    fn default() -> Self {
        Self {
            url: None,
            connect_retries: DEFAULT_CONNECT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl Default for Migrations {
    fn default() -> Self {
        Self {
            dir: DEFAULT_MIGRATIONS_DIR.to_string(),
            tracking_table: TrackingTable::default(),
        }
    }
}

impl Default for TrackingTable {
    fn default() -> Self {
        Self {
            schema: DEFAULT_TRACKING_SCHEMA.to_string(),
            name: DEFAULT_TRACKING_TABLE.to_string(),
        }
    }
}
