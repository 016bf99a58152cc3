use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            database: match (self.database, other.database) {
                (Some(a), Some(b)) => Some(a.merge_with(b)),
                (a, b) => b.or(a),
            },
            migrations: match (self.migrations, other.migrations) {
                (Some(a), Some(b)) => Some(a.merge_with(b)),
                (a, b) => b.or(a),
            },
        }
    }
}

// Field-wise merges: a value set in `other` wins
impl DatabaseInput {
    pub fn merge_with(self, other: DatabaseInput) -> DatabaseInput {
        DatabaseInput {
            url: self.url.merge(other.url),
            connect_retries: self.connect_retries.merge(other.connect_retries),
            retry_delay_ms: self.retry_delay_ms.merge(other.retry_delay_ms),
        }
    }
}

impl MigrationsInput {
    pub fn merge_with(self, other: MigrationsInput) -> MigrationsInput {
        MigrationsInput {
            dir: self.dir.merge(other.dir),
            tracking_table: match (self.tracking_table, other.tracking_table) {
                (Some(a), Some(b)) => Some(TrackingTableInput {
                    schema: a.schema.merge(b.schema),
                    name: a.name.merge(b.name),
                }),
                (a, b) => b.or(a),
            },
        }
    }
}
