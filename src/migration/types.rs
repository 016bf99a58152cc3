use super::parser::ParsedMigration;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which way a migration is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved migration with its parsed bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub id: String,
    pub up: Option<ParsedMigration>,
    pub down: Option<ParsedMigration>,
}

impl Migration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            up: None,
            down: None,
        }
    }

    /// Body for the given direction, if the source provided one
    pub fn body(&self, direction: Direction) -> Option<&ParsedMigration> {
        match direction {
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    /// Whether this migration is ordered strictly before `other`
    pub fn less(&self, other: &Migration) -> bool {
        compare_ids(&self.id, &other.id).is_lt()
    }
}

/// A migration bound to the direction it should run in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMigration<'a> {
    pub migration: &'a Migration,
    pub direction: Direction,
}

impl<'a> PlannedMigration<'a> {
    pub fn new(migration: &'a Migration, direction: Direction) -> Self {
        Self {
            migration,
            direction,
        }
    }

    pub fn id(&self) -> &'a str {
        &self.migration.id
    }

    /// Statements to execute; `None` when no file exists for this direction
    pub fn body(&self) -> Option<&'a ParsedMigration> {
        self.migration.body(self.direction)
    }
}

impl fmt::Display for PlannedMigration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.migration.id, self.direction)
    }
}

/// Total order over migration IDs.
///
/// IDs that start with a run of decimal digits sort numerically and before
/// every ID without one. Equal numeric prefixes, and IDs without any, fall
/// back to byte-wise comparison of the whole ID.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (numeric_prefix(a), numeric_prefix(b)) {
        (Some(x), Some(y)) => compare_digit_runs(x, y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_prefix(id: &str) -> Option<&str> {
    let end = id
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(id.len());
    (end > 0).then(|| &id[..end])
}

// Compares digit runs by value without parsing, so runs wider than u64 still order correctly
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sort migrations in place using [`compare_ids`]
pub fn sort_migrations(migrations: &mut [Migration]) {
    migrations.sort_by(|a, b| compare_ids(&a.id, &b.id));
}
