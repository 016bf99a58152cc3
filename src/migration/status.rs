use super::runner::load_state;
use super::types::{Migration, compare_ids};
use crate::driver::Driver;
use crate::error::Error;
use crate::source::Source;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationState {
    Applied,
    Pending,
    /// Not applied but ordered before the highest applied version; the
    /// next run applies it regardless of direction
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub id: String,
    pub state: MigrationState,
    pub has_up: bool,
    pub has_down: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Every known migration, in run order
    pub migrations: Vec<MigrationStatus>,
    /// Applied versions with no matching migration files
    pub orphaned: Vec<String>,
}

impl StatusReport {
    pub fn new(migrations: &[Migration], applied: &[String]) -> Self {
        let applied_set: HashSet<&str> = applied.iter().map(String::as_str).collect();
        let high_water_mark = applied_set.iter().copied().max_by(|a, b| compare_ids(a, b));

        let statuses = migrations
            .iter()
            .map(|m| {
                let state = if applied_set.contains(m.id.as_str()) {
                    MigrationState::Applied
                } else if high_water_mark.is_some_and(|mark| compare_ids(&m.id, mark).is_lt()) {
                    MigrationState::Skipped
                } else {
                    MigrationState::Pending
                };

                MigrationStatus {
                    id: m.id.clone(),
                    state,
                    has_up: m.up.is_some(),
                    has_down: m.down.is_some(),
                }
            })
            .collect();

        let known: HashSet<&str> = migrations.iter().map(|m| m.id.as_str()).collect();
        let mut orphaned: Vec<String> = applied_set
            .into_iter()
            .filter(|id| !known.contains(id))
            .map(str::to_string)
            .collect();
        orphaned.sort_by(|a, b| compare_ids(a, b));

        Self {
            migrations: statuses,
            orphaned,
        }
    }

    pub fn count(&self, state: MigrationState) -> usize {
        self.migrations.iter().filter(|m| m.state == state).count()
    }

    /// Whether an up run with no limit would do anything
    pub fn is_up_to_date(&self) -> bool {
        self.migrations
            .iter()
            .all(|m| m.state == MigrationState::Applied)
    }
}

/// Compare the source's migrations with the versions the driver recorded.
///
/// Read only; the driver is left open.
pub async fn status<D, S>(driver: &mut D, source: &S) -> Result<StatusReport, Error>
where
    D: Driver + ?Sized,
    S: Source + ?Sized,
{
    let (migrations, applied) = load_state(driver, source).await?;
    Ok(StatusReport::new(&migrations, &applied))
}
