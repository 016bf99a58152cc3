use super::planner::plan;
use super::resolver::resolve;
use super::types::{Direction, Migration};
use crate::driver::Driver;
use crate::error::{Error, MigrateError};
use crate::progress::Reporter;
use crate::source::Source;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// Resolve, plan and apply migrations in `direction`.
///
/// `max` limits how many migrations move in `direction` (0 means all);
/// migrations skipped behind the highest applied version are always
/// applied first. Returns how many migrations ran. On failure the error
/// carries the number that were applied before it; those stay applied.
///
/// The driver is closed only when the whole plan succeeds.
pub async fn migrate<D, S>(
    driver: &mut D,
    source: &S,
    direction: Direction,
    max: usize,
    reporter: &dyn Reporter,
) -> Result<usize, MigrateError>
where
    D: Driver + ?Sized,
    S: Source + ?Sized,
{
    let (migrations, applied) = load_state(driver, source).await?;

    let planned = plan(&migrations, &applied, direction, max);
    debug!(
        "Resolved {} migrations, {} applied, {} planned",
        migrations.len(),
        applied.len(),
        planned.len()
    );
    reporter.plan(&planned);

    let started = Instant::now();
    let mut count = 0;

    for (index, migration) in planned.iter().enumerate() {
        reporter.start(index + 1, planned.len(), migration);
        let step_started = Instant::now();

        if let Err(e) = driver.migrate(migration).await {
            reporter.fail(migration, &e);
            return Err(MigrateError::new(
                count,
                Error::Execution {
                    id: migration.id().to_string(),
                    direction: migration.direction,
                    source: e.into(),
                },
            ));
        }

        reporter.complete(migration, step_started.elapsed());
        count += 1;
    }

    driver
        .close()
        .await
        .map_err(|e| MigrateError::new(count, Error::Close(e.into())))?;

    reporter.summary(count, started.elapsed());
    Ok(count)
}

/// One step of a plan, detached from the resolved registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub id: String,
    pub direction: Direction,
    pub use_transaction: bool,
    /// Empty when the migration has no file for this direction
    pub statements: Vec<String>,
}

/// What [`migrate`] would do, without executing anything or closing the driver
pub async fn plan_for<D, S>(
    driver: &mut D,
    source: &S,
    direction: Direction,
    max: usize,
) -> Result<Vec<PlannedStep>, Error>
where
    D: Driver + ?Sized,
    S: Source + ?Sized,
{
    let (migrations, applied) = load_state(driver, source).await?;

    Ok(plan(&migrations, &applied, direction, max)
        .into_iter()
        .map(|planned| {
            let body = planned.body();
            PlannedStep {
                id: planned.id().to_string(),
                direction: planned.direction,
                use_transaction: body.is_none_or(|b| b.use_transaction),
                statements: body.map(|b| b.statements.clone()).unwrap_or_default(),
            }
        })
        .collect())
}

/// Resolve the registry and read applied versions in one go
pub(crate) async fn load_state<D, S>(
    driver: &mut D,
    source: &S,
) -> Result<(Vec<Migration>, Vec<String>), Error>
where
    D: Driver + ?Sized,
    S: Source + ?Sized,
{
    let migrations = resolve(source)?;
    let applied = driver.versions().await.map_err(|e| Error::Versions(e.into()))?;
    Ok((migrations, applied))
}
