use crate::migration::PlannedMigration;
use console::style;
use std::time::Duration;
use tracing::{error, info};

/// Receives progress events from a migration run.
///
/// `report` is the only capability an implementation must care about: every
/// event method defaults to formatting a one-line message and passing it to
/// `report`, which itself defaults to doing nothing.
pub trait Reporter: Send + Sync {
    fn report(&self, _message: &str) {}

    /// The full plan, before anything executes
    fn plan(&self, planned: &[PlannedMigration<'_>]) {
        self.report(&format!(
            "Planned {} migration{}",
            planned.len(),
            plural(planned.len())
        ));
    }

    /// `step` is 1-based
    fn start(&self, step: usize, total: usize, migration: &PlannedMigration<'_>) {
        self.report(&format!("[{}/{}] Running {}", step, total, migration));
    }

    fn complete(&self, migration: &PlannedMigration<'_>, duration: Duration) {
        self.report(&format!(
            "Finished {} in {}",
            migration,
            format_duration(duration)
        ));
    }

    fn fail(&self, migration: &PlannedMigration<'_>, error: &anyhow::Error) {
        self.report(&format!("Failed {}: {:#}", migration, error));
    }

    /// Called once after the whole plan succeeded
    fn summary(&self, applied: usize, duration: Duration) {
        self.report(&format!(
            "Applied {} migration{} in {}",
            applied,
            plural(applied),
            format_duration(duration)
        ));
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        info!("{}", message);
    }

    fn fail(&self, migration: &PlannedMigration<'_>, error: &anyhow::Error) {
        error!("Failed {}: {:#}", migration, error);
    }
}

/// Styled terminal output for the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }

    fn plan(&self, planned: &[PlannedMigration<'_>]) {
        if planned.is_empty() {
            println!("No migrations to run");
        } else {
            println!(
                "Running {} migration{}",
                planned.len(),
                plural(planned.len())
            );
        }
    }

    fn start(&self, step: usize, total: usize, migration: &PlannedMigration<'_>) {
        if self.verbose {
            println!("  [{}/{}] {}", step, total, migration);
        }
    }

    fn complete(&self, migration: &PlannedMigration<'_>, duration: Duration) {
        let statements = migration.body().map_or(0, |b| b.statements.len());
        println!(
            "  {} {} ({}, {} statement{})",
            style("✓").green(),
            migration,
            style(format_duration(duration)).dim(),
            statements,
            plural(statements)
        );
    }

    fn fail(&self, migration: &PlannedMigration<'_>, error: &anyhow::Error) {
        println!(
            "  {} {} failed: {}",
            style("✗").red(),
            migration,
            style(format!("{:#}", error)).red()
        );
    }

    fn summary(&self, applied: usize, duration: Duration) {
        if applied == 0 {
            return;
        }

        println!(
            "{} Applied {} migration{} in {}",
            style("✓").green(),
            applied,
            plural(applied),
            style(format_duration(duration)).green()
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let millis = d.subsec_millis();

    if total_secs == 0 {
        return format!("{}ms", millis);
    }

    if total_secs < 60 {
        return if millis >= 100 {
            format!("{}.{}s", total_secs, millis / 100)
        } else {
            format!("{}s", total_secs)
        };
    }

    let (major, minor, units) = if total_secs < 3600 {
        (total_secs / 60, total_secs % 60, ("m", "s"))
    } else {
        (total_secs / 3600, (total_secs % 3600) / 60, ("h", "m"))
    };

    if minor > 0 {
        format!("{}{}{}{}", major, units.0, minor, units.1)
    } else {
        format!("{}{}", major, units.0)
    }
}
