use super::common::{connect_driver, migrations_source};
use crate::config::Config;
use crate::driver::Driver;
use crate::migration::{MigrationState, StatusReport, status};
use anyhow::Result;
use clap::ValueEnum;
use console::style;
use std::path::Path;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFormat {
    /// Human-readable listing
    #[default]
    Human,
    /// JSON output for piping to jq
    Json,
}

pub async fn cmd_migrate_status(config: &Config, root_dir: &Path, format: StatusFormat) -> Result<()> {
    let source = migrations_source(config, root_dir);
    let mut driver = connect_driver(config).await?;

    let report = status(&mut driver, &source).await;
    driver.close().await?;
    let report = report?;

    match format {
        StatusFormat::Human => print!("{}", format_status_report(&report)),
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

pub fn format_status_report(report: &StatusReport) -> String {
    if report.migrations.is_empty() && report.orphaned.is_empty() {
        return "No migrations found\n".to_string();
    }

    let width = report
        .migrations
        .iter()
        .map(|m| m.id.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for migration in &report.migrations {
        let (marker, label) = match migration.state {
            MigrationState::Applied => (style("✓").green(), style("applied").green()),
            MigrationState::Pending => (style("○").dim(), style("pending").dim()),
            MigrationState::Skipped => (
                style("!").yellow(),
                style("skipped, applied on next run").yellow(),
            ),
        };
        let down = if migration.has_down { "" } else { " (no down)" };

        out.push_str(&format!(
            "  {} {:<width$}  {}{}\n",
            marker,
            migration.id,
            label,
            down,
            width = width
        ));
    }

    out.push_str(&format!(
        "\n{} applied, {} pending",
        report.count(MigrationState::Applied),
        report.count(MigrationState::Pending) + report.count(MigrationState::Skipped)
    ));
    if report.is_up_to_date() {
        out.push_str(", up to date");
    }
    out.push('\n');

    if !report.orphaned.is_empty() {
        out.push_str(&format!(
            "{} Applied versions without migration files: {}\n",
            style("⚠").yellow(),
            report.orphaned.join(", ")
        ));
    }

    out
}
