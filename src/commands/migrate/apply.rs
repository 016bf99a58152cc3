use super::common::{connect_driver, migrations_source};
use crate::config::Config;
use crate::driver::Driver;
use crate::migration::{Direction, PlannedStep, migrate, plan_for};
use crate::progress::ConsoleReporter;
use crate::prompts::{is_interactive, prompt_confirm};
use crate::source::DirectorySource;
use anyhow::{Result, bail};
use console::style;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub direction: Direction,
    /// 0 runs every candidate
    pub max: usize,
    pub dry_run: bool,
    /// Skip the confirmation before reverting
    pub assume_yes: bool,
    pub verbose: bool,
}

pub async fn cmd_migrate(config: &Config, root_dir: &Path, options: &MigrateOptions) -> Result<()> {
    let source = migrations_source(config, root_dir);
    let mut driver = connect_driver(config).await?;
    debug!("Reading migrations from {}", source.dir().display());

    let result = run(&mut driver, &source, options).await;
    if result.is_err() {
        driver.close().await.ok();
    }
    result
}

async fn run<D: Driver>(
    driver: &mut D,
    source: &DirectorySource,
    options: &MigrateOptions,
) -> Result<()> {
    if options.dry_run {
        let steps = plan_for(driver, source, options.direction, options.max).await?;
        driver.close().await?;
        print!("{}", format_plan(&steps, options.verbose));
        return Ok(());
    }

    if options.direction == Direction::Down && !options.assume_yes {
        let steps = plan_for(driver, source, options.direction, options.max).await?;
        let reverts = steps
            .iter()
            .filter(|s| s.direction == Direction::Down)
            .count();

        if reverts > 0 {
            print!("{}", format_plan(&steps, false));

            if !is_interactive() {
                bail!(
                    "Refusing to revert {} migration{} without confirmation. Re-run with --yes to proceed.",
                    reverts,
                    if reverts == 1 { "" } else { "s" }
                );
            }

            let prompt = format!(
                "Revert {} migration{}?",
                reverts,
                if reverts == 1 { "" } else { "s" }
            );
            if !prompt_confirm(&prompt, false)? {
                println!("Aborted, nothing was changed");
                driver.close().await?;
                return Ok(());
            }
        }
    }

    let reporter = ConsoleReporter::new(options.verbose);
    migrate(driver, source, options.direction, options.max, &reporter).await?;

    Ok(())
}

/// Human readable listing of a plan, as shown for `--dry-run`
pub fn format_plan(steps: &[PlannedStep], show_statements: bool) -> String {
    if steps.is_empty() {
        return "No migrations to run\n".to_string();
    }

    let mut out = format!(
        "Would run {} migration{}:\n",
        steps.len(),
        if steps.len() == 1 { "" } else { "s" }
    );

    for step in steps {
        let arrow = match step.direction {
            Direction::Up => style("↑").green(),
            Direction::Down => style("↓").yellow(),
        };
        let mode = if step.use_transaction {
            ""
        } else {
            ", no transaction"
        };

        out.push_str(&format!(
            "  {} {} ({}) {} statement{}{}\n",
            arrow,
            step.id,
            step.direction,
            step.statements.len(),
            if step.statements.len() == 1 { "" } else { "s" },
            mode
        ));

        if show_statements {
            for statement in &step.statements {
                for line in statement.lines() {
                    out.push_str(&format!("      {}\n", style(line).dim()));
                }
            }
        }
    }

    out
}
