use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_up_without_database_url() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.init_project()?;

    helper
        .command()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database URL configured"));
    Ok(())
}

#[test]
fn test_status_without_database_url() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.init_project()?;

    helper
        .command()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database URL configured"));
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let helper = CliTestHelper::new();
    std::fs::write(
        helper.project_root.join("tidemark.yaml"),
        "migrations: [not, a, map",
    )?;

    helper
        .command()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_down_max_conflicts_with_all() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["down", "--max", "2", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
