use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_new_creates_empty_up_and_down_files() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.init_project()?;

    helper
        .command()
        .args(["new", "Add users table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stdout(predicate::str::contains("_add_users_table.up.sql"))
        .stdout(predicate::str::contains("_add_users_table.down.sql"));

    let files = helper.list_migration_files()?;
    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|f| f.ends_with("_add_users_table.up.sql")));
    assert!(files.iter().any(|f| f.ends_with("_add_users_table.down.sql")));

    let version = files[0].split('_').next().unwrap();
    assert!(version.chars().all(|c| c.is_ascii_digit()));

    for file in &files {
        assert_eq!(std::fs::read_to_string(helper.migrations_dir().join(file))?, "");
    }
    Ok(())
}

#[test]
fn test_new_respects_migrations_dir_flag() -> Result<()> {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["new", "init", "--migrations-dir", "db/changes"])
        .assert()
        .success();

    let created: Vec<_> = std::fs::read_dir(helper.project_root.join("db/changes"))?
        .collect::<std::io::Result<_>>()?;
    assert_eq!(created.len(), 2);
    assert!(!helper.migrations_dir().exists());
    Ok(())
}

#[test]
fn test_new_requires_description_when_not_interactive() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("new")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required when not running interactively"));
}

#[test]
fn test_new_rejects_description_without_words() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["new", "!!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value '!!!'"));
}
