use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use tidemark::error::Error;
use tidemark::migration::{Direction, parse_migration_filename, resolve};
use tidemark::{DirectorySource, EmbeddedSource, MemorySource};

#[test]
fn test_directory_source_resolves_up_and_down_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();

    fs::write(dir.join("10_posts.up.sql"), "CREATE TABLE posts (id INT);")?;
    fs::write(dir.join("2_users.up.sql"), "CREATE TABLE users (id INT);")?;
    fs::write(dir.join("2_users.down.sql"), "DROP TABLE users;")?;
    fs::write(dir.join("README.md"), "not a migration")?;
    fs::create_dir(dir.join("3_nested.up.sql"))?;

    let migrations = resolve(&DirectorySource::new(dir))?;

    let ids: Vec<&str> = migrations.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["2_users", "10_posts"]);
    assert!(migrations[0].down.is_some());
    assert!(migrations[1].down.is_none());
    assert_eq!(
        migrations[1].up.as_ref().map(|b| b.statements.clone()),
        Some(vec!["CREATE TABLE posts (id INT);".to_string()])
    );
    Ok(())
}

#[test]
fn test_missing_directory_is_a_source_error() {
    let temp_dir = TempDir::new().unwrap();

    let err = resolve(&DirectorySource::new(temp_dir.path().join("missing"))).unwrap_err();

    assert!(matches!(err, Error::SourceList(_)));
}

static EMBEDDED: &[(&str, &str)] = &[
    ("db/migrations/1_init.up.sql", "CREATE TABLE a (id INT);"),
    ("db/migrations/1_init.down.sql", "DROP TABLE a;"),
    ("db/migrations/archive/0_old.up.sql", "SELECT 1;"),
    ("db/seeds/1_seed.up.sql", "INSERT INTO a VALUES (1);"),
];

#[test]
fn test_embedded_source_only_sees_its_directory() -> Result<()> {
    let source = EmbeddedSource::new(EMBEDDED).with_dir("db/migrations/");

    let migrations = resolve(&source)?;

    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].id, "1_init");
    assert!(migrations[0].down.is_some());
    Ok(())
}

#[test]
fn test_duplicate_direction_is_rejected() {
    let source = MemorySource::new()
        .with_file("1_init.up.sql", "A;")
        .with_file("1_init.up.txt", "B;");

    let err = resolve(&source).unwrap_err();

    assert!(matches!(
        err,
        Error::DuplicateMigration { ref id, direction: Direction::Up, .. } if id == "1_init"
    ));
}

#[test]
fn test_parse_error_names_the_file() {
    let source = MemorySource::new().with_file(
        "1_bad.up.sql",
        "SELECT 1;\n-- +migration NoTransaction\n",
    );

    let err = resolve(&source).unwrap_err();

    assert!(err.to_string().contains("1_bad.up.sql"));
}

#[test]
fn test_filename_parsing() {
    assert_eq!(
        parse_migration_filename("1734567890_add_users.up.sql"),
        Some(("1734567890_add_users", Direction::Up))
    );
    assert_eq!(
        parse_migration_filename("v1.2.down.sql"),
        Some(("v1.2", Direction::Down))
    );
    assert_eq!(parse_migration_filename("1_init.sql"), None);
    assert_eq!(parse_migration_filename("1_init.up"), None);
}
