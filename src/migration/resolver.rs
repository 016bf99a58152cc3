use super::parser::parse_statements;
use super::types::{Direction, Migration, sort_migrations};
use crate::error::Error;
use crate::source::Source;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::debug;

// The lazy `.+?` makes the id stop at the first `.up.` / `.down.`
static MIGRATION_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\.(up|down)\.(.+)$").expect("migration filename pattern is valid")
});

/// Parse a migration filename like "1734567890_add_users.up.sql" into its id and direction
pub fn parse_migration_filename(filename: &str) -> Option<(&str, Direction)> {
    let captures = MIGRATION_FILENAME.captures(filename)?;
    let id = captures.get(1)?.as_str();
    let direction = match captures.get(2)?.as_str() {
        "up" => Direction::Up,
        _ => Direction::Down,
    };

    Some((id, direction))
}

/// Discover, read and parse every migration the source provides.
///
/// The result is sorted with [`super::compare_ids`] and contains each id once.
pub fn resolve<S: Source + ?Sized>(source: &S) -> Result<Vec<Migration>, Error> {
    let mut files = source
        .list_migration_files()
        .map_err(|e| Error::SourceList(e.into()))?;
    files.sort();

    let mut migrations: BTreeMap<String, Migration> = BTreeMap::new();
    let mut origins: HashMap<(String, Direction), String> = HashMap::new();

    for file in &files {
        let Some((id, direction)) = parse_migration_filename(file) else {
            debug!("Ignoring {}: not a migration file", file);
            continue;
        };

        if let Some(first) = origins.insert((id.to_string(), direction), file.clone()) {
            return Err(Error::DuplicateMigration {
                id: id.to_string(),
                direction,
                first,
                second: file.clone(),
            });
        }

        let sql = read_migration_file(source, file)?;
        let parsed = parse_statements(&sql).map_err(|source| Error::Parse {
            file: file.clone(),
            source,
        })?;

        debug!(
            "Parsed {} ({} statement{}, transaction: {})",
            file,
            parsed.statements.len(),
            if parsed.statements.len() == 1 { "" } else { "s" },
            parsed.use_transaction
        );

        let migration = migrations
            .entry(id.to_string())
            .or_insert_with(|| Migration::new(id));
        match direction {
            Direction::Up => migration.up = Some(parsed),
            Direction::Down => migration.down = Some(parsed),
        }
    }

    let mut migrations: Vec<Migration> = migrations.into_values().collect();
    sort_migrations(&mut migrations);

    Ok(migrations)
}

fn read_migration_file<S: Source + ?Sized>(source: &S, file: &str) -> Result<String, Error> {
    let read_error = |e: anyhow::Error| Error::SourceRead {
        file: file.to_string(),
        source: e.into(),
    };

    let mut reader = source.get_migration_file(file).map_err(read_error)?;
    let mut sql = String::new();
    reader
        .read_to_string(&mut sql)
        .map_err(|e| read_error(e.into()))?;

    Ok(sql)
}
