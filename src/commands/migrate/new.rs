use super::common::migrations_dir;
use crate::config::Config;
use crate::constants::MIGRATION_FILE_EXTENSION;
use crate::migration::Direction;
use crate::prompts::prompt_required_string_with_validation;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn cmd_migrate_new(config: &Config, root_dir: &Path, description: Option<&str>) -> Result<()> {
    let description = prompt_required_string_with_validation(
        description,
        "Enter migration description",
        validate_description,
    )?;

    let dir = migrations_dir(config, root_dir);
    let (up, down) = create_migration_files(&dir, Utc::now().timestamp(), &description)?;

    println!("Created {}", up.display());
    println!("Created {}", down.display());
    Ok(())
}

fn validate_description(input: &str) -> Result<(), String> {
    if slugify(input).is_empty() {
        return Err("Description must contain at least one letter or digit".to_string());
    }
    if input.len() > 100 {
        return Err("Description must be 100 characters or less".to_string());
    }
    Ok(())
}

/// Lowercase ASCII words joined by underscores
pub fn slugify(description: &str) -> String {
    description
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Write empty `{version}_{slug}.up.sql` and `.down.sql` files into `dir`
pub fn create_migration_files(
    dir: &Path,
    version: i64,
    description: &str,
) -> Result<(PathBuf, PathBuf)> {
    let id = format!("{}_{}", version, slugify(description));

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create migrations directory {}", dir.display()))?;

    let path_for = |direction: Direction| {
        dir.join(format!("{}.{}.{}", id, direction, MIGRATION_FILE_EXTENSION))
    };
    let up = path_for(Direction::Up);
    let down = path_for(Direction::Down);

    if let Some(existing) = [&up, &down].into_iter().find(|path| path.exists()) {
        bail!("Migration file {} already exists", existing.display());
    }

    for path in [&up, &down] {
        std::fs::write(path, "")
            .with_context(|| format!("Failed to write migration file {}", path.display()))?;
        debug!("Wrote {}", path.display());
    }

    Ok((up, down))
}
