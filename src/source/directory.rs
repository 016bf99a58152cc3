use super::Source;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Migration files stored in a directory on disk (not searched recursively)
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Source for DirectorySource {
    fn list_migration_files(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).with_context(|| {
            format!(
                "Failed to read migrations directory {}",
                self.dir.display()
            )
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;

            if entry.path().is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }

    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let path = self.dir.join(name);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open migration file {}", path.display()))?;

        Ok(Box::new(BufReader::new(file)))
    }
}
