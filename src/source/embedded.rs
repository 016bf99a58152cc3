use super::Source;
use anyhow::{Result, anyhow};
use std::io::Read;

/// Migration files compiled into the binary.
///
/// ```ignore
/// static MIGRATIONS: &[(&str, &str)] = &[
///     ("migrations/1_init.up.sql", include_str!("../migrations/1_init.up.sql")),
///     ("migrations/1_init.down.sql", include_str!("../migrations/1_init.down.sql")),
/// ];
///
/// let source = EmbeddedSource::new(MIGRATIONS).with_dir("migrations");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    files: &'static [(&'static str, &'static str)],
    dir: &'static str,
}

impl EmbeddedSource {
    pub fn new(files: &'static [(&'static str, &'static str)]) -> Self {
        Self { files, dir: "" }
    }

    /// Only expose files directly inside `dir`
    pub fn with_dir(mut self, dir: &'static str) -> Self {
        self.dir = dir.trim_matches('/');
        self
    }

    fn file_name<'p>(&self, path: &'p str) -> Option<&'p str> {
        let name = if self.dir.is_empty() {
            path
        } else {
            path.strip_prefix(self.dir)?.strip_prefix('/')?
        };

        (!name.is_empty() && !name.contains('/')).then_some(name)
    }
}

impl Source for EmbeddedSource {
    fn list_migration_files(&self) -> Result<Vec<String>> {
        Ok(self
            .files
            .iter()
            .filter_map(|(path, _)| self.file_name(path))
            .map(str::to_string)
            .collect())
    }

    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let content = self
            .files
            .iter()
            .find(|(path, _)| self.file_name(path) == Some(name))
            .map(|(_, content)| *content)
            .ok_or_else(|| anyhow!("Embedded migration file {} does not exist", name))?;

        Ok(Box::new(content.as_bytes()))
    }
}
