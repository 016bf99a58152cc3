use super::Source;
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::io::Read;

/// Migration files held in memory, mainly useful for tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.files.remove(name)
    }
}

impl<N, C> FromIterator<(N, C)> for MemorySource
where
    N: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(name, content)| (name.into(), content.into()))
                .collect(),
        }
    }
}

impl Source for MemorySource {
    fn list_migration_files(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let content = self
            .files
            .get(name)
            .ok_or_else(|| anyhow!("The migration file {} does not exist", name))?;

        Ok(Box::new(content.as_bytes()))
    }
}
