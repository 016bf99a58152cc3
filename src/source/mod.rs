pub mod directory;
pub mod embedded;
pub mod memory;

pub use directory::DirectorySource;
pub use embedded::EmbeddedSource;
pub use memory::MemorySource;

use anyhow::Result;
use std::io::Read;

/// Where migration files come from.
///
/// File names follow `{id}.{up|down}.{anything}`; names that don't are
/// ignored by the resolver, so a source may list unrelated files.
pub trait Source {
    /// Names of all files the source can provide
    fn list_migration_files(&self) -> Result<Vec<String>>;

    /// Open one file returned by [`Source::list_migration_files`]
    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>>;
}

impl<S: Source + ?Sized> Source for &S {
    fn list_migration_files(&self) -> Result<Vec<String>> {
        (**self).list_migration_files()
    }

    fn get_migration_file(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        (**self).get_migration_file(name)
    }
}
