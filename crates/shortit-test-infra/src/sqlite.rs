use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct SqliteConfig {
    #[builder(default = "shortit.db".to_string(), setter(into))]
    file_name: String,
}

/// Test fixture for a disposable on-disk SQLite database.
///
/// The database file lives in a fresh temporary directory that is removed
/// when the fixture is dropped. The file itself is not created; the code
/// under test is expected to create it.
pub struct SqliteDatabase {
    dir: TempDir,
    path: PathBuf,
}

impl SqliteDatabase {
    pub fn new(config: SqliteConfig) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("shortit-").tempdir()?;
        let path = dir.path().join(&config.file_name);
        Ok(Self { dir, path })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the database file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
