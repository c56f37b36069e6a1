use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory layout under the configured data root.
///
/// ```text
/// <root>/
///   db/        mindwise.sqlite
///   uploads/   audio spooled while a transcription is in flight
/// ```
#[derive(Debug, Clone)]
pub struct DataDirs {
    root: PathBuf,
}

impl DataDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Database directory (<root>/db).
    pub fn db_dir(&self) -> PathBuf {
        self.root.join("db")
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_dir().join("mindwise.sqlite")
    }

    /// Temporary audio uploads (<root>/uploads).
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Creates the root, db and uploads directories if they don't exist.
    pub fn init(&self) -> Result<(), std::io::Error> {
        for dir in [self.root.clone(), self.db_dir(), self.uploads_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }

        Ok(())
    }
}
