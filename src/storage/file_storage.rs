use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one file per key inside a data directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const DATA_DIR: &'static str = ".kanban";
    const EXTENSION: &'static str = "json";

    /// Creates a new FileStorage keeping its data under `<project_root>/.kanban`
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::DATA_DIR),
        }
    }

    /// Directory holding the stored entries
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn entry_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(BoardError::StorageError(format!(
                "key '{key}' cannot be used as a file name"
            )));
        }
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::EXTENSION)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.entry_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.entry_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(file_path, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.entry_file(key)?;

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}
