use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::KeyValueStorage;
use crate::utils::error::{AppError, AppResult};

const ITEM_EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory and are
/// persisted over the item, so a reader never observes a half-written value
/// and concurrent writers never share a temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str, extension: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::InternalError(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.{}", key, extension)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key, ITEM_EXTENSION)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key, ITEM_EXTENSION)?;

        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Wrote storage item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key, ITEM_EXTENSION)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
