//! File-backed blob store with atomic writes
//!
//! One file per key under the data directory. Writes go to a temp file that
//! is fsynced and renamed into place, so a crash leaves either the old or the
//! new value, never a torn one.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{GiftbookError, GiftbookResult};

use super::BlobStore;

/// Blob store persisting each key as a JSON file
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory (created on demand)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Map a store key onto a file path. `:` is not portable in file names,
    /// so `gifts:<id>` becomes `gifts_<id>.json`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', "_")))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> GiftbookResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            GiftbookError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Some(contents))
    }

    fn put(&self, key: &str, value: &str) -> GiftbookResult<()> {
        write_atomic(&self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> GiftbookResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                GiftbookError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// Write a value to a file atomically (write to temp, then rename)
fn write_atomic(path: &Path, value: &str) -> GiftbookResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GiftbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory, required for an atomic rename.
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| GiftbookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(value.as_bytes())
        .map_err(|e| GiftbookError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| GiftbookError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| GiftbookError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GiftbookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
