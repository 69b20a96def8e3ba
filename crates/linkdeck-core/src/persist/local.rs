//! Local cache file.
//!
//! A single JSON file holding the latest collection. Written on every
//! settled change (unlike the remote write, which is debounced), so a crash
//! or offline session never loses more than the unflushed remote push.
//!
//! Writes go through a temp file, fsync, and rename; a torn write can never
//! leave a half-cached collection behind.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use tracing::debug;

use crate::collection::Collection;
use crate::error::{LinkdeckError, Result};

/// The on-disk collection cache.
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached collection.
    ///
    /// Returns `None` if nothing has been cached yet, or an error if the
    /// file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Collection>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&self.path).map_err(|e| LinkdeckError::Io {
            message: format!("Failed to open {}", self.path.display()),
            path: Some(self.path.clone()),
            source: Some(e),
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| LinkdeckError::Io {
                message: format!("Failed to read {}", self.path.display()),
                path: Some(self.path.clone()),
                source: Some(e),
            })?;

        let collection = serde_json::from_str(&contents).map_err(|e| LinkdeckError::Json {
            message: format!("Failed to parse {}: {}", self.path.display(), e),
            source: Some(e),
        })?;
        Ok(Some(collection))
    }

    /// Write the collection atomically.
    pub fn store(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| LinkdeckError::Io {
                    message: format!("Failed to create directory {}", parent.display()),
                    path: Some(parent.to_path_buf()),
                    source: Some(e),
                })?;
            }
        }

        let serialized = collection.to_json()?;
        let temp_path = self
            .path
            .with_extension(format!("json.{}.tmp", process::id()));

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| LinkdeckError::Io {
                    message: format!("Failed to create temp file {}", temp_path.display()),
                    path: Some(temp_path.clone()),
                    source: Some(e),
                })?;
            file.write_all(serialized.as_bytes())
                .map_err(|e| LinkdeckError::Io {
                    message: format!("Failed to write temp file {}", temp_path.display()),
                    path: Some(temp_path.clone()),
                    source: Some(e),
                })?;
            file.sync_all().map_err(|e| LinkdeckError::Io {
                message: format!("Failed to sync temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| LinkdeckError::Io {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            ),
            path: Some(self.path.clone()),
            source: Some(e),
        })?;

        debug!("Cached collection at {}", self.path.display());
        Ok(())
    }
}
