//! On-disk content cache
//!
//! Maps a cache key (see [`cache_key`]) to a file under a root directory.
//! Entries are written once and never expire; removing them is left to the
//! operator. There is no locking, so two processes must never share a
//! cache root.

mod key;

pub use key::{cache_key, HTML_EXTENSION, PDF_EXTENSION};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing cache entries
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to read cache entry {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write cache entry {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A directory of cached artifacts addressed by key
#[derive(Debug, Clone)]
pub struct ContentCache {
    root: PathBuf,
}

impl ContentCache {
    /// Creates a cache rooted at `root`; the directory is created lazily
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the file path backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Creates the root directory if it does not exist yet
    pub async fn ensure_root(&self) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| CacheError::CreateDir {
                path: self.root.clone(),
                source,
            })
    }

    /// Writes `data` under `key`, replacing any previous entry
    pub async fn save(&self, key: &str, data: &[u8]) -> Result<(), CacheError> {
        self.ensure_root().await?;

        let path = self.path_for(key);
        tokio::fs::write(&path, data)
            .await
            .map_err(|source| CacheError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Reads the entry for `key`
    ///
    /// Returns `Ok(None)` when nothing is cached. An entry that exists but is
    /// empty is still a hit.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Read { path, source }),
        }
    }

    /// Checks whether a regular file exists for `key`
    pub async fn contains(&self, key: &str) -> bool {
        tokio::fs::metadata(self.path_for(key))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
