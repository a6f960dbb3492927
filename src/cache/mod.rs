//! Preview Cache Store
//!
//! Owns a single directory of content-addressed files. Filenames are a
//! deterministic function of (reference hash, theme, optional render size)
//! plus a content-appropriate extension, so repeated requests for the same
//! key resolve to the same path without re-fetching. There is no index file;
//! lookup is hash recomputation plus an existence probe.
//!
//! No other component writes into this directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Process-temp scoped default cache directory.
    pub fn default_location() -> PathBuf {
        std::env::temp_dir().join("glimpse-previews")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Create the cache directory if absent. Filesystem errors are logged and
    /// swallowed; the pipeline continues without caching guarantees.
    pub fn ensure_directory(&self) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(
                "⚠️ failed to create preview cache at {}: {}",
                self.dir.display(),
                e
            );
        }
    }

    /// Existence probe, no side effects.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Create-or-overwrite. Writes to a temp sibling and renames so a
    /// concurrent reader never observes a partial file.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("entry");
        let staging = path.with_file_name(format!("{file_name}.tmp"));
        fs::write(&staging, bytes)?;
        fs::rename(&staging, path)
    }

    /// Delete entries whose age exceeds the threshold. Continues past
    /// individual failures and reports the count deleted.
    pub fn evict_older_than(&self, max_age: Duration) -> usize {
        self.evict_older_than_at(max_age, SystemTime::now())
    }

    pub(crate) fn evict_older_than_at(&self, max_age: Duration, now: SystemTime) -> usize {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cache sweep skipped, cannot list {}: {}", self.dir.display(), e);
                return 0;
            }
        };

        let mut deleted = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            // A future mtime yields no age; keep the entry.
            let Ok(age) = now.duration_since(modified) else {
                continue;
            };
            if age > max_age {
                match fs::remove_file(&path) {
                    Ok(()) => {
                        debug!("🧹 evicted stale preview {}", path.display());
                        deleted += 1;
                    }
                    Err(e) => warn!("failed to evict {}: {}", path.display(), e),
                }
            }
        }
        deleted
    }
}
