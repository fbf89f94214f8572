//! Extraction cache statistics and maintenance
//!
//! Extraction directories are derived from committed artifacts, so any of
//! them can be dropped and rebuilt later by a reload.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::FlatStore;
use crate::error::{Result, path_error};
use crate::package::PackageIdentity;

/// One extraction directory
#[derive(Debug, Clone)]
pub struct CachedPackage {
    /// Directory name (canonical name without extension)
    pub name: String,
    /// Package identity, when the directory name is a valid one
    pub identity: Option<PackageIdentity>,
    /// Total size in bytes
    pub size: u64,
}

impl CachedPackage {
    /// Format size as human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of extraction directories
    pub entries: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.total_size)
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{bytes} B")
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else if size < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
    }
}

impl FlatStore {
    /// List the extraction directories, sorted by name
    ///
    /// Hidden in-flight extraction directories are not listed.
    pub fn cache_entries(&self) -> Result<Vec<CachedPackage>> {
        let entries = fs::read_dir(&self.cachedir)
            .map_err(|e| path_error("Failed to read cache directory", &self.cachedir, e))?;

        let mut packages = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| path_error("Failed to read cache directory", &self.cachedir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }

            let identity = PackageIdentity::parse(&format!(
                "{name}{}",
                crate::package::ARCHIVE_SUFFIX
            ))
            .ok();
            packages.push(CachedPackage {
                size: dir_size(&entry.path()),
                name,
                identity,
            });
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packages)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> Result<CacheStats> {
        let entries = self.cache_entries()?;
        Ok(CacheStats {
            entries: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
        })
    }

    /// Remove extraction directories
    ///
    /// With a name, only the extractions of that package are removed.
    /// Without one, the whole cache is emptied, including leftovers of
    /// interrupted extractions. Returns the number of directories removed.
    pub fn clear_cache(&self, name: Option<&str>) -> Result<usize> {
        let entries = fs::read_dir(&self.cachedir)
            .map_err(|e| path_error("Failed to read cache directory", &self.cachedir, e))?;

        let mut removed = 0;
        for entry in entries {
            let entry =
                entry.map_err(|e| path_error("Failed to read cache directory", &self.cachedir, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            if let Some(name) = name {
                let dir_name = entry.file_name().to_string_lossy().into_owned();
                let matches = PackageIdentity::parse(&format!(
                    "{dir_name}{}",
                    crate::package::ARCHIVE_SUFFIX
                ))
                .is_ok_and(|identity| identity.name() == name);
                if !matches {
                    continue;
                }
            }

            debug!(path = %path.display(), "Removing extraction directory");
            match fs::remove_dir_all(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(path_error("Failed to remove directory", &path, e)),
            }
        }

        info!(removed, "Cleared extraction cache");
        Ok(removed)
    }
}

/// Calculate directory size recursively
fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
