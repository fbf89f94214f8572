//! Rollback guard for staged installs
//!
//! ```ignore
//! let mut guard = StagingGuard::new();
//! extract(&artifact, &extracted)?;
//! guard.track_dir_created(&extracted);
//!
//! // Any early return from here on removes the extraction directory.
//! hooks.pre_commit(&manifest)?;
//! guard.commit();
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Removes everything created during a staging operation unless committed
#[derive(Debug, Default)]
pub struct StagingGuard {
    /// Files created during staging
    created_files: Vec<PathBuf>,

    /// Directory trees created during staging
    created_dirs: Vec<PathBuf>,

    committed: bool,
}

impl StagingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file that was created during staging
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.push(path.into());
    }

    /// Track a directory tree that was created during staging
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.push(path.into());
    }

    /// Keep everything that was created
    pub fn commit(mut self) {
        self.committed = true;
    }

    fn rollback(&mut self) {
        for path in self.created_files.drain(..) {
            debug!(path = %path.display(), "Removing staged file");
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to remove staged file");
                }
            }
        }

        for path in self.created_dirs.drain(..).rev() {
            debug!(path = %path.display(), "Removing staged directory");
            if let Err(e) = fs::remove_dir_all(&path) {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to remove staged directory");
                }
            }
        }
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
