//! Zip-backed archive engine
//!
//! Layout of an artifact:
//!
//! ```text
//! s3_v1.0.0_linux_amd64.ptar (zip)
//! └── <restore-point>/
//!     ├── manifest.yaml
//!     └── bin/...
//! ```
//!
//! Each distinct top-level directory is a restore point. Files stored at the
//! top level do not belong to any restore point and are never extracted.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::{ArchiveEngine, ArchiveHandle};
use crate::error::{PkgError, Result, path_error};

/// Archive engine reading zip containers
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveEngine;

impl ArchiveEngine for ZipArchiveEngine {
    fn open(&self, locator: &Path) -> Result<Box<dyn ArchiveHandle>> {
        let file = File::open(locator).map_err(|e| path_error("Failed to open archive", locator, e))?;
        let zip = ZipArchive::new(file).map_err(|e| archive_error(locator, e))?;
        Ok(Box::new(ZipHandle {
            path: locator.to_path_buf(),
            zip,
        }))
    }
}

struct ZipHandle {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl ArchiveHandle for ZipHandle {
    fn restore_points(&mut self) -> Result<Vec<String>> {
        let mut points = BTreeSet::new();
        for index in 0..self.zip.len() {
            let entry = self
                .zip
                .by_index(index)
                .map_err(|e| archive_error(&self.path, e))?;
            let Some(name) = entry.enclosed_name() else {
                continue;
            };
            let mut components = name.components();
            let Some(first) = components.next() else {
                continue;
            };
            if entry.is_dir() || components.next().is_some() {
                points.insert(first.as_os_str().to_string_lossy().into_owned());
            }
        }
        Ok(points.into_iter().collect())
    }

    fn extract(
        &mut self,
        restore_point: &str,
        destination: &Path,
        strip_prefix: &str,
    ) -> Result<()> {
        let root = Path::new(restore_point);
        let prefix = Path::new(strip_prefix);
        if !prefix.starts_with(root) {
            return Err(archive_error(
                &self.path,
                format!("prefix {strip_prefix:?} is outside restore point {restore_point:?}"),
            ));
        }

        fs::create_dir_all(destination)
            .map_err(|e| path_error("Failed to create directory", destination, e))?;

        for index in 0..self.zip.len() {
            let mut entry = self
                .zip
                .by_index(index)
                .map_err(|e| archive_error(&self.path, e))?;
            let Some(name) = entry.enclosed_name() else {
                return Err(archive_error(
                    &self.path,
                    format!("unsafe entry name {:?}", entry.name()),
                ));
            };
            let Ok(relative) = name.strip_prefix(prefix) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            let target = destination.join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| path_error("Failed to create directory", &target, e))?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| path_error("Failed to create directory", parent, e))?;
            }
            let mut out =
                File::create(&target).map_err(|e| path_error("Failed to create file", &target, e))?;
            io::copy(&mut entry, &mut out)
                .map_err(|e| path_error("Failed to write file", &target, e))?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o777))
                    .map_err(|e| path_error("Failed to set permissions on", &target, e))?;
            }
        }

        Ok(())
    }
}

fn archive_error(path: &Path, reason: impl std::fmt::Display) -> PkgError {
    PkgError::Archive {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
