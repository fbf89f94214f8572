//! Archive engine abstraction
//!
//! Package artifacts are containers holding one or more restore points (a
//! snapshot of a directory tree). The store only relies on the small
//! interface below; [`ZipArchiveEngine`] is the engine shipped with kpkg.

mod zip_engine;

pub use zip_engine::ZipArchiveEngine;

use std::path::Path;

use crate::error::Result;

/// Opens artifacts
pub trait ArchiveEngine {
    /// Open the artifact at `locator`
    fn open(&self, locator: &Path) -> Result<Box<dyn ArchiveHandle>>;
}

/// An opened artifact
pub trait ArchiveHandle {
    /// Identifiers of the restore points stored in the artifact
    fn restore_points(&mut self) -> Result<Vec<String>>;

    /// Extract a restore point into `destination`
    ///
    /// `strip_prefix` is removed from every extracted path; entries outside
    /// of it are skipped. `destination` is created even when nothing is
    /// extracted.
    fn extract(&mut self, restore_point: &str, destination: &Path, strip_prefix: &str)
    -> Result<()>;
}
