//! Local package store
//!
//! ## Layout
//!
//! ```text
//! <pkgdir>/
//! ├── s3_v1.0.0_linux_amd64.ptar      committed artifacts
//! └── .s3-Xy12ab                      in-flight download (hidden)
//! <cachedir>/
//! ├── s3_v1.0.0_linux_amd64/          extracted artifact
//! └── .extract-Qr34cd/                in-flight extraction (hidden)
//! ```
//!
//! An artifact is visible under its canonical name only once it has been
//! fully written, extracted and validated. Extraction directories are
//! derived from artifacts and can be rebuilt with [`FlatStore::reload_all`].

mod cache;
mod enumerate;
mod hooks;
mod staging;

pub use cache::{CacheStats, CachedPackage};
pub use enumerate::{BATCH_SIZE, Enumerate};
pub use hooks::{ApiVersionGate, NoopHooks, StoreHooks};
pub use staging::StagingGuard;

use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::archive::{ArchiveEngine, ZipArchiveEngine};
use crate::error::{PkgError, Result, already_installed, path_error};
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::package::PackageIdentity;
use crate::platform::Platform;

/// Operations the lifecycle manager needs from a package store
pub trait Store {
    /// Iterate over committed packages, optionally only those named `name`
    fn enumerate(&self, name: Option<&str>) -> Box<dyn Iterator<Item = Result<PackageIdentity>> + '_>;

    /// Install the artifact read from `reader` under `identity`
    ///
    /// Either the package is fully committed or nothing is left behind.
    fn stage(&self, identity: &PackageIdentity, reader: &mut dyn Read) -> Result<()>;

    /// Remove a committed package and its extraction
    fn evict(&self, identity: &PackageIdentity) -> Result<()>;
}

/// Store keeping artifacts in one flat directory and extractions in another
pub struct FlatStore {
    pkgdir: PathBuf,
    cachedir: PathBuf,
    platform: Platform,
    hooks: Box<dyn StoreHooks>,
    engine: Box<dyn ArchiveEngine>,
}

impl FlatStore {
    /// Open a store, creating both directories if needed
    pub fn new(
        pkgdir: impl Into<PathBuf>,
        cachedir: impl Into<PathBuf>,
        platform: Platform,
    ) -> Result<Self> {
        let pkgdir = pkgdir.into();
        let cachedir = cachedir.into();
        for dir in [&pkgdir, &cachedir] {
            fs::create_dir_all(dir).map_err(|e| path_error("Failed to create directory", dir, e))?;
        }

        Ok(Self {
            pkgdir,
            cachedir,
            platform,
            hooks: Box::new(NoopHooks),
            engine: Box::new(ZipArchiveEngine),
        })
    }

    /// Replace the host hooks
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl StoreHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Replace the archive engine
    #[must_use]
    pub fn with_engine(mut self, engine: impl ArchiveEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn pkgdir(&self) -> &Path {
        &self.pkgdir
    }

    pub fn cachedir(&self) -> &Path {
        &self.cachedir
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Path of the committed artifact for `identity`
    pub fn artifact_path(&self, identity: &PackageIdentity) -> PathBuf {
        self.pkgdir.join(identity.file_name())
    }

    /// Path of the extraction directory for `identity`
    pub fn extraction_path(&self, identity: &PackageIdentity) -> PathBuf {
        self.cachedir.join(identity.base_name())
    }

    /// Typed enumeration, see [`Enumerate`]
    pub fn packages(&self, name: Option<&str>) -> Enumerate {
        Enumerate::new(self.pkgdir.clone(), name)
    }

    /// Make a committed package available again
    ///
    /// Extracts the artifact if its extraction directory is missing, loads
    /// the manifest and runs the post-commit hook. The pre-commit hook is not
    /// run: the package was accepted when it was committed. If extraction or
    /// manifest loading fails, an extraction created by this call is removed;
    /// the artifact is kept.
    pub fn rehydrate(&self, identity: &PackageIdentity) -> Result<()> {
        let artifact = self.artifact_path(identity);
        let extracted = self.extraction_path(identity);
        let mut guard = StagingGuard::new();

        if extracted.is_dir() {
            debug!(package = %identity, "Extraction present");
        } else {
            debug!(package = %identity, "Re-extracting");
            self.extract(&artifact, &extracted)?;
            guard.track_dir_created(&extracted);
        }

        let manifest = Manifest::load(&extracted.join(MANIFEST_FILE), &self.platform)?;
        guard.commit();

        self.hooks.post_commit(&manifest, identity, &extracted);
        Ok(())
    }

    /// Rehydrate every committed package; the first error aborts
    pub fn reload_all(&self) -> Result<usize> {
        self.reload_all_with(|_| {})
    }

    /// [`FlatStore::reload_all`], calling `on_package` before each package
    pub fn reload_all_with(&self, mut on_package: impl FnMut(&PackageIdentity)) -> Result<usize> {
        let mut count = 0;
        for identity in self.packages(None) {
            let identity = identity?;
            on_package(&identity);
            self.rehydrate(&identity)?;
            count += 1;
        }
        info!(count, "Reloaded packages");
        Ok(count)
    }

    /// Extract the single restore point of `artifact` into `destination`
    ///
    /// Extraction goes to a hidden sibling directory which is renamed into
    /// place once complete.
    fn extract(&self, artifact: &Path, destination: &Path) -> Result<()> {
        let staging = self.extract_to_staging(artifact)?;
        fs::rename(staging.path(), destination)
            .map_err(|e| path_error("Failed to move extraction to", destination, e))?;
        debug!(path = %destination.display(), "Extracted");
        Ok(())
    }

    /// Extract the single restore point of `artifact` into a hidden
    /// directory of the cache, removed again when dropped
    fn extract_to_staging(&self, artifact: &Path) -> Result<tempfile::TempDir> {
        let mut handle = self.engine.open(artifact)?;
        let points = handle.restore_points()?;
        let [point] = points.as_slice() else {
            return Err(PkgError::ArchiveInconsistent {
                path: artifact.display().to_string(),
                count: points.len(),
            });
        };

        let staging = tempfile::Builder::new()
            .prefix(".extract-")
            .tempdir_in(&self.cachedir)
            .map_err(|e| path_error("Failed to create directory in", &self.cachedir, e))?;
        handle.extract(point, staging.path(), point)?;
        debug!(restore_point = %point, path = %staging.path().display(), "Extracted");
        Ok(staging)
    }
}

impl Store for FlatStore {
    fn enumerate(&self, name: Option<&str>) -> Box<dyn Iterator<Item = Result<PackageIdentity>> + '_> {
        Box::new(self.packages(name))
    }

    fn stage(&self, identity: &PackageIdentity, reader: &mut dyn Read) -> Result<()> {
        let artifact = self.artifact_path(identity);
        let extracted = self.extraction_path(identity);

        if artifact.exists() {
            return Err(already_installed(identity.name(), identity.version()));
        }

        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}-", identity.name()))
            .tempfile_in(&self.pkgdir)
            .map_err(|e| path_error("Failed to create temporary file in", &self.pkgdir, e))?;
        let written = io::copy(reader, temp.as_file_mut())
            .map_err(|e| path_error("Failed to write", temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| path_error("Failed to write", temp.path(), e))?;
        debug!(package = %identity, bytes = written, "Downloaded to temporary file");

        let staging = self.extract_to_staging(temp.path())?;
        let manifest = Manifest::load(&staging.path().join(MANIFEST_FILE), &self.platform)?;
        debug!(package = %identity, connectors = manifest.connectors.len(), "Manifest validated");
        self.hooks.pre_commit(&manifest)?;

        // no artifact means nothing owns this directory
        if extracted.exists() {
            debug!(path = %extracted.display(), "Removing stale extraction");
            fs::remove_dir_all(&extracted)
                .map_err(|e| path_error("Failed to remove directory", &extracted, e))?;
        }

        let mut guard = StagingGuard::new();
        fs::rename(staging.path(), &extracted)
            .map_err(|e| path_error("Failed to move extraction to", &extracted, e))?;
        guard.track_dir_created(&extracted);

        link_or_copy(temp.path(), &artifact, &mut guard)?;
        guard.commit();
        drop(temp);
        info!(package = %identity, "Installed package");

        self.hooks.post_commit(&manifest, identity, &extracted);
        Ok(())
    }

    fn evict(&self, identity: &PackageIdentity) -> Result<()> {
        let artifact = self.artifact_path(identity);
        fs::remove_file(&artifact).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PkgError::NotInstalled {
                    name: identity.file_name(),
                }
            } else {
                path_error("Failed to remove", &artifact, e)
            }
        })?;

        let extracted = self.extraction_path(identity);
        match fs::remove_dir_all(&extracted) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(path_error("Failed to remove directory", &extracted, e)),
        }

        info!(package = %identity, "Removed package");
        self.hooks.post_evict(identity);
        Ok(())
    }
}

/// Publish `temp` under `artifact`, copying when hard links are unavailable
fn link_or_copy(temp: &Path, artifact: &Path, guard: &mut StagingGuard) -> Result<()> {
    match fs::hard_link(temp, artifact) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(path_error("Failed to commit", artifact, e))
        }
        Err(e) => {
            debug!(error = %e, "Hard link failed, copying artifact");
            guard.track_file_created(artifact);
            fs::copy(temp, artifact)
                .map(|_| ())
                .map_err(|e| path_error("Failed to commit", artifact, e))
        }
    }
}
