//! Host callbacks around store operations

use std::path::Path;

use tracing::debug;

use crate::error::{PkgError, Result};
use crate::manifest::Manifest;
use crate::package::{PLUGIN_API_VERSION, PackageIdentity, version};

/// Callbacks invoked by the store; every method defaults to a no-op
pub trait StoreHooks {
    /// Called with the validated manifest before a package is committed.
    /// Returning an error aborts the install and rolls it back.
    fn pre_commit(&self, _manifest: &Manifest) -> Result<()> {
        Ok(())
    }

    /// Called once a package is committed, and for every rehydrated package.
    /// The package stays installed whatever happens here; implementations
    /// report their own failures.
    fn post_commit(&self, _manifest: &Manifest, _identity: &PackageIdentity, _extracted: &Path) {}

    /// Called after a package has been removed
    fn post_evict(&self, _identity: &PackageIdentity) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl StoreHooks for NoopHooks {}

/// Rejects packages built against another major plugin API version
#[derive(Debug, Clone)]
pub struct ApiVersionGate {
    api_version: String,
}

impl ApiVersionGate {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
        }
    }
}

impl Default for ApiVersionGate {
    fn default() -> Self {
        Self::new(PLUGIN_API_VERSION)
    }
}

impl StoreHooks for ApiVersionGate {
    fn pre_commit(&self, manifest: &Manifest) -> Result<()> {
        // packages predating api_version are accepted
        if manifest.api_version.is_empty() {
            return Ok(());
        }

        let wanted = version::parse(&self.api_version);
        let found = version::parse(&manifest.api_version);
        match (wanted, found) {
            (Some(wanted), Some(found)) if wanted.major == found.major => Ok(()),
            (_, None) => Err(PkgError::HookRejected {
                reason: format!("invalid api_version {:?}", manifest.api_version),
            }),
            _ => Err(PkgError::HookRejected {
                reason: format!(
                    "package {} targets plugin API {}, host provides {}",
                    manifest.name, manifest.api_version, self.api_version
                ),
            }),
        }
    }

    fn post_commit(&self, manifest: &Manifest, identity: &PackageIdentity, extracted: &Path) {
        for connector in &manifest.connectors {
            debug!(
                package = %identity,
                kind = %connector.kind,
                protocols = ?connector.protocols,
                executable = %extracted.join(&connector.executable).display(),
                "Connector available"
            );
        }
    }
}
