//! Package lifecycle manager
//!
//! Orchestrates installs and removals on top of a [`Store`]:
//!
//! - `add`: resolve the target identity (local artifact, or remote recipe),
//!   apply the version policy, then evict superseded versions and stage the
//!   new one
//! - `remove`: evict every installed package matching a name
//! - `query`: merge installed packages with the remote catalog

pub mod policy;
mod query;

pub use policy::{AddPolicy, PolicyDecision, resolve_version_policy};
pub use query::QueryOptions;

use std::fs::File;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, bad_identity, path_error};
use crate::package::{ARCHIVE_SUFFIX, PackageIdentity};
use crate::remote::RemoteClient;
use crate::store::Store;

/// Options of [`Manager::add`]
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Version to install; the recipe's version is used when unset
    pub version: Option<String>,
    pub policy: AddPolicy,
    /// Fetch targets that are not `.ptar` files from the repository
    pub implicit_fetch: bool,
}

/// Options of [`Manager::remove`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// With an empty target, remove every installed package
    pub all: bool,
}

/// Package lifecycle manager
pub struct Manager<S: Store> {
    store: S,
    remote: RemoteClient,
}

impl<S: Store> Manager<S> {
    pub fn new(store: S, remote: RemoteClient) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    /// Iterate over installed packages
    pub fn list_installed(&self) -> Box<dyn Iterator<Item = Result<PackageIdentity>> + '_> {
        self.store.enumerate(None)
    }

    /// Install a package
    ///
    /// `target` is either a path to a `.ptar` artifact or, with
    /// [`AddOptions::implicit_fetch`], the name of a package to download.
    /// Returns the installed identity.
    pub fn add(&self, target: &str, options: &AddOptions) -> Result<PackageIdentity> {
        options.policy.validate()?;

        let path = Path::new(target);
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if options.implicit_fetch && !base.ends_with(ARCHIVE_SUFFIX) {
            return self.add_remote(&base, options);
        }

        let identity = PackageIdentity::parse(&base)?;
        let platform = self.remote.platform();
        if identity.os() != platform.os || identity.arch() != platform.arch {
            warn!(package = %identity, platform = %platform, "Package built for another platform");
        }

        let decision = self.decide(&identity, &options.policy)?;
        let mut file = File::open(path).map_err(|e| path_error("Failed to open", path, e))?;
        self.evict_superseded(&decision)?;
        self.store.stage(&identity, &mut file)?;

        info!(package = %identity, source = target, "Added package");
        Ok(identity)
    }

    fn add_remote(&self, name: &str, options: &AddOptions) -> Result<PackageIdentity> {
        if name.is_empty() {
            return Err(bad_identity(name, "name is empty"));
        }

        let (name, version) = match &options.version {
            Some(version) => (name.to_string(), version.clone()),
            None => {
                let recipe = self.remote.fetch_recipe(name)?;
                (recipe.name, recipe.version)
            }
        };

        let platform = self.remote.platform();
        let identity = PackageIdentity::new(name, version, &platform.os, &platform.arch)?;
        let decision = self.decide(&identity, &options.policy)?;

        let mut response = self.remote.fetch_package(&identity)?;
        self.evict_superseded(&decision)?;
        self.store.stage(&identity, &mut response)?;

        info!(package = %identity, "Added package from repository");
        Ok(identity)
    }

    fn decide(&self, identity: &PackageIdentity, policy: &AddPolicy) -> Result<PolicyDecision> {
        resolve_version_policy(
            self.store.enumerate(Some(identity.name())),
            identity.name(),
            identity.version(),
            policy,
        )
    }

    fn evict_superseded(&self, decision: &PolicyDecision) -> Result<()> {
        for identity in &decision.to_evict {
            info!(package = %identity, "Removing superseded version");
            self.store.evict(identity)?;
        }
        Ok(())
    }

    /// Uninstall every package named `target`
    ///
    /// With [`RemoveOptions::all`] and an empty target every installed
    /// package is removed. Returns the removed identities, which is empty
    /// when nothing matched.
    pub fn remove(&self, target: &str, options: &RemoveOptions) -> Result<Vec<PackageIdentity>> {
        if !options.all && target.is_empty() {
            return Err(bad_identity(target, "name is empty"));
        }

        let filter = (!target.is_empty()).then_some(target);
        let matches = self
            .store
            .enumerate(filter)
            .collect::<Result<Vec<_>>>()?;

        for identity in &matches {
            self.store.evict(identity)?;
        }
        Ok(matches)
    }
}
