//! Integration catalog queries

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use super::Manager;
use crate::error::Result;
use crate::package::{PLUGIN_API_VERSION, version};
use crate::remote::{Installation, InstallationStatus, Integration, IntegrationType};
use crate::store::Store;

/// Filters of [`Manager::query`]
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub kind: Option<IntegrationType>,
    pub tag: Option<String>,
    pub status: Option<InstallationStatus>,
    /// Skip the remote catalog
    pub only_local: bool,
}

impl QueryOptions {
    fn matches(&self, integration: &Integration) -> bool {
        if let Some(kind) = self.kind {
            if !integration.types.provides(kind) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !integration.tags.contains(tag) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if integration.installation.status != status {
                return false;
            }
        }
        true
    }
}

impl<S: Store> Manager<S> {
    /// List integrations, installed or available, sorted by name
    pub fn query(&self, options: &QueryOptions) -> Result<Vec<Integration>> {
        let mut integrations: HashMap<String, Integration> = HashMap::new();

        for identity in self.store.enumerate(None) {
            let identity = identity?;
            let local = Integration {
                id: identity.name().to_string(),
                name: identity.name().to_string(),
                display_name: identity.name().to_string(),
                api_version: PLUGIN_API_VERSION.to_string(),
                installation: Installation {
                    status: InstallationStatus::Installed,
                    version: Some(identity.version().to_string()),
                    available: false,
                },
                ..Default::default()
            };

            match integrations.entry(identity.name().to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(local);
                }
                // several versions installed: report the highest
                Entry::Occupied(mut entry) => {
                    let current = entry.get().installation.version.as_deref().unwrap_or_default();
                    if version::compare(identity.version(), current).is_gt() {
                        entry.insert(local);
                    }
                }
            }
        }

        if !options.only_local {
            let catalog = self.remote.fetch_catalog()?;
            debug!(entries = catalog.len(), "Fetched catalog");
            for mut remote in catalog {
                if let Some(local) = integrations.get_mut(&remote.id) {
                    merge_remote(local, remote);
                } else {
                    remote.installation.status = InstallationStatus::NotInstalled;
                    remote.installation.available = true;
                    integrations.insert(remote.id.clone(), remote);
                }
            }
        }

        let mut result: Vec<Integration> = integrations
            .into_values()
            .filter(|integration| options.matches(integration))
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

/// Fill an installed entry with the catalog metadata
fn merge_remote(local: &mut Integration, remote: Integration) {
    local.id = remote.id;
    local.display_name = remote.display_name;
    local.description = remote.description;
    local.homepage = remote.homepage;
    local.repository = remote.repository;
    local.license = remote.license;
    local.tags = remote.tags;
    local.latest_version = remote.latest_version;
    local.stage = remote.stage;
    local.types = remote.types;
    local.documentation = remote.documentation;
    local.icon = remote.icon;
    local.featured = remote.featured;
    local.installation.available = true;
}
