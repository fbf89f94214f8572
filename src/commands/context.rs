//! Wiring shared by every command: settings, store and repository client

use std::path::Path;

use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::manager::Manager;
use crate::remote::{BearerAuthorizer, RemoteClient};
use crate::store::{ApiVersionGate, FlatStore};

/// Build a manager from the settings at `config` and the environment
pub fn open_manager(config: Option<&Path>) -> Result<Manager<FlatStore>> {
    let settings = Settings::load(config)?;
    manager_from_settings(&settings)
}

pub fn manager_from_settings(settings: &Settings) -> Result<Manager<FlatStore>> {
    let store = open_store(settings)?;

    let mut remote = RemoteClient::new(settings.remote_options())?;
    if let Some(token) = &settings.token {
        remote = remote.with_authorizer(BearerAuthorizer::from_token(token.clone()));
    }
    debug!(user_agent = remote.user_agent(), "Repository client ready");

    Ok(Manager::new(store, remote))
}

/// Open the store only, for commands that never reach the repository
pub fn open_store(settings: &Settings) -> Result<FlatStore> {
    let store = FlatStore::new(
        settings.package_dir()?,
        settings.cache_dir()?,
        settings.platform(),
    )?
    .with_hooks(ApiVersionGate::default());

    debug!(
        pkgdir = %store.pkgdir().display(),
        cachedir = %store.cachedir().display(),
        platform = %store.platform(),
        "Opened store"
    );
    Ok(store)
}
