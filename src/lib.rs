//! kpkg - integration package manager
//!
//! Installs versioned integration packages (`.ptar` artifacts) into a local
//! store, keeps an extracted copy of each ready for use and enforces a
//! version policy when several versions of a package meet.
//!
//! - [`package`]: package identities and the canonical file naming scheme
//! - [`manifest`]: the manifest shipped inside every package
//! - [`archive`]: reading artifacts
//! - [`store`]: the on-disk store with atomic staging
//! - [`manager`]: add, remove and query on top of a store
//! - [`remote`]: the package repository and integration catalog

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod manifest;
pub mod package;
pub mod platform;
pub mod progress;
pub mod remote;
pub mod store;

#[cfg(test)]
mod test_fixtures;

pub use error::{PkgError, Result};
