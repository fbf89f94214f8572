//! Package manifest (manifest.yaml) data structures
//!
//! Every package carries a manifest at the root of its extracted contents.
//! It describes the integration and the connectors it provides. Loading a
//! manifest also validates it: connector executables must stay inside the
//! package directory and location flags must be known.

mod flags;

pub use flags::LocationFlags;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, manifest_decode_failed, path_error, unsafe_executable};
use crate::platform::Platform;

/// File name of the manifest inside a package
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Package manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub homepage: String,
    pub license: String,
    pub tags: Vec<String>,
    pub api_version: String,
    pub connectors: Vec<Connector>,
}

/// A connector provided by a package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connector {
    #[serde(rename = "type")]
    pub kind: String,
    pub protocols: Vec<String>,
    pub location_flags: Vec<String>,
    /// Executable path, relative to the manifest directory
    pub executable: String,
    pub args: Vec<String>,
    pub extra_files: Vec<String>,
}

impl Connector {
    /// Parse the declared location flags
    pub fn flags(&self) -> Result<LocationFlags> {
        LocationFlags::parse_all(&self.location_flags)
    }
}

impl Manifest {
    /// Decode a manifest
    ///
    /// On Windows targets every connector executable is given the `.exe`
    /// suffix if it does not already have it.
    pub fn parse(bytes: &[u8], platform: &Platform) -> Result<Self> {
        let mut manifest: Self = serde_yaml::from_slice(bytes)
            .map_err(|e| manifest_decode_failed(MANIFEST_FILE, e.to_string()))?;

        let suffix = platform.executable_suffix();
        if !suffix.is_empty() {
            for connector in &mut manifest.connectors {
                if !connector.executable.ends_with(suffix) {
                    connector.executable.push_str(suffix);
                }
            }
        }

        Ok(manifest)
    }

    /// Read, decode and validate the manifest at `path`
    pub fn load(path: &Path, platform: &Platform) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| path_error("Failed to read manifest", path, e))?;
        let manifest = Self::parse(&bytes, platform).map_err(|err| match err {
            crate::error::PkgError::ManifestDecode { reason, .. } => {
                manifest_decode_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.validate(dir)?;
        Ok(manifest)
    }

    /// Validate every connector against the manifest directory
    pub fn validate(&self, manifest_dir: &Path) -> Result<()> {
        for connector in &self.connectors {
            validate_connector_path(manifest_dir, connector)?;
            connector.flags()?;
        }
        Ok(())
    }

    /// Name to show to users
    pub fn title(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Resolve a connector executable and check it stays inside `manifest_dir`
///
/// Returns the resolved executable path.
pub fn validate_connector_path(manifest_dir: &Path, connector: &Connector) -> Result<PathBuf> {
    let dir = clean(manifest_dir);
    let executable = Path::new(&connector.executable);
    if executable.is_absolute() || executable.has_root() {
        return Err(unsafe_executable(&connector.executable));
    }

    let resolved = clean(&dir.join(executable));
    if !resolved.starts_with(&dir) {
        return Err(unsafe_executable(&connector.executable));
    }
    Ok(resolved)
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent
fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}
