//! Package identity
//!
//! An installed package is identified by four fields: name, version,
//! operating system and architecture. The identity is serialized into the
//! artifact file name `{name}_{version}_{os}_{arch}.ptar`, which is a stable,
//! externally visible format.

pub mod version;

use std::fmt;

use crate::error::{Result, bad_identity};

/// Extension of package artifacts
pub const ARCHIVE_EXTENSION: &str = "ptar";

/// Suffix of package artifact file names
pub const ARCHIVE_SUFFIX: &str = ".ptar";

/// Plugin API version implemented by this host
pub const PLUGIN_API_VERSION: &str = "v1.0.0";

/// Identity of an installed (or installable) package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageIdentity {
    name: String,
    version: String,
    os: String,
    arch: String,
}

impl PackageIdentity {
    /// Create a validated package identity
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        os: impl Into<String>,
        arch: impl Into<String>,
    ) -> Result<Self> {
        let identity = Self {
            name: name.into(),
            version: version.into(),
            os: os.into(),
            arch: arch.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Parse an artifact file name such as `s3_v1.0.0_linux_amd64.ptar`
    pub fn parse(file_name: &str) -> Result<Self> {
        let base = file_name
            .strip_suffix(ARCHIVE_SUFFIX)
            .ok_or_else(|| bad_identity(file_name, "does not end with .ptar"))?;

        let atoms: Vec<&str> = base.split('_').collect();
        let [name, version, os, arch] = atoms.as_slice() else {
            return Err(bad_identity(
                file_name,
                format!("is malformed: expected 4 fields, found {}", atoms.len()),
            ));
        };

        let identity = Self {
            name: (*name).to_string(),
            version: (*version).to_string(),
            os: (*os).to_string(),
            arch: (*arch).to_string(),
        };
        identity.validate().map_err(|err| match err {
            crate::error::PkgError::BadIdentity { reason, .. } => bad_identity(file_name, reason),
            other => other,
        })?;
        Ok(identity)
    }

    /// Check every field against its character set
    pub fn validate(&self) -> Result<()> {
        let base = self.base_name();

        if self.name.is_empty() {
            return Err(bad_identity(base, "name is empty"));
        }
        check_chars(&base, "name", &self.name, is_name_char)?;

        if !version::is_valid(&self.version) {
            return Err(bad_identity(
                base,
                format!("invalid version {:?}", self.version),
            ));
        }

        if self.os.is_empty() {
            return Err(bad_identity(base, "operating system is empty"));
        }
        check_chars(&base, "operating system", &self.os, is_os_arch_char)?;

        if self.arch.is_empty() {
            return Err(bad_identity(base, "architecture is empty"));
        }
        check_chars(&base, "architecture", &self.arch, is_os_arch_char)?;

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Canonical name without the archive extension
    pub fn base_name(&self) -> String {
        format!("{}_{}_{}_{}", self.name, self.version, self.os, self.arch)
    }

    /// Canonical artifact file name
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name(), ARCHIVE_SUFFIX)
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}/{})", self.name, self.version, self.os, self.arch)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn is_os_arch_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn check_chars(base: &str, field: &str, value: &str, allowed: fn(char) -> bool) -> Result<()> {
    match value.chars().find(|c| !allowed(*c)) {
        Some(c) => Err(bad_identity(
            base,
            format!("{field} {value:?} contains invalid char '{c}'"),
        )),
        None => Ok(()),
    }
}
