//! Error types and handling for kpkg
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`package`]: Package identity errors
//! - [`manifest`]: Manifest decoding and validation errors
//! - [`policy`]: Version policy errors
//! - [`remote`]: Repository and catalog fetch errors
//! - [`fs`]: File system errors

pub mod fs;
pub mod manifest;
pub mod package;
pub mod policy;
pub mod remote;

pub use fs::path_error;
pub use manifest::{decode_failed as manifest_decode_failed, unknown_flag, unsafe_executable};
pub use package::bad_identity;
pub use policy::{already_installed, invalid_options};
pub use remote::{authorization_required, fetch_failed, http_error};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for kpkg operations
#[derive(Error, Diagnostic, Debug)]
pub enum PkgError {
    // Package identity errors
    #[error("Invalid package name {name:?}: {reason}")]
    #[diagnostic(
        code(kpkg::package::bad_identity),
        help("Package files are named NAME_VERSION_OS_ARCH.ptar, e.g. s3_v1.0.0_linux_amd64.ptar")
    )]
    BadIdentity { name: String, reason: String },

    #[error("Package '{name}' is not installed")]
    #[diagnostic(
        code(kpkg::package::not_installed),
        help("Run 'kpkg list' to see installed packages")
    )]
    NotInstalled { name: String },

    // Manifest errors
    #[error("Failed to decode the manifest {path}: {reason}")]
    #[diagnostic(code(kpkg::manifest::decode_failed))]
    ManifestDecode { path: String, reason: String },

    #[error("Bad executable path {executable:?}")]
    #[diagnostic(
        code(kpkg::manifest::unsafe_executable),
        help("Connector executables must be relative paths inside the package")
    )]
    UnsafeExecutablePath { executable: String },

    #[error("Unknown location flag {flag:?}")]
    #[diagnostic(
        code(kpkg::manifest::unknown_flag),
        help("Supported flags: localfs, file, stream, needack")
    )]
    UnknownLocationFlag { flag: String },

    #[error("Package rejected by host: {reason}")]
    #[diagnostic(code(kpkg::manifest::hook_rejected))]
    HookRejected { reason: String },

    // Version policy errors
    #[error("Package '{name}' is already installed (version {version})")]
    #[diagnostic(
        code(kpkg::policy::already_installed),
        help("Use --upgrade, --downgrade, --replace or --allow-multiple to change the installed version")
    )]
    AlreadyInstalled { name: String, version: String },

    #[error("Invalid options: {reason}")]
    #[diagnostic(code(kpkg::policy::invalid_options))]
    InvalidPolicyOptions { reason: String },

    // Remote errors
    #[error("Authorization required for {url}")]
    #[diagnostic(
        code(kpkg::remote::authorization_required),
        help("Set KPKG_TOKEN or the 'token' configuration key")
    )]
    AuthorizationRequired { url: String },

    #[error("Non-OK status code while fetching {url}: {status} {reason}")]
    #[diagnostic(code(kpkg::remote::fetch_failed))]
    RemoteFetchFailed {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("HTTP request to {url} failed: {reason}")]
    #[diagnostic(code(kpkg::remote::http))]
    Http { url: String, reason: String },

    // Archive errors
    #[error("Archive {path} has {count} restore points, expected exactly one")]
    #[diagnostic(code(kpkg::archive::inconsistent))]
    ArchiveInconsistent { path: String, count: usize },

    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(code(kpkg::archive::extract_failed))]
    Archive { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(kpkg::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(kpkg::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(kpkg::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("{operation} {path}: {reason}")]
    #[diagnostic(code(kpkg::fs::path))]
    Path {
        operation: String,
        path: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(kpkg::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PkgError {
    fn from(err: std::io::Error) -> Self {
        PkgError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PkgError {
    fn from(err: serde_yaml::Error) -> Self {
        PkgError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PkgError {
    fn from(err: serde_json::Error) -> Self {
        PkgError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for PkgError {
    fn from(err: inquire::InquireError) -> Self {
        PkgError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PkgError>;
