//! Version policy errors

use super::PkgError;

/// Creates an already installed error
pub fn already_installed(name: impl Into<String>, version: impl Into<String>) -> PkgError {
    PkgError::AlreadyInstalled {
        name: name.into(),
        version: version.into(),
    }
}

/// Creates an invalid policy options error
pub fn invalid_options(reason: impl Into<String>) -> PkgError {
    PkgError::InvalidPolicyOptions {
        reason: reason.into(),
    }
}
