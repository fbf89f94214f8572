//! Repository and catalog fetch errors

use super::PkgError;

/// Creates an authorization required error
pub fn authorization_required(url: impl Into<String>) -> PkgError {
    PkgError::AuthorizationRequired { url: url.into() }
}

/// Creates a non-OK status error
pub fn fetch_failed(url: impl Into<String>, status: u16, reason: impl Into<String>) -> PkgError {
    PkgError::RemoteFetchFailed {
        url: url.into(),
        status,
        reason: reason.into(),
    }
}

/// Creates a transport-level HTTP error
pub fn http_error(url: impl Into<String>, reason: impl std::fmt::Display) -> PkgError {
    PkgError::Http {
        url: url.into(),
        reason: reason.to_string(),
    }
}
