//! Package identity errors

use super::PkgError;

/// Creates a bad package name error
pub fn bad_identity(name: impl Into<String>, reason: impl Into<String>) -> PkgError {
    PkgError::BadIdentity {
        name: name.into(),
        reason: reason.into(),
    }
}
