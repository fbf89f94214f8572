//! Manifest errors

use super::PkgError;

/// Creates a manifest decode error
pub fn decode_failed(path: impl Into<String>, reason: impl Into<String>) -> PkgError {
    PkgError::ManifestDecode {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an unsafe executable path error
pub fn unsafe_executable(executable: impl Into<String>) -> PkgError {
    PkgError::UnsafeExecutablePath {
        executable: executable.into(),
    }
}

/// Creates an unknown location flag error
pub fn unknown_flag(flag: impl Into<String>) -> PkgError {
    PkgError::UnknownLocationFlag { flag: flag.into() }
}
