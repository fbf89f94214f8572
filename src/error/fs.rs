//! File system errors

use std::path::Path;

use super::PkgError;

/// Creates an error for a failed operation on a specific path
pub fn path_error(operation: &str, path: &Path, err: impl std::fmt::Display) -> PkgError {
    PkgError::Path {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
