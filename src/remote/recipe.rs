//! Recipe documents
//!
//! A recipe names the version of a package the repository currently
//! recommends:
//!
//! ```yaml
//! name: s3
//! version: v1.2.0
//! repository: https://github.com/example/s3-integration
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, manifest_decode_failed};

/// Recipe document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub version: String,
    pub repository: String,
}

impl Recipe {
    /// Decode a recipe fetched from `source`
    pub fn parse(bytes: &[u8], source: &str) -> Result<Self> {
        serde_yaml::from_slice(bytes).map_err(|e| manifest_decode_failed(source, e.to_string()))
    }
}
