//! Test fixtures for building package artifacts and stores.
//!
//! Most store and manager tests need a `.ptar` artifact with a valid
//! manifest inside a single restore point. Building one takes a single call:
//!
//! ```ignore
//! use crate::test_fixtures::{ArtifactBuilder, manifest_yaml};
//!
//! let bytes = ArtifactBuilder::new("snapshot")
//!     .file("manifest.yaml", &manifest_yaml("s3"))
//!     .executable("bin/s3-storage", "#!/bin/sh\n")
//!     .to_bytes();
//! ```

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::platform::Platform;
use crate::store::FlatStore;

/// A manifest with one storage connector at `bin/<name>-storage`
#[must_use]
pub fn manifest_yaml(name: &str) -> String {
    format!(
        "name: {name}\n\
         description: test package\n\
         api_version: v1.0.0\n\
         connectors:\n  \
           - type: storage\n    \
             protocols: [{name}]\n    \
             location_flags: [localfs]\n    \
             executable: bin/{name}-storage\n"
    )
}

/// Builds zip artifacts in memory
#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    root: String,
    entries: Vec<(String, Vec<u8>, u32)>,
}

impl ArtifactBuilder {
    /// Start an artifact whose files live under the restore point `root`
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            entries: Vec::new(),
        }
    }

    /// An artifact holding a valid package for `name`
    #[must_use]
    pub fn package(name: &str) -> Self {
        Self::new("snapshot")
            .file("manifest.yaml", &manifest_yaml(name))
            .executable(&format!("bin/{name}-storage"), "#!/bin/sh\n")
    }

    /// Add a file under the restore point
    #[must_use]
    pub fn file(self, path: &str, content: &str) -> Self {
        let full = format!("{}/{path}", self.root);
        self.entry(full, content, 0o644)
    }

    /// Add an executable file under the restore point
    #[must_use]
    pub fn executable(self, path: &str, content: &str) -> Self {
        let full = format!("{}/{path}", self.root);
        self.entry(full, content, 0o755)
    }

    /// Add a file at an exact path inside the container
    #[must_use]
    pub fn raw_file(self, path: &str, content: &str) -> Self {
        self.entry(path.to_string(), content, 0o644)
    }

    fn entry(mut self, path: String, content: &str, mode: u32) -> Self {
        self.entries.push((path, content.as_bytes().to_vec(), mode));
        self
    }

    /// Encode the artifact
    ///
    /// # Panics
    ///
    /// Panics if the zip cannot be written.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content, mode) in &self.entries {
            let options = SimpleFileOptions::default().unix_permissions(*mode);
            writer
                .start_file(path.as_str(), options)
                .expect("Failed to start zip entry");
            writer.write_all(content).expect("Failed to write zip entry");
        }
        writer
            .finish()
            .expect("Failed to finish zip")
            .into_inner()
    }

    /// Write the artifact to `path` and return it
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, self.to_bytes()).expect("Failed to write artifact");
        path.to_path_buf()
    }
}

/// Create a temp directory holding an empty store for linux/amd64
///
/// # Panics
///
/// Panics if the store directories cannot be created.
#[must_use]
pub fn create_store() -> (TempDir, FlatStore) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let store = FlatStore::new(
        temp.path().join("packages"),
        temp.path().join("cache"),
        Platform::new("linux", "amd64"),
    )
    .expect("Failed to create store");
    (temp, store)
}

/// Sorted names of the visible and hidden entries of `dir`
///
/// # Panics
///
/// Panics if the directory cannot be read.
#[must_use]
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    #[test]
    fn test_manifest_yaml_is_valid() {
        let manifest =
            Manifest::parse(manifest_yaml("s3").as_bytes(), &Platform::new("linux", "amd64"))
                .unwrap();
        assert_eq!(manifest.name, "s3");
        assert_eq!(manifest.connectors[0].executable, "bin/s3-storage");
    }

    #[test]
    fn test_create_store() {
        let (temp, _store) = create_store();
        assert!(temp.path().join("packages").is_dir());
        assert!(temp.path().join("cache").is_dir());
    }
}
