//! Common test utilities for kpkg integration tests

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Unreachable repository, for tests that must not touch the network
pub const OFFLINE_URL: &str = "http://127.0.0.1:9";

/// A throwaway kpkg home with its own configuration
pub struct TestHome {
    /// Temporary directory
    pub temp: TempDir,
    /// Root of the home (KPKG_HOME)
    pub path: PathBuf,
    /// Configuration file (KPKG_CONFIG)
    pub config: PathBuf,
}

impl TestHome {
    /// Create a home pinned to linux/amd64
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("home");
        let config = temp.path().join("config.yaml");
        fs::write(&config, "platform:\n  os: linux\n  arch: amd64\n")
            .expect("Failed to write config");
        Self { temp, path, config }
    }

    /// A kpkg command isolated from the developer's environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kpkg").expect("Failed to find kpkg binary");
        cmd.env("KPKG_HOME", &self.path)
            .env("KPKG_CONFIG", &self.config)
            .env("KPKG_REPOSITORY", OFFLINE_URL)
            .env("KPKG_API_URL", OFFLINE_URL)
            .env_remove("KPKG_TOKEN")
            .env_remove("KPKG_LOG");
        cmd
    }

    /// Same as [`TestHome::cmd`] with both repository URLs pointing at `url`
    pub fn cmd_with_remote(&self, url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("KPKG_REPOSITORY", url).env("KPKG_API_URL", url);
        cmd
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.path.join("packages")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("cache")
    }

    /// Write a valid artifact for `name`/`version` and return its path
    pub fn artifact(&self, name: &str, version: &str) -> PathBuf {
        let path = self
            .temp
            .path()
            .join("downloads")
            .join(file_name(name, version));
        fs::create_dir_all(path.parent().expect("artifact has a parent"))
            .expect("Failed to create downloads directory");
        fs::write(&path, package_bytes(name)).expect("Failed to write artifact");
        path
    }

    /// Install `name`/`version` from a local artifact
    pub fn install(&self, name: &str, version: &str) {
        let artifact = self.artifact(name, version);
        self.cmd()
            .args(["add", artifact.to_str().expect("utf-8 path")])
            .assert()
            .success();
    }

    /// Names in the package directory, sorted
    pub fn installed(&self) -> Vec<String> {
        dir_entries(&self.packages_dir())
    }

    /// Append to the configuration file
    pub fn configure(&self, yaml: &str) {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.config)
            .expect("Failed to open config");
        file.write_all(yaml.as_bytes())
            .expect("Failed to write config");
    }
}

/// Canonical linux/amd64 file name
pub fn file_name(name: &str, version: &str) -> String {
    format!("{name}_{version}_linux_amd64.ptar")
}

/// Zip-encoded package with a manifest and one storage connector
pub fn package_bytes(name: &str) -> Vec<u8> {
    let manifest = format!(
        "name: {name}\n\
         description: test package\n\
         api_version: v1.0.0\n\
         connectors:\n  \
           - type: storage\n    \
             protocols: [{name}]\n    \
             location_flags: [localfs]\n    \
             executable: bin/{name}-storage\n"
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content, mode) in [
        ("snapshot/manifest.yaml".to_string(), manifest, 0o644),
        (
            format!("snapshot/bin/{name}-storage"),
            "#!/bin/sh\n".to_string(),
            0o755,
        ),
    ] {
        writer
            .start_file(path, SimpleFileOptions::default().unix_permissions(mode))
            .expect("Failed to start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write zip entry");
    }
    writer
        .finish()
        .expect("Failed to finish zip")
        .into_inner()
}

/// Sorted entry names of `dir`, empty when it does not exist
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
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
