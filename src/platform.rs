//! Target platform of installed packages
//!
//! The platform is an explicit value carried by the configuration and passed
//! to every operation that depends on it (artifact selection, executable
//! suffixing, user agent). Nothing reads it from the process environment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system and architecture pair, using Go-style names
/// (`linux`, `darwin`, `windows`, `amd64`, `arm64`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Platform this binary was compiled for
    pub fn host() -> Self {
        Self::new(
            go_os_name(std::env::consts::OS),
            go_arch_name(std::env::consts::ARCH),
        )
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Suffix executables must carry on this platform
    pub fn executable_suffix(&self) -> &'static str {
        if self.is_windows() { ".exe" } else { "" }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

fn go_os_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        other => other,
    }
}
