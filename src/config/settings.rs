//! User settings (config.yaml)
//!
//! ```yaml
//! package_dir: /opt/kpkg/packages
//! cache_dir: /var/cache/kpkg
//! repository_url: https://plugins.plakar.io
//! api_url: https://api.plakar.io
//! binary_needs_auth: false
//! user_agent: myhost/v1.2.0
//! token: ...
//! platform:
//!   os: linux
//!   arch: arm64
//! ```
//!
//! Every key is optional. Environment variables take precedence over the
//! file:
//!
//! | Variable          | Effect                                         |
//! |-------------------|------------------------------------------------|
//! | `KPKG_CONFIG`     | settings file to read                          |
//! | `KPKG_HOME`       | root of `packages/` and `cache/`               |
//! | `KPKG_REPOSITORY` | `repository_url`                               |
//! | `KPKG_API_URL`    | `api_url`                                      |
//! | `KPKG_TOKEN`      | `token`                                        |

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{PkgError, Result};
use crate::platform::Platform;
use crate::remote::{DEFAULT_API_URL, DEFAULT_REPOSITORY_URL, RemoteOptions, default_user_agent};

/// Application directory name under the platform directories
const APP_DIR: &str = "kpkg";

/// Settings file name
pub const CONFIG_FILE: &str = "config.yaml";

pub const ENV_CONFIG: &str = "KPKG_CONFIG";
pub const ENV_HOME: &str = "KPKG_HOME";
pub const ENV_REPOSITORY: &str = "KPKG_REPOSITORY";
pub const ENV_API_URL: &str = "KPKG_API_URL";
pub const ENV_TOKEN: &str = "KPKG_TOKEN";

/// Settings read from config.yaml and the environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Artifact downloads require a token
    pub binary_needs_auth: bool,

    /// Product name announced to the repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Bearer token for the repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Target platform, defaults to the platform kpkg was built for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load settings and apply the process environment
    ///
    /// `explicit` (or `KPKG_CONFIG`) must point at an existing file. The
    /// default location may be absent, in which case defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`Settings::load`] with an injectable environment
    pub fn load_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(ENV_CONFIG).filter(|v| !v.is_empty()).map(PathBuf::from));

        let mut settings = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(PkgError::ConfigNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::from_file(&path)?
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        settings.apply_env(env);
        settings.validate()?;
        Ok(settings)
    }

    /// Read a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PkgError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            PkgError::ConfigParseFailed { reason, .. } => PkgError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| env(key).filter(|value| !value.is_empty());

        if let Some(home) = var(ENV_HOME) {
            let home = PathBuf::from(home);
            self.package_dir = Some(home.join("packages"));
            self.cache_dir = Some(home.join("cache"));
        }
        if let Some(url) = var(ENV_REPOSITORY) {
            self.repository_url = Some(url);
        }
        if let Some(url) = var(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(token) = var(ENV_TOKEN) {
            self.token = Some(token);
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("repository_url", &self.repository_url),
            ("api_url", &self.api_url),
        ] {
            if let Some(url) = value {
                Url::parse(url).map_err(|e| PkgError::ConfigInvalid {
                    message: format!("{key} {url:?} is not a valid URL: {e}"),
                })?;
            }
        }

        if let Some(platform) = &self.platform {
            if platform.os.is_empty() || platform.arch.is_empty() {
                return Err(PkgError::ConfigInvalid {
                    message: "platform needs both os and arch".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Directory holding committed packages
    pub fn package_dir(&self) -> Result<PathBuf> {
        match &self.package_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("packages")),
        }
    }

    /// Directory holding extracted packages
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("cache")),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform.clone().unwrap_or_default()
    }

    /// Options of the repository client
    pub fn remote_options(&self) -> RemoteOptions {
        RemoteOptions {
            repository_url: self
                .repository_url
                .clone()
                .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string()),
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            binary_needs_auth: self.binary_needs_auth,
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
            platform: self.platform(),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| PkgError::ConfigInvalid {
            message: "Could not determine the data directory, set KPKG_HOME".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_yaml() {
        let settings = Settings::from_yaml(
            "package_dir: /opt/pkgs\nbinary_needs_auth: true\nplatform:\n  os: windows\n  arch: amd64\n",
        )
        .unwrap();
        assert_eq!(settings.package_dir, Some(PathBuf::from("/opt/pkgs")));
        assert!(settings.binary_needs_auth);
        assert!(settings.platform().is_windows());
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = Settings::from_yaml("binary_needs_auth: [").unwrap_err();
        assert!(matches!(err, PkgError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings {
            repository_url: Some("https://file.example".to_string()),
            ..Default::default()
        };
        settings.apply_env(env(&[
            (ENV_HOME, "/srv/kpkg"),
            (ENV_REPOSITORY, "https://env.example"),
            (ENV_TOKEN, "t0k3n"),
            (ENV_API_URL, ""),
        ]));

        assert_eq!(settings.package_dir().unwrap(), PathBuf::from("/srv/kpkg/packages"));
        assert_eq!(settings.cache_dir().unwrap(), PathBuf::from("/srv/kpkg/cache"));
        assert_eq!(settings.repository_url.as_deref(), Some("https://env.example"));
        assert_eq!(settings.token.as_deref(), Some("t0k3n"));
        assert_eq!(settings.api_url, None);
    }

    #[test]
    fn test_remote_options_defaults() {
        let settings = Settings {
            platform: Some(Platform::new("linux", "arm64")),
            ..Default::default()
        };
        let options = settings.remote_options();
        assert_eq!(options.repository_url, DEFAULT_REPOSITORY_URL);
        assert_eq!(options.api_url, DEFAULT_API_URL);
        assert_eq!(options.user_agent, default_user_agent());
        assert_eq!(options.platform, Platform::new("linux", "arm64"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let settings = Settings {
            api_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PkgError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Settings::load_with(Some(temp.path().join("nope.yaml").as_path()), env(&[]))
            .unwrap_err();
        assert!(matches!(err, PkgError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_config_variable() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "user_agent: host/v2\n").unwrap();

        let settings =
            Settings::load_with(None, env(&[(ENV_CONFIG, path.to_str().unwrap())])).unwrap();
        assert_eq!(settings.user_agent.as_deref(), Some("host/v2"));
    }

    #[test]
    fn test_load_reports_file_on_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "platform: [").unwrap();

        let err = Settings::load_with(Some(path.as_path()), env(&[])).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    #[serial]
    fn test_load_reads_process_environment() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "binary_needs_auth: true\n").unwrap();

        unsafe {
            std::env::set_var(ENV_CONFIG, &path);
            std::env::set_var(ENV_HOME, temp.path());
        }
        let settings = Settings::load(None);
        unsafe {
            std::env::remove_var(ENV_CONFIG);
            std::env::remove_var(ENV_HOME);
        }

        let settings = settings.unwrap();
        assert!(settings.binary_needs_auth);
        assert_eq!(settings.package_dir().unwrap(), temp.path().join("packages"));
    }
}
