//! Integration catalog documents

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog entry describing one integration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Integration {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub homepage: String,
    pub repository: String,
    pub license: String,
    pub tags: Vec<String>,
    pub api_version: String,
    pub latest_version: String,
    pub stage: String,
    pub types: IntegrationTypes,
    /// README location
    pub documentation: String,
    pub icon: String,
    pub featured: String,
    pub installation: Installation,
}

/// Kinds of connectors an integration provides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationTypes {
    pub storage: bool,
    pub source: bool,
    pub destination: bool,
    pub provider: bool,
}

impl IntegrationTypes {
    pub fn provides(&self, kind: IntegrationType) -> bool {
        match kind {
            IntegrationType::Storage => self.storage,
            IntegrationType::Source => self.source,
            IntegrationType::Destination => self.destination,
            IntegrationType::Provider => self.provider,
        }
    }
}

/// One kind of integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IntegrationType {
    Storage,
    Source,
    Destination,
    Provider,
}

/// Local installation state of an integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Installation {
    #[serde(deserialize_with = "lenient_status")]
    pub status: InstallationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationStatus {
    Installed,
    #[default]
    NotInstalled,
}

impl fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => write!(f, "installed"),
            Self::NotInstalled => write!(f, "not-installed"),
        }
    }
}

// remote documents may leave the status empty
fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<InstallationStatus, D::Error> {
    let status = Option::<String>::deserialize(deserializer)?;
    Ok(match status.as_deref() {
        Some("installed") => InstallationStatus::Installed,
        _ => InstallationStatus::NotInstalled,
    })
}

/// Catalog document served by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationIndex {
    pub integrations: Vec<Integration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_index() {
        let json = r#"{
            "integrations": [
                {
                    "id": "s3",
                    "name": "s3",
                    "display_name": "Amazon S3",
                    "tags": ["cloud"],
                    "latest_version": "v1.2.0",
                    "types": {"storage": true, "source": true},
                    "installation": {"status": "", "available": false}
                },
                {"id": "fs", "name": "fs"}
            ]
        }"#;
        let index: IntegrationIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index.integrations.len(), 2);

        let s3 = &index.integrations[0];
        assert_eq!(s3.display_name, "Amazon S3");
        assert!(s3.types.provides(IntegrationType::Storage));
        assert!(!s3.types.provides(IntegrationType::Destination));
        assert_eq!(s3.installation.status, InstallationStatus::NotInstalled);
    }

    #[test]
    fn test_serialize_installation() {
        let installation = Installation {
            status: InstallationStatus::Installed,
            version: Some("v1.0.0".to_string()),
            available: true,
        };
        let json = serde_json::to_value(&installation).unwrap();
        assert_eq!(json["status"], "installed");
        assert_eq!(json["version"], "v1.0.0");

        let json = serde_json::to_value(Installation::default()).unwrap();
        assert_eq!(json["status"], "not-installed");
        assert!(json.get("version").is_none());
    }
}
