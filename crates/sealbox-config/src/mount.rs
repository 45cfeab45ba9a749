use sealbox_error::SealboxError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_mount_path() -> String {
    "pki".to_string()
}

/// Settings for one PKI secrets-engine instance, as seen by the console.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MountConfig {
    /// Base path under which the engine is exposed
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Human-facing name shown by the console
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mount_path: default_mount_path(),
            display_name: None,
        }
    }
}

impl FromStr for MountConfig {
    type Err = SealboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_yaml_ng::from_str(s).map_err(|e| SealboxError::ConfigError(e.to_string()))
    }
}

impl MountConfig {
    /// Load the mount config from a file
    pub fn from_file(path: &str) -> Result<Self, SealboxError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SealboxError::ConfigError(e.to_string()))?;
        Self::from_str(&content)
    }

    /// Store the mount config in the store
    pub fn store(&self) -> Result<(), SealboxError> {
        sealbox_store::insert(sealbox_store::KEY_MOUNT_CONFIG, self.clone());
        Ok(())
    }

    /// Get the mount config from the store
    pub fn get() -> Result<Self, SealboxError> {
        sealbox_store::get(sealbox_store::KEY_MOUNT_CONFIG).ok_or(SealboxError::ConfigError(
            "Mount config not found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
mount_path: ns1/pki-root
display_name: Root authority
"#;
        let config = MountConfig::from_str(yaml).unwrap();
        assert_eq!(config.mount_path, "ns1/pki-root");
        assert_eq!(config.display_name.as_deref(), Some("Root authority"));
    }

    #[test]
    fn test_mount_path_defaults_to_pki() {
        let config = MountConfig::from_str("display_name: Engine").unwrap();
        assert_eq!(config.mount_path, "pki");

        assert_eq!(MountConfig::default().mount_path, "pki");
    }

    #[test]
    fn test_store_round_trip() {
        let config = MountConfig {
            mount_path: "pki-store-test".to_string(),
            display_name: None,
        };
        config.store().unwrap();
        assert_eq!(MountConfig::get().unwrap().mount_path, "pki-store-test");
    }
}
