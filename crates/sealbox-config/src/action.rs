//! Loading of action configuration files for the console CLI. The record's
//! shape and defaults live in `sealbox-types`; this module only maps file
//! and parse errors.

use sealbox_error::SealboxError;
use sealbox_types::action::ActionConfig;

pub fn from_str(s: &str) -> Result<ActionConfig, SealboxError> {
    serde_yaml_ng::from_str(s).map_err(|e| SealboxError::ConfigError(e.to_string()))
}

pub fn from_file(path: &str) -> Result<ActionConfig, SealboxError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SealboxError::ConfigError(format!("Unable to read action file {:?}: {}", path, e))
    })?;
    from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealbox_types::action::{ActionType, KeySource};

    #[test]
    fn test_parse_action_file() {
        let yaml = r#"
action_type: generate-intermediate
type: existing
common_name: Intermediate CA
key_ref: root-key-2024
alt_names: "ca.example.com"
"#;
        let config = from_str(yaml).unwrap();
        assert_eq!(config.action_type, ActionType::GenerateIntermediate);
        assert_eq!(config.kind, Some(KeySource::Existing));
        assert_eq!(config.common_name.as_deref(), Some("Intermediate CA"));
        assert_eq!(config.key_ref, "root-key-2024");
        assert_eq!(config.alt_names, vec!["ca.example.com"]);
    }

    #[test]
    fn test_unknown_action_type_is_an_error() {
        let err = from_str("action_type: revoke-everything").unwrap_err();
        assert!(matches!(err, SealboxError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = from_file("/nonexistent/action.yaml").unwrap_err();
        assert!(matches!(err, SealboxError::ConfigError(_)));
    }
}
