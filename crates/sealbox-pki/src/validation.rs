//! Field-level validation for action configurations.
//!
//! Failures are data intended for display next to the offending input;
//! nothing in this module returns an error or mutates the record.

use sealbox_types::action::ActionConfig;
use sealbox_types::schema;
use serde::Serialize;

/// Name both issuers and keys fall back to server-side; user-assigned names
/// must never collide with it.
pub const RESERVED_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationCode {
    #[serde(rename = "missing_required_field")]
    MissingRequiredField,
    #[serde(rename = "reserved_value")]
    ReservedValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub code: ValidationCode,
    pub message: String,
}

/// Evaluate a configuration against the form rules. Re-runnable before every
/// submission attempt; each rule is independent of the others.
pub fn validate(config: &ActionConfig) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    for field in schema::required_fields() {
        if required_value_missing(config, field.name) {
            failures.push(ValidationFailure {
                field: field.name,
                code: ValidationCode::MissingRequiredField,
                message: format!("{} is required.", field.label),
            });
        }
    }

    // The reserved-name rule applies to issuer names only when a new root is
    // being minted, but to key names for every workflow.
    if config.action_type.is_root_generation()
        && config.issuer_name.as_deref() == Some(RESERVED_NAME)
    {
        failures.push(ValidationFailure {
            field: "issuer_name",
            code: ValidationCode::ReservedValue,
            message: format!(
                "Issuer name must not be the reserved name \"{}\".",
                RESERVED_NAME
            ),
        });
    }

    if config.key_name.as_deref() == Some(RESERVED_NAME) {
        failures.push(ValidationFailure {
            field: "key_name",
            code: ValidationCode::ReservedValue,
            message: format!(
                "Key name must not be the reserved name \"{}\".",
                RESERVED_NAME
            ),
        });
    }

    failures
}

pub fn is_valid(config: &ActionConfig) -> bool {
    validate(config).is_empty()
}

fn required_value_missing(config: &ActionConfig, name: &str) -> bool {
    match name {
        "type" => config.kind.is_none(),
        "common_name" => config
            .common_name
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty(),
        // Remaining schema fields are optional; nothing to check.
        _ => false,
    }
}
