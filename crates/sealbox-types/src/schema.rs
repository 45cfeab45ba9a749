//! Declarative metadata for the configuration form fields: semantic type,
//! default, allowed values, and the tags consumed by the rendering and audit
//! layers. The validation evaluator walks this table for its required-field
//! checks.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    Str,
    #[serde(rename = "string_list")]
    StrList,
    #[serde(rename = "boolean")]
    Bool,
    #[serde(rename = "integer")]
    Int,
    #[serde(rename = "enum")]
    Enum,
    #[serde(rename = "duration")]
    Duration,
    #[serde(rename = "payload")]
    Payload,
    #[serde(rename = "object")]
    Object,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    /// String form of the default; empty when the field has none
    pub default: &'static str,
    pub required: bool,
    /// Empty when the value set is unconstrained
    pub allowed_values: &'static [&'static str],
    /// Absent from every request; set by the server after submission
    pub server_populated_only: bool,
    /// Must never appear in plaintext on a log or audit surface
    pub sensitive: bool,
}

impl FieldSchema {
    const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            default: "",
            required: false,
            allowed_values: &[],
            server_populated_only: false,
            sensitive: false,
        }
    }

    const fn default_value(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = values;
        self
    }

    const fn server_populated(mut self) -> Self {
        self.server_populated_only = true;
        self
    }

    const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

pub const SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("action_type", "Action type", FieldType::Enum).allowed(&[
        "import-bundle",
        "generate-root",
        "generate-csr",
        "generate-intermediate",
        "cross-sign",
        "sign-csr",
        "rotate-root",
    ]),
    FieldSchema::new("type", "Type", FieldType::Enum)
        .required()
        .allowed(&["exported", "internal", "existing", "kms"]),
    FieldSchema::new("common_name", "Common name", FieldType::Str).required(),
    FieldSchema::new("issuer_name", "Issuer name", FieldType::Str),
    FieldSchema::new("key_name", "Key name", FieldType::Str),
    FieldSchema::new("key_ref", "Existing key", FieldType::Str).default_value("default"),
    FieldSchema::new("alt_names", "Subject alternative names", FieldType::StrList),
    FieldSchema::new("ip_sans", "IP subject alternative names", FieldType::StrList),
    FieldSchema::new("uri_sans", "URI subject alternative names", FieldType::StrList),
    FieldSchema::new("other_sans", "Other subject alternative names", FieldType::StrList),
    FieldSchema::new("format", "Certificate format", FieldType::Enum)
        .default_value("pem")
        .allowed(&["pem", "der", "pem_bundle"]),
    FieldSchema::new("private_key_format", "Private key format", FieldType::Enum)
        .default_value("der")
        .allowed(&["der", "pkcs8"]),
    FieldSchema::new("key_type", "Key type", FieldType::Enum)
        .default_value("rsa")
        .allowed(&["rsa", "ed25519", "ec"]),
    FieldSchema::new("key_bits", "Key bits", FieldType::Str).default_value("0"),
    FieldSchema::new("max_path_length", "Maximum path length", FieldType::Int)
        .default_value("-1"),
    FieldSchema::new(
        "exclude_cn_from_sans",
        "Exclude common name from SANs",
        FieldType::Bool,
    )
    .default_value("false"),
    FieldSchema::new(
        "add_basic_constraints",
        "Add basic constraints",
        FieldType::Bool,
    )
    .default_value("false"),
    FieldSchema::new("ou", "Organizational unit", FieldType::StrList),
    FieldSchema::new("organization", "Organization", FieldType::StrList),
    FieldSchema::new("country", "Country", FieldType::StrList),
    FieldSchema::new("locality", "Locality", FieldType::StrList),
    FieldSchema::new("province", "Province", FieldType::StrList),
    FieldSchema::new("street_address", "Street address", FieldType::StrList),
    FieldSchema::new("postal_code", "Postal code", FieldType::StrList),
    FieldSchema::new("not_before_duration", "Backdate validity", FieldType::Duration)
        .default_value("30s"),
    FieldSchema::new("ttl", "Time to live", FieldType::Duration),
    FieldSchema::new("not_after", "Not after", FieldType::Str),
    FieldSchema::new("pem_bundle", "PEM bundle", FieldType::Payload).sensitive(),
    FieldSchema::new("csr", "CSR", FieldType::Payload),
    FieldSchema::new("certificate", "Certificate", FieldType::Payload),
    FieldSchema::new("issuing_ca", "Issuing CA", FieldType::Payload).server_populated(),
    FieldSchema::new("ca_chain", "CA chain", FieldType::StrList).server_populated(),
    FieldSchema::new("private_key", "Private key", FieldType::Payload)
        .sensitive()
        .server_populated(),
    FieldSchema::new("private_key_type", "Private key type", FieldType::Str)
        .server_populated(),
    FieldSchema::new("parsed_certificate", "Parsed certificate", FieldType::Object)
        .server_populated(),
    FieldSchema::new("imported_issuers", "Imported issuers", FieldType::StrList)
        .server_populated(),
    FieldSchema::new("imported_keys", "Imported keys", FieldType::StrList).server_populated(),
    FieldSchema::new("mapping", "Issuer to key mapping", FieldType::Object).server_populated(),
    FieldSchema::new("serial_number", "Serial number", FieldType::Str).server_populated(),
    FieldSchema::new("issuer_id", "Issuer id", FieldType::Str).server_populated(),
    FieldSchema::new("key_id", "Key id", FieldType::Str).server_populated(),
];

/// Look up one field by name.
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    SCHEMA.iter().find(|field| field.name == name)
}

/// Fields the evaluator treats as required.
pub fn required_fields() -> impl Iterator<Item = &'static FieldSchema> {
    SCHEMA.iter().filter(|field| field.required)
}

/// Fields that must be masked on any log or audit surface.
pub fn sensitive_fields() -> impl Iterator<Item = &'static FieldSchema> {
    SCHEMA.iter().filter(|field| field.sensitive)
}
