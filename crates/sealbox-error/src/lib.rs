use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SealboxError {
    #[error("Failed to parse configuration: {0}")]
    ConfigError(String),

    #[error("Unable to parse certificate material: {0}")]
    CertificateError(String),

    #[error("Capability lookup against the permissions backend failed: {0}")]
    CapabilityError(String),

    #[error("A submission response was already recorded for this configuration")]
    ResponseAlreadyRecorded,

    #[error("An unexpected internal error occurred: {0}")]
    InternalError(String),
}
