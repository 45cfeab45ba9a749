pub mod capability;
pub mod certificate;
pub mod validation;

pub use capability::{
    Capabilities, CapabilityResolver, CapabilityResult, CapabilityVerb, PermissionsOracle,
    StaticOracle,
};
pub use certificate::parse_certificate;
pub use validation::{ValidationCode, ValidationFailure, is_valid, validate};
