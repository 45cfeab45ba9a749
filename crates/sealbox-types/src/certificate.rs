use crate::action::KeyType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display summary of a CA certificate, filled in on the record after a
/// successful submission. Construction from PEM lives in the PKI crate; this
/// is the data shape only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCertificate {
    pub common_name: Option<String>,
    /// Colon-separated lowercase hex, e.g. "3a:bc:..."
    pub serial_number: String,
    pub issuer: Option<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub key_type: Option<KeyType>,
    pub key_bits: Option<u32>,
    pub alt_names: Vec<String>,
}

impl ParsedCertificate {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.not_after
    }

    pub fn days_until_expiry(&self) -> i64 {
        (self.not_after - Utc::now()).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn summary(not_after: DateTime<Utc>) -> ParsedCertificate {
        ParsedCertificate {
            common_name: Some("example.com".to_string()),
            serial_number: "0a:1b".to_string(),
            issuer: Some("example.com".to_string()),
            not_before: Utc::now() - Duration::days(1),
            not_after,
            key_type: Some(KeyType::Ec),
            key_bits: Some(256),
            alt_names: vec!["example.com".to_string()],
        }
    }

    #[test]
    fn test_expiry_accessors() {
        let live = summary(Utc::now() + Duration::days(90));
        assert!(!live.is_expired());
        assert_eq!(live.days_until_expiry(), 89);

        let expired = summary(Utc::now() - Duration::days(2));
        assert!(expired.is_expired());
        assert!(expired.days_until_expiry() < 0);
    }
}
