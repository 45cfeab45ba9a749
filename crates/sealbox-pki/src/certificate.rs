use chrono::{DateTime, NaiveDateTime, Utc};
use openssl::asn1::Asn1TimeRef;
use openssl::nid::Nid;
use openssl::x509::{X509, X509NameRef};
use sealbox_error::SealboxError;
use sealbox_types::action::KeyType;
use sealbox_types::certificate::ParsedCertificate;

/// Parse a PEM certificate into the display summary stored on the record
/// after a successful submission.
pub fn parse_certificate(pem: &str) -> Result<ParsedCertificate, SealboxError> {
    let x509 = X509::from_pem(pem.as_bytes())
        .map_err(|e| SealboxError::CertificateError(format!("Failed to parse certificate: {}", e)))?;

    let serial_number = format_serial(&x509)?;
    let not_before = asn1_time_to_datetime(x509.not_before())?;
    let not_after = asn1_time_to_datetime(x509.not_after())?;
    let (key_type, key_bits) = public_key_info(&x509);

    let alt_names = x509
        .subject_alt_names()
        .map(|names| {
            names
                .iter()
                .filter_map(|name| {
                    name.dnsname()
                        .or_else(|| name.email())
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ParsedCertificate {
        common_name: name_entry(x509.subject_name(), Nid::COMMONNAME),
        serial_number,
        issuer: name_entry(x509.issuer_name(), Nid::COMMONNAME),
        not_before,
        not_after,
        key_type,
        key_bits,
        alt_names,
    })
}

fn name_entry(name: &X509NameRef, nid: Nid) -> Option<String> {
    name.entries_by_nid(nid)
        .next()
        .and_then(|entry| entry.data().as_utf8().ok())
        .map(|value| value.to_string())
}

/// Serial as colon-separated lowercase hex pairs, the form the console shows.
fn format_serial(x509: &X509) -> Result<String, SealboxError> {
    let hex = x509
        .serial_number()
        .to_bn()
        .and_then(|bn| bn.to_hex_str().map(|s| s.to_string()))
        .map_err(|e| SealboxError::CertificateError(format!("Failed to read serial: {}", e)))?;

    let hex = hex.to_lowercase();
    // left-pad to a whole number of byte pairs
    let hex = if hex.len() % 2 == 0 {
        hex
    } else {
        format!("0{}", hex)
    };
    let pairs: Vec<&str> = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap_or(""))
        .collect();
    Ok(pairs.join(":"))
}

fn public_key_info(x509: &X509) -> (Option<KeyType>, Option<u32>) {
    let Ok(pkey) = x509.public_key() else {
        return (None, None);
    };
    let key_type = match pkey.id() {
        openssl::pkey::Id::RSA => Some(KeyType::Rsa),
        openssl::pkey::Id::EC => Some(KeyType::Ec),
        openssl::pkey::Id::ED25519 => Some(KeyType::Ed25519),
        _ => None,
    };
    (key_type, Some(pkey.bits()))
}

/// ASN1 time renders as "Oct  5 10:02:11 2025 GMT" (two spaces before a
/// single-digit day); try the known renderings in order.
fn asn1_time_to_datetime(asn1_time: &Asn1TimeRef) -> Result<DateTime<Utc>, SealboxError> {
    let time_str = asn1_time.to_string();

    if let Ok(naive) = NaiveDateTime::parse_from_str(&time_str, "%b %e %H:%M:%S %Y GMT") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&time_str, "%b %e %H:%M:%S %Y") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(&time_str, "%b %e %H:%M:%S %Y %Z") {
        return Ok(dt.to_utc());
    }

    Err(SealboxError::CertificateError(format!(
        "Failed to parse ASN1 time: {}",
        time_str
    )))
}
