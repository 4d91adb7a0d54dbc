//! Client-code derivation.
//!
//! The provider identifies customers by an opaque code. Scanned QR payloads
//! are already in provider format and pass through untouched. Manually
//! entered identifiers are anonymized before they leave the terminal:
//!
//! - numeric id (6-7 digits): `"0e" + hex(sha1(id))`
//! - phone number:            `"0f" + hex(sha1(normalized_phone))`
//!
//! Phone numbers are normalized to the 13-digit `55` + area + subscriber
//! form before hashing, so the same customer hashes identically no matter
//! how the operator typed the number.

use sha1::{Digest, Sha1};

use crate::error::{CoreError, Result};

/// Country + default area prefix applied to bare 9-digit subscriber numbers.
const PHONE_DEFAULT_PREFIX: &str = "5561";

/// Country prefix applied to 11-digit area + subscriber numbers.
const PHONE_COUNTRY_PREFIX: &str = "55";

/// The single customer identifier an operator supplied.
///
/// The enum makes "exactly one of qr / numeric id / phone" structural rather
/// than a runtime contract on three optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdentifier {
    /// A scanned QR payload, already in provider format.
    Qr(String),
    /// A manually entered numeric customer id (6-7 digits).
    NumericId(String),
    /// A phone number, digits only.
    Phone(String),
}

/// Derive the canonical provider-facing client code for an identifier.
///
/// Deterministic and side-effect free: the same input always yields the same
/// code.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` for an empty QR payload, a numeric id
/// that is not 6-7 digits, or a phone number whose length has no defined
/// normalization (anything other than 9, 11, or 13 digits).
pub fn derive_client_code(identifier: &CustomerIdentifier) -> Result<String> {
    match identifier {
        CustomerIdentifier::Qr(code) => {
            if code.trim().is_empty() {
                return Err(CoreError::InvalidInput("QR payload is empty".into()));
            }
            Ok(code.clone())
        }
        CustomerIdentifier::NumericId(id) => {
            if !(6..=7).contains(&id.len()) || !id.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CoreError::InvalidInput(
                    "numeric id must be 6-7 digits".into(),
                ));
            }
            Ok(format!("0e{}", sha1_hex(id)))
        }
        CustomerIdentifier::Phone(phone) => {
            let normalized = normalize_phone(phone)?;
            Ok(format!("0f{}", sha1_hex(&normalized)))
        }
    }
}

/// Normalize a digits-only phone number to the 13-digit provider form.
///
/// - 9 digits (bare subscriber): prepend country + default area (`5561`)
/// - 11 digits (area + subscriber): prepend country (`55`)
/// - 13 digits: already normalized
///
/// Other lengths (8, 10, 12 digits) have no defined normalization and are
/// rejected instead of being forwarded as a malformed identifier.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` for non-digit characters or an
/// unsupported length.
pub fn normalize_phone(phone: &str) -> Result<String> {
    if phone.is_empty() || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidInput(
            "phone must contain digits only".into(),
        ));
    }

    match phone.len() {
        9 => Ok(format!("{PHONE_DEFAULT_PREFIX}{phone}")),
        11 => Ok(format!("{PHONE_COUNTRY_PREFIX}{phone}")),
        13 => Ok(phone.to_string()),
        len => Err(CoreError::InvalidInput(format!(
            "unsupported phone length: {len} digits"
        ))),
    }
}

fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_passes_through_unchanged() {
        let id = CustomerIdentifier::Qr("0eed2992081af78066bd2e4f8026cf32c4124de1ca".into());
        let code = derive_client_code(&id).unwrap();
        assert_eq!(code, "0eed2992081af78066bd2e4f8026cf32c4124de1ca");
        // Pure passthrough: deriving twice is identical.
        assert_eq!(code, derive_client_code(&id).unwrap());
    }

    #[test]
    fn empty_qr_rejected() {
        let id = CustomerIdentifier::Qr("  ".into());
        assert!(derive_client_code(&id).is_err());
    }

    #[test]
    fn numeric_id_is_prefixed_sha1() {
        let id = CustomerIdentifier::NumericId("1234567".into());
        let code = derive_client_code(&id).unwrap();
        assert!(code.starts_with("0e"));
        assert_eq!(code.len(), 42); // "0e" + 40 hex chars
        assert_eq!(&code[2..], sha1_hex("1234567"));
    }

    #[test]
    fn numeric_id_is_deterministic() {
        let id = CustomerIdentifier::NumericId("654321".into());
        assert_eq!(
            derive_client_code(&id).unwrap(),
            derive_client_code(&id).unwrap()
        );
    }

    #[test]
    fn numeric_id_length_bounds() {
        for bad in ["12345", "12345678", "12a4567", ""] {
            let id = CustomerIdentifier::NumericId(bad.into());
            assert!(derive_client_code(&id).is_err(), "accepted {bad:?}");
        }
        for good in ["123456", "1234567"] {
            let id = CustomerIdentifier::NumericId(good.into());
            assert!(derive_client_code(&id).is_ok());
        }
    }

    #[test]
    fn phone_nine_digits_gets_country_and_area() {
        assert_eq!(normalize_phone("999887766").unwrap(), "5561999887766");
    }

    #[test]
    fn phone_eleven_digits_gets_country() {
        assert_eq!(normalize_phone("61999887766").unwrap(), "5561999887766");
    }

    #[test]
    fn phone_thirteen_digits_unchanged() {
        assert_eq!(normalize_phone("5561999887766").unwrap(), "5561999887766");
    }

    #[test]
    fn equivalent_phones_hash_identically() {
        let a = derive_client_code(&CustomerIdentifier::Phone("999887766".into())).unwrap();
        let b = derive_client_code(&CustomerIdentifier::Phone("61999887766".into())).unwrap();
        let c = derive_client_code(&CustomerIdentifier::Phone("5561999887766".into())).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a.starts_with("0f"));
    }

    #[test]
    fn undefined_phone_lengths_rejected() {
        for bad in ["12345678", "1234567890", "123456789012"] {
            assert!(normalize_phone(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn non_digit_phone_rejected() {
        assert!(normalize_phone("99988-7766").is_err());
    }
}
