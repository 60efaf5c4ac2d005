//! Per-item identifier derivation.

use rand::Rng;
use rand::rngs::OsRng;
use serde::Serialize;

/// Domain tag embedded in every QR payload.
pub const DOMAIN_TAG: &str = "DSQRASSET";

/// Draw a fresh two-letter batch prefix (A–Z) from the OS RNG.
///
/// Drawn once per run and shared by every item in it; the next run draws a
/// new one. Uniqueness across runs is not guaranteed.
pub fn random_prefix() -> String {
    let mut rng = OsRng;
    (0..2).map(|_| (b'A' + rng.gen_range(0u8..26)) as char).collect()
}

/// Uppercase hexadecimal encoding of `value`, zero-padded to two digits.
///
/// Values >= 256 widen beyond two characters; the width is not capped.
pub fn hex_offset(value: u64) -> String {
    format!("{value:02X}")
}

/// Identity of one generated QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdentifier {
    pub id: String,
}

impl ItemIdentifier {
    /// Derive the identifier for the item at `offset` within a run.
    pub fn derive(prefix: &str, starting_number: u64, offset: u64) -> Self {
        Self {
            id: format!("{prefix}{}", hex_offset(starting_number + offset)),
        }
    }

    /// File name of the rendered image inside the archive.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    /// Payload encoded into the QR code.
    pub fn payload(&self) -> QrPayload<'_> {
        QrPayload {
            dom: DOMAIN_TAG,
            id: &self.id,
        }
    }
}

/// Wire shape of the QR payload. Field order is part of the format.
#[derive(Debug, Serialize)]
pub struct QrPayload<'a> {
    #[serde(rename = "Dom")]
    pub dom: &'a str,
    #[serde(rename = "ID")]
    pub id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_offset_is_uppercase_and_zero_padded() {
        assert_eq!(hex_offset(0), "00");
        assert_eq!(hex_offset(15), "0F");
        assert_eq!(hex_offset(171), "AB");
        assert_eq!(hex_offset(255), "FF");
    }

    #[test]
    fn hex_offset_widens_past_two_digits() {
        // Known boundary: offsets >= 256 exceed the nominal fixed width.
        assert_eq!(hex_offset(256), "100");
        assert_eq!(hex_offset(4096), "1000");
    }

    #[test]
    fn random_prefix_is_two_uppercase_letters() {
        for _ in 0..50 {
            let prefix = random_prefix();
            assert_eq!(prefix.len(), 2);
            assert!(prefix.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn derive_concatenates_prefix_and_hex() {
        let item = ItemIdentifier::derive("AB", 10, 5);
        assert_eq!(item.id, "AB0F");
        assert_eq!(item.file_name(), "AB0F.png");
    }

    #[test]
    fn payload_serializes_with_exact_field_names() {
        let item = ItemIdentifier::derive("ZZ", 0, 0);
        let json = serde_json::to_string(&item.payload()).unwrap();
        assert_eq!(json, r#"{"Dom":"DSQRASSET","ID":"ZZ00"}"#);
    }
}
