//! Fingerprint type, hex codec and similarity

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of bytes in a fingerprint
pub const FINGERPRINT_LEN: usize = 16;

/// Number of bits compared between two fingerprints
pub const FINGERPRINT_BITS: u32 = (FINGERPRINT_LEN * 8) as u32;

/// Length of the hex text form
pub const HEX_LEN: usize = FINGERPRINT_LEN * 2;

/// Largest value a fingerprint byte may hold
pub const MAX_BYTE: u8 = 128;

/// A 16-byte perceptual fingerprint.
///
/// Each byte is a low-frequency coefficient offset by 64, so every byte lies
/// in `0..=128`. The text form is 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Build a fingerprint from raw bytes, rejecting any byte above 128
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Result<Self> {
        if let Some((index, &byte)) = bytes.iter().enumerate().find(|&(_, &b)| b > MAX_BYTE) {
            return Err(Error::HashFormat {
                hash: hex::encode(bytes),
                reason: format!("byte {} is {}, above {}", index, byte, MAX_BYTE),
            });
        }
        Ok(Self(bytes))
    }

    /// Caller guarantees every byte is at most 128
    pub(crate) fn from_valid_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        debug_assert!(bytes.iter().all(|&b| b <= MAX_BYTE));
        Self(bytes)
    }

    /// Get the raw fingerprint bytes
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Encode as 32 lowercase hex characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from 32 hex characters.
    ///
    /// Fails unless the text is exactly 32 characters of hex digits and every
    /// decoded byte is at most 128.
    pub fn from_hex(text: &str) -> Result<Self> {
        let format_error = |reason: String| Error::HashFormat {
            hash: text.to_string(),
            reason,
        };

        if text.len() != HEX_LEN {
            return Err(format_error(format!(
                "expected {} characters, got {}",
                HEX_LEN,
                text.chars().count()
            )));
        }

        let mut bytes = [0u8; FINGERPRINT_LEN];
        hex::decode_to_slice(text, &mut bytes).map_err(|e| format_error(e.to_string()))?;

        Self::from_bytes(bytes).map_err(|e| match e {
            Error::HashFormat { reason, .. } => format_error(reason),
            other => other,
        })
    }

    /// Calculate the Hamming distance between two fingerprints (0-128)
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Normalised similarity in [0, 1]; 1.0 means identical
    pub fn similarity(&self, other: &Fingerprint) -> f64 {
        1.0 - self.distance(other) as f64 / FINGERPRINT_BITS as f64
    }

    /// Check if two images are perceptually similar based on a threshold
    pub fn is_similar(&self, other: &Fingerprint, threshold: f64) -> bool {
        self.similarity(other) >= threshold
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for Fingerprint {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::from_hex(value)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fingerprint {
        Fingerprint::from_bytes([
            0x7a, 0x40, 0x3f, 0x41, 0x40, 0x40, 0x00, 0x80, 0x12, 0x40, 0x40, 0x40, 0x55, 0x40,
            0x40, 0x3c,
        ])
        .unwrap()
    }

    #[test]
    fn test_encode_is_lowercase_and_ordered() {
        let hex = sample().to_hex();
        assert_eq!(hex, "7a403f4140400080124040405540403c");
        assert_eq!(hex.len(), HEX_LEN);
        assert_eq!(sample().to_string(), hex);
    }

    #[test]
    fn test_round_trip() {
        let fp = sample();
        assert_eq!(Fingerprint::from_hex(&fp.to_hex()).unwrap(), fp);

        let text = "40404040404040404040404040404080";
        assert_eq!(text.parse::<Fingerprint>().unwrap().to_hex(), text);
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        let fp = Fingerprint::from_hex("7A403F4140400080124040405540403C").unwrap();
        assert_eq!(fp, sample());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let too_long = "40".repeat(17);
        for text in ["", "4040", "404040404040404040404040404040", too_long.as_str()] {
            assert!(
                matches!(Fingerprint::from_hex(text), Err(Error::HashFormat { .. })),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(matches!(
            Fingerprint::from_hex("zz0000000000000000000000000000"),
            Err(Error::HashFormat { .. })
        ));
        assert!(matches!(
            Fingerprint::from_hex("zz000000000000000000000000000000"),
            Err(Error::HashFormat { .. })
        ));
        assert!(matches!(
            Fingerprint::from_hex("4040404040404040404040404040404g"),
            Err(Error::HashFormat { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_byte_above_128() {
        let err = Fingerprint::from_hex("40404040404040408140404040404040").unwrap_err();
        match err {
            Error::HashFormat { hash, reason } => {
                assert_eq!(hash, "40404040404040408140404040404040");
                assert!(reason.contains("byte 8"));
            }
            other => panic!("unexpected error: {}", other),
        }

        assert!(Fingerprint::from_bytes([0xff; FINGERPRINT_LEN]).is_err());
        assert!(Fingerprint::from_bytes([MAX_BYTE; FINGERPRINT_LEN]).is_ok());
    }

    #[test]
    fn test_similarity_reflexive() {
        let fp = sample();
        assert_eq!(fp.distance(&fp), 0);
        assert_eq!(fp.similarity(&fp), 1.0);
    }

    #[test]
    fn test_similarity_symmetric_and_bounded() {
        let a = sample();
        let b = Fingerprint::from_bytes([0x40; FINGERPRINT_LEN]).unwrap();
        let c = Fingerprint::from_bytes([0x00; FINGERPRINT_LEN]).unwrap();

        for (x, y) in [(a, b), (a, c), (b, c)] {
            assert_eq!(x.similarity(&y), y.similarity(&x));
            assert!((0.0..=1.0).contains(&x.similarity(&y)));
        }
    }

    #[test]
    fn test_complementary_fingerprints_score_zero() {
        let a = Fingerprint::from_bytes([0x7f; FINGERPRINT_LEN]).unwrap();
        let b = Fingerprint::from_bytes([0x80; FINGERPRINT_LEN]).unwrap();

        assert_eq!(a.distance(&b), FINGERPRINT_BITS);
        assert_eq!(a.similarity(&b), 0.0);
    }

    #[test]
    fn test_single_bit_difference() {
        let a = Fingerprint::from_bytes([0x40; FINGERPRINT_LEN]).unwrap();
        let mut bytes = [0x40; FINGERPRINT_LEN];
        bytes[5] = 0x41;
        let b = Fingerprint::from_bytes(bytes).unwrap();

        assert_eq!(a.distance(&b), 1);
        assert_eq!(a.similarity(&b), 1.0 - 1.0 / 128.0);
        assert!(a.is_similar(&b, 0.99));
        assert!(!a.is_similar(&b, 1.0));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let fp = sample();
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "\"7a403f4140400080124040405540403c\"");

        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);

        assert!(serde_json::from_str::<Fingerprint>("\"ff\"").is_err());
    }
}
