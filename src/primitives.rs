//! Fixed-width primitives used as keys by the state stores:
//! - [`Address`]: 20-byte account identifier
//! - [`Word256`]: 32-byte word used for both storage keys and storage values
//!
//! Addresses render as uppercase hex and words as lowercase hex. Both parse
//! from hex in either case with an optional `0x` prefix. Serde goes through
//! the same hex text so they can sit directly in CSV rows.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

pub const ADDRESS_LENGTH: usize = 20;
pub const WORD256_LENGTH: usize = 32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Addresses must be given in full, unlike words there is no padding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            Error::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word256([u8; WORD256_LENGTH]);

impl Word256 {
    pub const ZERO: Word256 = Word256([0; WORD256_LENGTH]);

    /// Right-aligns `bytes` in a zeroed word, the way integers are stored.
    /// Returns an error if `bytes` does not fit in a word.
    pub fn left_pad(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() > WORD256_LENGTH {
            return Err(Error::InvalidLength {
                expected: WORD256_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut word = [0; WORD256_LENGTH];
        word[WORD256_LENGTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(word))
    }

    pub fn as_bytes(&self) -> &[u8; WORD256_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<u64> for Word256 {
    fn from(value: u64) -> Self {
        let mut word = [0; WORD256_LENGTH];
        word[WORD256_LENGTH - 8..].copy_from_slice(&value.to_be_bytes());
        Self(word)
    }
}

impl FromStr for Word256 {
    type Err = Error;

    /// Short input is left-padded, so `0x01` is the word with value one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::left_pad(&decode_hex(s)?)
    }
}

impl fmt::Display for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Decodes hex with an optional `0x` prefix; odd-length input gets a leading zero nibble.
fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() % 2 == 1 {
        return Ok(hex::decode(format!("0{digits}"))?);
    }
    Ok(hex::decode(digits)?)
}

macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(D::Error::custom)
            }
        }
    };
}

impl_hex_serde!(Address);
impl_hex_serde!(Word256);
