//! CPF (Cadastro de Pessoas Físicas) parsing and check-digit validation.
//!
//! Two textual forms are accepted: eleven bare digits (`67881954981`) and
//! the punctuated form (`678.819.549-81`). Internally only the digits are
//! kept; the punctuated form is used for display and serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

const CPF_LEN: usize = 11;

/// A validated CPF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_LEN]);

impl Cpf {
    /// Parses and validates a CPF in either accepted form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let digits = extract_digits(s).ok_or_else(|| Error::InvalidCpf(s.to_string()))?;

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(Error::InvalidCpf(s.to_string()));
        }

        let first = check_digit(&digits[..9]);
        let second = check_digit(&digits[..10]);
        if digits[9] != first || digits[10] != second {
            return Err(Error::InvalidCpf(s.to_string()));
        }

        Ok(Self(digits))
    }

    /// Completes nine base digits with their two check digits.
    ///
    /// Returns `None` when any input byte is not a decimal digit.
    #[must_use]
    pub fn complete(base: [u8; 9]) -> Option<[u8; CPF_LEN]> {
        if base.iter().any(|d| *d > 9) {
            return None;
        }
        let mut digits = [0u8; CPF_LEN];
        digits[..9].copy_from_slice(&base);
        digits[9] = check_digit(&digits[..9]);
        digits[10] = check_digit(&digits[..10]);
        Some(digits)
    }

    /// The eleven digits as a plain string, the form used for storage.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }

    /// Returns `true` if `s` is a valid CPF.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

/// Modulo-11 check digit over `digits`, weights descending to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (top - i as u32))
        .sum();
    let rem = sum % 11;
    if rem < 2 { 0 } else { (11 - rem) as u8 }
}

fn extract_digits(s: &str) -> Option<[u8; CPF_LEN]> {
    let bytes = s.as_bytes();
    let raw: Vec<u8> = match bytes.len() {
        11 => bytes.to_vec(),
        // ddd.ddd.ddd-dd
        14 => {
            if bytes[3] != b'.' || bytes[7] != b'.' || bytes[11] != b'-' {
                return None;
            }
            bytes
                .iter()
                .enumerate()
                .filter(|(i, _)| !matches!(i, 3 | 7 | 11))
                .map(|(_, b)| *b)
                .collect()
        }
        _ => return None,
    };

    let mut digits = [0u8; CPF_LEN];
    for (slot, b) in digits.iter_mut().zip(raw) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = b - b'0';
    }
    Some(digits)
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits();
        write!(f, "{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl FromStr for Cpf {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
