// ABOUTME: Numeric image version with unbounded component arity.
// ABOUTME: Compares component-wise by numeric value, treating missing trailing parts as zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseVersionError {
    #[error("version cannot be empty")]
    Empty,

    #[error("empty component in version: {0}")]
    EmptyComponent(String),

    #[error("invalid version component: {0}")]
    InvalidComponent(String),
}

/// A dot-separated sequence of non-negative integers, e.g. `1.2.10`.
///
/// Ordering is numeric, so `2.10.0 > 2.9.9`. Versions of different arity
/// compare as if the shorter one were padded with zeros, which also makes
/// `1.2` and `1.2.0` equal. Components are kept as normalized digit strings,
/// so their size is not bounded by any integer type.
#[derive(Debug, Clone)]
pub struct ImageVersion(Vec<String>);

impl ImageVersion {
    pub fn parse(input: &str) -> Result<Self, ParseVersionError> {
        if input.is_empty() {
            return Err(ParseVersionError::Empty);
        }

        let components = input
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(ParseVersionError::EmptyComponent(input.to_string()));
                }
                if !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseVersionError::InvalidComponent(part.to_string()));
                }
                Ok(normalize(part))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(components))
    }

    /// Components as decimal digits without leading zeros.
    pub fn components(&self) -> &[String] {
        &self.0
    }
}

fn normalize(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Compare two normalized digit strings by numeric value.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl FromStr for ImageVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for ImageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| {
                let a = self.0.get(i).map_or("0", String::as_str);
                let b = other.0.get(i).map_or("0", String::as_str);
                cmp_digits(a, b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ImageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ImageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ImageVersion {}

impl fmt::Display for ImageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}
