// ABOUTME: Validated MAAS machine system identifier.
// ABOUTME: Rejects empty values and characters that would break API URL paths.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SystemIdError {
    #[error("system_id cannot be empty")]
    Empty,

    #[error("invalid character in system_id: '{0}'")]
    InvalidChar(char),
}

/// Opaque, stable identifier of a machine managed by MAAS (e.g. `4y3h7n`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(String);

impl SystemId {
    pub fn new(value: &str) -> Result<Self, SystemIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SystemIdError::Empty);
        }

        for c in trimmed.chars() {
            if c.is_whitespace() || c == '/' || c == '?' || c == '#' {
                return Err(SystemIdError::InvalidChar(c));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SystemId {
    type Err = SystemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for SystemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SystemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(&value).map_err(serde::de::Error::custom)
    }
}
