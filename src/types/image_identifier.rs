// ABOUTME: Image identifier parsing for the "<prefix>-v<version>" naming convention.
// ABOUTME: Splits a family prefix from its numeric version and guards family boundaries.

use super::version::{ImageVersion, ParseVersionError};
use std::fmt;
use thiserror::Error;

/// Separator between the family prefix and the version.
pub const VERSION_SEPARATOR: &str = "-v";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageIdentifierError {
    #[error("image identifier cannot be empty")]
    Empty,

    #[error("image identifier has no '-v' version suffix: {0}")]
    MissingVersion(String),

    #[error("image identifier has an empty prefix: {0}")]
    EmptyPrefix(String),

    #[error("invalid version in image identifier {input}: {source}")]
    InvalidVersion {
        input: String,
        source: ParseVersionError,
    },
}

/// A parsed image name such as `ubuntu-gpu-v2.10.1`.
///
/// The prefix is everything before the last `-v`, so `base-v2-v1.0` belongs to
/// the `base-v2` family at version `1.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIdentifier {
    prefix: String,
    version: ImageVersion,
}

impl ImageIdentifier {
    pub fn parse(input: &str) -> Result<Self, ParseImageIdentifierError> {
        if input.is_empty() {
            return Err(ParseImageIdentifierError::Empty);
        }

        let (prefix, version) = input
            .rsplit_once(VERSION_SEPARATOR)
            .ok_or_else(|| ParseImageIdentifierError::MissingVersion(input.to_string()))?;

        if prefix.is_empty() {
            return Err(ParseImageIdentifierError::EmptyPrefix(input.to_string()));
        }

        let version = ImageVersion::parse(version).map_err(|source| {
            ParseImageIdentifierError::InvalidVersion {
                input: input.to_string(),
                source,
            }
        })?;

        Ok(Self {
            prefix: prefix.to_string(),
            version,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn version(&self) -> &ImageVersion {
        &self.version
    }

    /// Parse the version of `name` if it belongs to this identifier's family.
    ///
    /// The name must start with the prefix immediately followed by `-v`; a raw
    /// string-prefix match would let `foo` claim `foobar-v1.0`.
    pub fn sibling_version(&self, name: &str) -> Option<Result<ImageVersion, ParseVersionError>> {
        let rest = name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(VERSION_SEPARATOR)?;
        Some(ImageVersion::parse(rest))
    }

    /// Whether two identifiers belong to the same family and can be compared.
    pub fn is_comparable(&self, other: &ImageIdentifier) -> bool {
        self.prefix == other.prefix
    }
}

impl fmt::Display for ImageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, VERSION_SEPARATOR, self.version)
    }
}
