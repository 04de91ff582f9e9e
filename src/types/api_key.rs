// ABOUTME: MAAS API key split into its OAuth consumer, token, and secret parts.
// ABOUTME: Debug output redacts the secret so keys never reach logs.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("API key cannot be empty")]
    Empty,

    #[error("API key must have the form consumer_key:token_key:token_secret")]
    InvalidFormat,
}

/// A MAAS API key of the form `consumer_key:token_key:token_secret`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    consumer_key: String,
    token_key: String,
    token_secret: String,
}

impl ApiKey {
    pub fn parse(input: &str) -> Result<Self, ApiKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ApiKeyError::Empty);
        }

        let parts: Vec<&str> = input.split(':').collect();
        match parts.as_slice() {
            [consumer, token, secret]
                if !consumer.is_empty() && !token.is_empty() && !secret.is_empty() =>
            {
                Ok(Self {
                    consumer_key: (*consumer).to_string(),
                    token_key: (*token).to_string(),
                    token_secret: (*secret).to_string(),
                })
            }
            _ => Err(ApiKeyError::InvalidFormat),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("consumer_key", &self.consumer_key)
            .field("token_key", &self.token_key)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
