// ABOUTME: Config settings given inline or looked up from an environment variable.
// ABOUTME: Lets the MAAS URL and API key live outside the YAML file.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// A setting written as a plain string or as `{ env: NAME, default: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Inline(String),
    Env(EnvRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvRef {
    pub env: String,
    #[serde(default)]
    pub default: Option<String>,
}

impl ConfigValue {
    pub fn inline(value: impl Into<String>) -> Self {
        ConfigValue::Inline(value.into())
    }

    pub fn env(name: impl Into<String>) -> Self {
        ConfigValue::Env(EnvRef {
            env: name.into(),
            default: None,
        })
    }

    pub fn or_default(self, fallback: impl Into<String>) -> Self {
        match self {
            ConfigValue::Env(r) => ConfigValue::Env(EnvRef {
                default: Some(fallback.into()),
                ..r
            }),
            inline => inline,
        }
    }

    /// The value when known without consulting the environment.
    pub fn as_inline(&self) -> Option<&str> {
        match self {
            ConfigValue::Inline(v) => Some(v),
            ConfigValue::Env(_) => None,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve against `lookup` instead of the process environment.
    ///
    /// A variable that is set but blank counts as unset.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            ConfigValue::Inline(v) => Ok(v.clone()),
            ConfigValue::Env(EnvRef { env, default }) => lookup(env)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(env.clone())),
        }
    }
}

/// Describes where the value comes from, never the value itself.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Inline(_) => write!(f, "inline value"),
            ConfigValue::Env(EnvRef { env, default: None }) => write!(f, "${}", env),
            ConfigValue::Env(EnvRef { env, default: Some(_) }) => {
                write!(f, "${} (with default)", env)
            }
        }
    }
}
