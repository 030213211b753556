//! # Application Environment
//!
//! Selects which `config/<environment>.yaml` file is loaded. The environment
//! comes from the `--environment` flag, then `TAXON_OWL_ENV`, then
//! `RUST_ENV`, falling back to `development`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{config::Config, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const TAXON_OWL_ENV: &str = "TAXON_OWL_ENV";
pub const RUST_ENV: &str = "RUST_ENV";

/// Resolves the environment name from process variables.
#[must_use]
pub fn resolve_from_env() -> String {
    std::env::var(TAXON_OWL_ENV)
        .or_else(|_| std::env::var(RUST_ENV))
        .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Environment {
    #[serde(rename = "production")]
    Production,
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "test")]
    Test,
    Any(String),
}

impl Environment {
    /// Loads the configuration of this environment from `./config`.
    pub fn load(&self) -> Result<Config> {
        Config::new(self)
    }
}

impl From<String> for Environment {
    fn from(env: String) -> Self {
        match env.as_str() {
            "production" => Self::Production,
            "development" => Self::Development,
            "test" => Self::Test,
            _ => Self::Any(env),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
            Self::Test => f.write_str("test"),
            Self::Any(s) => f.write_str(s),
        }
    }
}
