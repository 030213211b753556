//! # Configuration
//!
//! Configuration is read from `config/<environment>.yaml`. The file is first
//! rendered as a [`tera`] template, so values can be pulled from the process
//! environment:
//!
//! ```yaml
//! server:
//!   port: {{ get_env(name="PORT", default="8080") }}
//! ```
//!
//! Every section is optional and falls back to its [`Default`]. A missing
//! file yields the default configuration.
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    environment::Environment,
    logger,
    ontology::value_objects::Iri,
    taxonomy::RetryPolicy,
    Error, Result,
};

pub const DEFAULT_API_BASE: &str = "https://api.gbif.org/v1";
pub const DEFAULT_BASE_IRI: &str = "https://www.gbif.org/species/";
pub const DEFAULT_LABEL_LANGUAGE: &str = "lat";

/// Main application configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub taxonomy: TaxonomySettings,
    #[serde(default)]
    pub ontology: OntologySettings,
}

/// Logger configuration
///
/// Example (development):
/// ```yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logger {
    /// Enable log write to stderr
    #[serde(default = "default_true")]
    pub enable: bool,

    /// Set the logger level.
    ///
    /// * options: `trace` | `debug` | `info` | `warn` | `error` | `off`
    #[serde(default)]
    pub level: logger::LogLevel,

    /// Set the logger format.
    ///
    /// * options: `compact` | `pretty` | `json`
    #[serde(default)]
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries. See more [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
    pub override_filter: Option<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: logger::LogLevel::default(),
            format: logger::Format::default(),
            override_filter: None,
        }
    }
}

/// Server configuration structure.
///
/// Example (development):
/// ```yaml
/// server:
///   port: 8080
///   binding: 0.0.0.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Server {
    /// The address on which the server should listen on for incoming
    /// connections.
    #[serde(default = "default_binding")]
    pub binding: String,
    /// The port on which the server should listen for incoming connections.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            binding: default_binding(),
            port: default_port(),
        }
    }
}

impl Server {
    #[must_use]
    pub fn full_url(&self) -> String {
        format!("http://{}:{}", self.binding, self.port)
    }
}

/// Settings of the remote name service.
///
/// Example:
/// ```yaml
/// taxonomy:
///   api_base: https://api.gbif.org/v1
///   timeout_ms: 30000
///   retry:
///     max_attempts: 3
///     delay_ms: 2000
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomySettings {
    /// Base URL of the species API, without trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Retry behavior of the name-match lookup.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for TaxonomySettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            retry: RetrySettings::default(),
        }
    }
}

impl TaxonomySettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RetrySettings {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.delay_ms))
    }
}

/// Settings of the rendered ontology document.
///
/// Example:
/// ```yaml
/// ontology:
///   base_iri: https://www.gbif.org/species/
///   label_language: lat
///   escape_labels: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OntologySettings {
    /// Prefix of every class IRI; the taxon key is appended to it.
    #[serde(default = "default_base_iri")]
    pub base_iri: Iri,
    /// Language tag of `rdfs:label` elements.
    #[serde(default = "default_label_language")]
    pub label_language: String,
    /// Escape XML special characters in labels. Names are emitted verbatim
    /// when disabled.
    #[serde(default)]
    pub escape_labels: bool,
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            base_iri: default_base_iri(),
            label_language: default_label_language(),
            escape_labels: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_binding() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    2_000
}

fn default_base_iri() -> Iri {
    Iri::from_static(DEFAULT_BASE_IRI)
}

fn default_label_language() -> String {
    DEFAULT_LABEL_LANGUAGE.to_string()
}

impl Config {
    /// Creates a new configuration instance based on the specified
    /// environment, reading from the `config` folder of the working
    /// directory.
    pub fn new(env: &Environment) -> Result<Self> {
        Self::from_folder(env, &PathBuf::from("config"))
    }

    /// Loads configuration settings from a folder for a specified environment.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self> {
        let file = path.join(format!("{env}.yaml"));
        if !file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&file)?;
        Self::from_yaml(&content).map_err(|err| match err {
            Error::YAML(source) => Error::YAMLFile(source, file.display().to_string()),
            other => other,
        })
    }

    /// Parses configuration from a YAML template.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let rendered = tera::Tera::one_off(content, &tera::Context::new(), false)?;
        Ok(serde_yaml::from_str(&rendered)?)
    }
}
