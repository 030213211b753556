//! # Logging
//!
//! Installs the global `tracing` subscriber. Events are written to stderr so
//! that the `convert` command can print the ontology alone on stdout.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config;

const MODULE_WHITELIST: &[&str] = &["taxon_owl", "tower_http"];

/// All available levels
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum LogLevel {
    /// The "off" level.
    #[serde(rename = "off")]
    Off,
    /// The "trace" level.
    #[serde(rename = "trace")]
    Trace,
    /// The "debug" level.
    #[serde(rename = "debug")]
    Debug,
    /// The "info" level.
    #[serde(rename = "info")]
    #[default]
    Info,
    /// The "warn" level.
    #[serde(rename = "warn")]
    Warn,
    /// The "error" level.
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Format {
    #[serde(rename = "compact")]
    #[default]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

/// Builds the filter directives for `config`.
///
/// `RUST_LOG` wins over everything, then `override_filter`, then `level`
/// applied to the crate and the HTTP tracing middleware.
#[must_use]
pub fn filter_directives(config: &config::Logger) -> String {
    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV) {
        return directives;
    }
    config.override_filter.clone().unwrap_or_else(|| {
        MODULE_WHITELIST
            .iter()
            .map(|m| format!("{m}={}", config.level))
            .collect::<Vec<_>>()
            .join(",")
    })
}

/// Initializes the global subscriber. Calling it again is a no-op.
pub fn init(config: &config::Logger) {
    if !config.enable {
        return;
    }

    let env_filter = EnvFilter::try_new(filter_directives(config)).unwrap_or_else(|err| {
        eprintln!("invalid log filter, falling back to `info`: {err}");
        EnvFilter::new("info")
    });

    let layer = match config.format {
        Format::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        Format::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        Format::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
