#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
//! # taxon-owl
//!
//! Builds OWL class hierarchies out of GBIF species classifications.
//!
//! Species names are matched against the GBIF name service, every rank of the
//! returned classification is folded into a [`ontology::TaxonMapping`], accepted
//! names are backfilled from synonym listings and the resulting hierarchy is
//! rendered as RDF/XML.
//!
//! The crate can be driven from the command line (`taxon-owl convert`) or
//! served over HTTP (`taxon-owl start`).

pub use self::errors::Error;

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
pub mod environment;
pub mod errors;
pub mod logger;
pub mod ontology;
pub mod taxonomy;
#[cfg(any(test, feature = "testing"))]
pub mod tests_cfg;

#[cfg(feature = "testing")]
pub use axum_test::TestServer;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
