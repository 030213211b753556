//! Adapters implementing [`super::TaxonomyClient`] against concrete services.

pub mod gbif;

pub use gbif::GbifClient;
