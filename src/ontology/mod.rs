//! Taxon hierarchy and its OWL serialization.
//!
//! Classification records are folded into a [`TaxonMapping`] by the
//! [`accumulator`], accepted names are backfilled by the [`resolver`] and the
//! result is written out by [`render`]. [`OwlGenerator`] wires the three steps
//! to a taxonomy client.

pub mod accumulator;
pub mod entities;
pub mod render;
pub mod resolver;
pub mod service;
pub mod value_objects;

pub use accumulator::accumulate;
pub use entities::{Rank, TaxonMapping, TaxonNode};
pub use render::{render, render_with};
pub use resolver::resolve_accepted;
pub use service::{OwlGenerator, TaxonomyHandle};
pub use value_objects::{Iri, IriError, TaxonKey};
