//! Folds classification records into a [`TaxonMapping`].

use crate::{
    ontology::{
        entities::{Rank, TaxonMapping, TaxonNode},
        value_objects::TaxonKey,
    },
    taxonomy::ClassificationRecord,
};

/// Records every rank of `record` in `mapping`.
///
/// Ranks without a display name are skipped, as are ranks whose key is
/// missing since the node could not be identified. Keys already present in
/// the mapping keep their node, which makes the operation idempotent.
pub fn accumulate(record: &ClassificationRecord, mapping: &mut TaxonMapping) {
    for rank in Rank::ALL {
        let Some(name) = record.name_of(rank) else {
            continue;
        };
        let Some(key) = record.key_of(rank) else {
            tracing::debug!(rank = %rank, taxon = name, "rank carries no key, skipping");
            continue;
        };
        if mapping.contains(&key) {
            continue;
        }

        let node = TaxonNode::new(name, rank).with_parent(parent_key(record, rank));
        tracing::trace!(key = %key, rank = %rank, taxon = name, "recording taxon");
        mapping.insert(key, node);
    }
}

/// Key of the closest rank above `rank` present in `record`.
///
/// This is the immediately preceding rank whenever the record carries it.
/// Kingdoms, and ranks with no keyed ancestor, have no parent.
#[must_use]
pub fn parent_key(record: &ClassificationRecord, rank: Rank) -> Option<TaxonKey> {
    rank.ancestors().find_map(|ancestor| record.key_of(ancestor))
}
