//! Backfills accepted names discovered through synonym listings.

use crate::{
    ontology::{
        entities::{Rank, TaxonMapping, TaxonNode},
        value_objects::TaxonKey,
    },
    taxonomy::{ClassificationRecord, TaxonomyClient},
};

/// Ensures the accepted species of `record` has a node in `mapping`.
///
/// The synonyms of the record's species are listed; when one of them names
/// that species as its accepted usage and no node exists yet for it, a
/// species node labelled with the record's scientific name is added under
/// the record's genus. Existing nodes are left untouched. Records without a
/// species key are ignored.
pub async fn resolve_accepted<C>(
    record: &ClassificationRecord,
    mapping: &mut TaxonMapping,
    client: &C,
) where
    C: TaxonomyClient + ?Sized,
{
    let Some(species_key) = record.species_key else {
        return;
    };

    let synonyms = client.list_synonyms(species_key).await;
    if !synonyms.iter().any(|synonym| synonym.accepts(species_key)) {
        return;
    }

    let key = TaxonKey::from(species_key);
    if mapping.contains(&key) {
        return;
    }
    let Some(name) = record
        .scientific_name
        .as_deref()
        .or(record.species.as_deref())
    else {
        tracing::debug!(key = %key, "accepted species has no name, skipping");
        return;
    };

    tracing::debug!(key = %key, taxon = name, "adding accepted species");
    mapping.insert(
        key,
        TaxonNode::new(name, Rank::Species).with_parent(record.key_of(Rank::Genus)),
    );
}
