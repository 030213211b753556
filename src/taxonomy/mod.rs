//! Port towards the remote taxonomic name service.
//!
//! The module holds the typed view of the two GBIF payloads the crate relies
//! on, a [`TaxonomyClient`] contract implemented by infrastructure adapters and
//! the [`retry`] policy used for name matching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ontology::{entities::Rank, value_objects::TaxonKey};

pub mod infrastructure;
pub mod retry;

pub use retry::{Attempt, RetryPolicy};

/// Classification returned by the name-match lookup.
///
/// Every field is optional. GBIF omits ranks the matched usage does not
/// have, and a response without `scientificName` means the name was not
/// recognized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub usage_key: Option<u64>,
    pub scientific_name: Option<String>,
    pub canonical_name: Option<String>,
    pub rank: Option<String>,
    pub status: Option<String>,
    pub match_type: Option<String>,
    pub confidence: Option<u32>,

    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,

    pub kingdom_key: Option<u64>,
    pub phylum_key: Option<u64>,
    pub class_key: Option<u64>,
    pub order_key: Option<u64>,
    pub family_key: Option<u64>,
    pub genus_key: Option<u64>,
    pub species_key: Option<u64>,
}

impl ClassificationRecord {
    /// Display name recorded for `rank`.
    #[must_use]
    pub fn name_of(&self, rank: Rank) -> Option<&str> {
        match rank {
            Rank::Kingdom => self.kingdom.as_deref(),
            Rank::Phylum => self.phylum.as_deref(),
            Rank::Class => self.class.as_deref(),
            Rank::Order => self.order.as_deref(),
            Rank::Family => self.family.as_deref(),
            Rank::Genus => self.genus.as_deref(),
            Rank::Species => self.species.as_deref(),
        }
    }

    /// Identifier recorded for `rank`.
    #[must_use]
    pub fn key_of(&self, rank: Rank) -> Option<TaxonKey> {
        let key = match rank {
            Rank::Kingdom => self.kingdom_key,
            Rank::Phylum => self.phylum_key,
            Rank::Class => self.class_key,
            Rank::Order => self.order_key,
            Rank::Family => self.family_key,
            Rank::Genus => self.genus_key,
            Rank::Species => self.species_key,
        };
        key.map(TaxonKey::from)
    }

    /// Whether the service recognized the queried name.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.scientific_name.is_some()
    }
}

/// Entry of a synonym listing. Only the accepted usage matters here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynonymEntry {
    pub key: Option<u64>,
    pub scientific_name: Option<String>,
    pub accepted_key: Option<u64>,
}

impl SynonymEntry {
    /// Returns `true` when this synonym points at `key` as its accepted name.
    #[must_use]
    pub fn accepts(&self, key: u64) -> bool {
        self.accepted_key == Some(key)
    }
}

/// Body of the synonyms endpoint. GBIF answers with a paged envelope; a bare
/// list is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SynonymListing {
    Page { results: Vec<SynonymEntry> },
    List(Vec<SynonymEntry>),
}

impl SynonymListing {
    #[must_use]
    pub fn into_entries(self) -> Vec<SynonymEntry> {
        match self {
            Self::Page { results } => results,
            Self::List(entries) => entries,
        }
    }
}

/// Contract implemented by taxonomic name services.
#[async_trait]
pub trait TaxonomyClient: Send + Sync {
    /// Matches a free-text scientific name to its classification.
    ///
    /// `Ok(None)` means the name is not recognized, including the case where
    /// every attempt allowed by the retry policy failed.
    async fn match_name(&self, name: &str) -> Result<Option<ClassificationRecord>, TaxonomyError>;

    /// Lists the synonyms of the taxon identified by `key`.
    ///
    /// Failures are reported as an empty listing.
    async fn list_synonyms(&self, key: u64) -> Vec<SynonymEntry>;
}

/// Errors raised by taxonomy adapters.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Adapter could not be constructed from its settings.
    #[error("invalid taxonomy client configuration: {0}")]
    Configuration(String),
    /// The request could not be sent or its body could not be read.
    #[error("taxonomy service transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("taxonomy service answered {status} for `{url}`")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    /// The body did not match the expected structure.
    #[error("unexpected taxonomy payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{ClassificationRecord, SynonymListing};
    use crate::ontology::{entities::Rank, value_objects::TaxonKey};

    #[test]
    fn decodes_match_response() {
        let body = serde_json::json!({
            "usageKey": 1341976,
            "scientificName": "Apis mellifera Linnaeus, 1758",
            "canonicalName": "Apis mellifera",
            "rank": "SPECIES",
            "status": "ACCEPTED",
            "confidence": 99,
            "matchType": "EXACT",
            "kingdom": "Animalia",
            "phylum": "Arthropoda",
            "order": "Hymenoptera",
            "family": "Apidae",
            "genus": "Apis",
            "species": "Apis mellifera",
            "kingdomKey": 1,
            "phylumKey": 54,
            "classKey": 216,
            "orderKey": 1457,
            "familyKey": 4334,
            "genusKey": 1334757,
            "speciesKey": 1341976,
            "class": "Insecta",
            "synonym": false
        });

        let record: ClassificationRecord = serde_json::from_value(body).expect("decode record");
        assert!(record.is_recognized());
        assert_eq!(record.name_of(Rank::Class), Some("Insecta"));
        assert_eq!(record.key_of(Rank::Class), Some(TaxonKey::from(216)));
        assert_eq!(record.key_of(Rank::Species), Some(TaxonKey::from(1341976)));
    }

    #[test]
    fn unmatched_response_is_not_recognized() {
        let body = serde_json::json!({
            "confidence": 100,
            "matchType": "NONE",
            "synonym": false
        });
        let record: ClassificationRecord = serde_json::from_value(body).expect("decode record");
        assert!(!record.is_recognized());
        assert_eq!(record.name_of(Rank::Kingdom), None);
    }

    #[test]
    fn synonym_listing_accepts_both_shapes() {
        let paged: SynonymListing = serde_json::from_value(serde_json::json!({
            "offset": 0,
            "limit": 20,
            "endOfRecords": true,
            "results": [{ "key": 7, "acceptedKey": 5 }]
        }))
        .expect("paged listing");
        let bare: SynonymListing =
            serde_json::from_value(serde_json::json!([{ "key": 7, "acceptedKey": 5 }]))
                .expect("bare listing");

        let paged = paged.into_entries();
        assert_eq!(paged, bare.into_entries());
        assert!(paged[0].accepts(5));
        assert!(!paged[0].accepts(7));
    }
}
