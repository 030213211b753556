//! Fixtures shared by unit and integration tests.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    config::{Config, OntologySettings},
    taxonomy::{ClassificationRecord, SynonymEntry, TaxonomyClient, TaxonomyError},
};

/// In-memory [`TaxonomyClient`] answering from canned data.
///
/// Names without a canned record are unrecognized, keys without canned
/// synonyms have none. Every call is recorded.
#[derive(Default)]
pub struct StaticTaxonomy {
    records: HashMap<String, ClassificationRecord>,
    failures: Vec<String>,
    synonyms: HashMap<u64, Vec<SynonymEntry>>,
    match_calls: Mutex<Vec<String>>,
    synonym_calls: Mutex<Vec<u64>>,
}

impl StaticTaxonomy {
    #[must_use]
    pub fn with_record(mut self, name: &str, record: ClassificationRecord) -> Self {
        self.records.insert(name.to_string(), record);
        self
    }

    /// Makes `match_name` fail with an error for `name`.
    #[must_use]
    pub fn with_failure(mut self, name: &str) -> Self {
        self.failures.push(name.to_string());
        self
    }

    #[must_use]
    pub fn with_synonyms(mut self, key: u64, synonyms: Vec<SynonymEntry>) -> Self {
        self.synonyms.insert(key, synonyms);
        self
    }

    /// A client knowing every fixture in [`records`].
    #[must_use]
    pub fn with_fixtures() -> Self {
        records::all()
            .into_iter()
            .fold(Self::default(), |client, (name, record)| {
                client.with_record(name, record)
            })
    }

    /// # Panics
    ///
    /// Panics if the call log lock is poisoned.
    pub fn match_calls(&self) -> Vec<String> {
        self.match_calls.lock().unwrap().clone()
    }

    /// # Panics
    ///
    /// Panics if the call log lock is poisoned.
    pub fn synonym_calls(&self) -> Vec<u64> {
        self.synonym_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaxonomyClient for StaticTaxonomy {
    async fn match_name(&self, name: &str) -> Result<Option<ClassificationRecord>, TaxonomyError> {
        self.match_calls.lock().unwrap().push(name.to_string());
        if self.failures.iter().any(|failure| failure == name) {
            return Err(TaxonomyError::Configuration(format!(
                "canned failure for `{name}`"
            )));
        }
        Ok(self
            .records
            .get(name)
            .filter(|record| record.is_recognized())
            .cloned())
    }

    async fn list_synonyms(&self, key: u64) -> Vec<SynonymEntry> {
        self.synonym_calls.lock().unwrap().push(key);
        self.synonyms.get(&key).cloned().unwrap_or_default()
    }
}

/// Configuration used by tests: no logger, no retry delay.
#[must_use]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.logger.enable = false;
    config.server.binding = "127.0.0.1".to_string();
    config.server.port = 0;
    config.taxonomy.retry.delay_ms = 0;
    config.ontology = OntologySettings::default();
    config
}

/// Classification records modelled on GBIF match responses.
pub mod records {
    use crate::taxonomy::ClassificationRecord;

    fn lineage(
        scientific_name: &str,
        keys: [Option<u64>; 7],
        names: [Option<&str>; 7],
    ) -> ClassificationRecord {
        let name = |index: usize| names[index].map(ToString::to_string);
        ClassificationRecord {
            usage_key: keys[6].or(keys[5]),
            scientific_name: Some(scientific_name.to_string()),
            canonical_name: names[6].or(names[5]).map(ToString::to_string),
            rank: Some(if keys[6].is_some() { "SPECIES" } else { "GENUS" }.to_string()),
            status: Some("ACCEPTED".to_string()),
            match_type: Some("EXACT".to_string()),
            confidence: Some(99),
            kingdom: name(0),
            phylum: name(1),
            class: name(2),
            order: name(3),
            family: name(4),
            genus: name(5),
            species: name(6),
            kingdom_key: keys[0],
            phylum_key: keys[1],
            class_key: keys[2],
            order_key: keys[3],
            family_key: keys[4],
            genus_key: keys[5],
            species_key: keys[6],
        }
    }

    #[must_use]
    pub fn apis_mellifera() -> ClassificationRecord {
        lineage(
            "Apis mellifera Linnaeus, 1758",
            [
                Some(1),
                Some(54),
                Some(216),
                Some(1457),
                Some(7_799_978),
                Some(1_334_757),
                Some(1_341_976),
            ],
            [
                Some("Animalia"),
                Some("Arthropoda"),
                Some("Insecta"),
                Some("Hymenoptera"),
                Some("Apidae"),
                Some("Apis"),
                Some("Apis mellifera"),
            ],
        )
    }

    #[must_use]
    pub fn bos_taurus() -> ClassificationRecord {
        lineage(
            "Bos taurus Linnaeus, 1758",
            [
                Some(1),
                Some(44),
                Some(359),
                Some(731),
                Some(9614),
                Some(2_441_017),
                Some(2_441_022),
            ],
            [
                Some("Animalia"),
                Some("Chordata"),
                Some("Mammalia"),
                Some("Artiodactyla"),
                Some("Bovidae"),
                Some("Bos"),
                Some("Bos taurus"),
            ],
        )
    }

    #[must_use]
    pub fn ovis_aries() -> ClassificationRecord {
        lineage(
            "Ovis aries Linnaeus, 1758",
            [
                Some(1),
                Some(44),
                Some(359),
                Some(731),
                Some(9614),
                Some(2_441_110),
                Some(2_441_114),
            ],
            [
                Some("Animalia"),
                Some("Chordata"),
                Some("Mammalia"),
                Some("Artiodactyla"),
                Some("Bovidae"),
                Some("Ovis"),
                Some("Ovis aries"),
            ],
        )
    }

    /// Genus-level match: no species rank.
    #[must_use]
    pub fn sus() -> ClassificationRecord {
        lineage(
            "Sus Linnaeus, 1758",
            [
                Some(1),
                Some(44),
                Some(359),
                Some(731),
                Some(9612),
                Some(7_705_930),
                None,
            ],
            [
                Some("Animalia"),
                Some("Chordata"),
                Some("Mammalia"),
                Some("Artiodactyla"),
                Some("Suidae"),
                Some("Sus"),
                None,
            ],
        )
    }

    #[must_use]
    pub fn prochilodus_lineatus() -> ClassificationRecord {
        lineage(
            "Prochilodus lineatus (Valenciennes, 1837)",
            [
                Some(1),
                Some(44),
                Some(204),
                Some(1157),
                Some(5384),
                Some(2_353_273),
                Some(2_353_280),
            ],
            [
                Some("Animalia"),
                Some("Chordata"),
                Some("Actinopterygii"),
                Some("Characiformes"),
                Some("Prochilodontidae"),
                Some("Prochilodus"),
                Some("Prochilodus lineatus"),
            ],
        )
    }

    /// Synonym match: the classification describes the accepted species.
    #[must_use]
    pub fn prochilodus_scrofa() -> ClassificationRecord {
        ClassificationRecord {
            usage_key: Some(5_212_916),
            scientific_name: Some("Prochilodus scrofa Steindachner, 1881".to_string()),
            canonical_name: Some("Prochilodus scrofa".to_string()),
            status: Some("SYNONYM".to_string()),
            ..prochilodus_lineatus()
        }
    }

    /// Every fixture keyed by the name it answers to.
    #[must_use]
    pub fn all() -> Vec<(&'static str, ClassificationRecord)> {
        vec![
            ("Apis mellifera", apis_mellifera()),
            ("Bos taurus", bos_taurus()),
            ("Ovis aries", ovis_aries()),
            ("Sus", sus()),
            ("Prochilodus lineatus", prochilodus_lineatus()),
            ("Prochilodus scrofa", prochilodus_scrofa()),
        ]
    }
}
