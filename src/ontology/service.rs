use std::sync::Arc;

use crate::{
    config::{OntologySettings, TaxonomySettings},
    ontology::{
        accumulator::accumulate, entities::TaxonMapping, render::render_with,
        resolver::resolve_accepted,
    },
    taxonomy::{infrastructure::GbifClient, TaxonomyClient, TaxonomyError},
};

/// Type alias simplifying taxonomy client trait object usage inside the service.
pub type TaxonomyHandle = dyn TaxonomyClient + 'static;

/// Turns species names into an ontology document.
///
/// Names are processed one after another in input order. Each one is matched
/// against the taxonomy service, its classification folded into a fresh
/// [`TaxonMapping`] and its accepted name backfilled from the synonym
/// listing. Names that are not recognized, or whose lookup fails, are logged
/// and skipped.
#[derive(Clone)]
pub struct OwlGenerator {
    client: Arc<TaxonomyHandle>,
    settings: OntologySettings,
}

impl OwlGenerator {
    /// Creates a new [`OwlGenerator`] from a client handle.
    pub fn new(client: Arc<TaxonomyHandle>, settings: OntologySettings) -> Self {
        Self { client, settings }
    }

    /// Builds a generator talking to GBIF from configuration settings.
    pub fn from_config(
        taxonomy: &TaxonomySettings,
        ontology: &OntologySettings,
    ) -> Result<Self, TaxonomyError> {
        let client = GbifClient::try_new(taxonomy)?;
        Ok(Self::new(Arc::new(client), ontology.clone()))
    }

    /// Collects the taxa of every recognized name.
    pub async fn build_mapping<S>(&self, names: &[S]) -> TaxonMapping
    where
        S: AsRef<str> + Sync,
    {
        let mut mapping = TaxonMapping::new();
        for name in names {
            let name = name.as_ref();
            let record = match self.client.match_name(name).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    tracing::info!(species = name, "skipping unrecognized species");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(
                        species = name,
                        err.msg = %err,
                        err.detail = ?err,
                        "species lookup failed, skipping"
                    );
                    continue;
                }
            };
            tracing::debug!(
                species = name,
                scientific_name = record.scientific_name.as_deref(),
                usage_key = record.usage_key,
                status = record.status.as_deref(),
                "fetched classification"
            );

            accumulate(&record, &mut mapping);
            resolve_accepted(&record, &mut mapping, self.client.as_ref()).await;
        }
        mapping
    }

    /// Renders the ontology of `names`.
    pub async fn generate<S>(&self, names: &[S]) -> String
    where
        S: AsRef<str> + Sync,
    {
        let mapping = self.build_mapping(names).await;
        tracing::info!(
            requested = names.len(),
            classes = mapping.len(),
            "generated ontology"
        );
        render_with(&mapping, &self.settings)
    }
}
