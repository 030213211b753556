use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};

use crate::{
    config::TaxonomySettings,
    taxonomy::{
        Attempt, ClassificationRecord, RetryPolicy, SynonymEntry, SynonymListing, TaxonomyClient,
        TaxonomyError,
    },
};

/// Taxonomy client backed by the GBIF species API.
#[derive(Clone, Debug)]
pub struct GbifClient {
    client: Client,
    api_base: Url,
    retry: RetryPolicy,
}

impl GbifClient {
    /// Instantiates a new client using the provided configuration.
    pub fn try_new(settings: &TaxonomySettings) -> Result<Self, TaxonomyError> {
        if settings.api_base.trim().is_empty() {
            return Err(TaxonomyError::Configuration(
                "`taxonomy.api_base` must be provided".to_string(),
            ));
        }
        let api_base = Url::parse(settings.api_base.trim_end_matches('/')).map_err(|err| {
            TaxonomyError::Configuration(format!(
                "`taxonomy.api_base` is not a valid URL ({}): {err}",
                settings.api_base
            ))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(TaxonomyError::Configuration(format!(
                "`taxonomy.api_base` cannot be used as a base URL: {}",
                settings.api_base
            )));
        }

        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_base,
            retry: settings.retry.policy(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{api_base}/species/match?name=<name>`, spaces encoded as `%20`.
    pub fn match_url(&self, name: &str) -> Url {
        let mut url = self.endpoint(&["species", "match"]);
        url.query_pairs_mut().append_pair("name", name);
        // form encoding turns spaces into `+`; literal plus signs are already `%2B`
        let query = url.query().map(|query| query.replace('+', "%20"));
        url.set_query(query.as_deref());
        url
    }

    /// `{api_base}/species/{key}/synonyms`.
    pub fn synonyms_url(&self, key: u64) -> Url {
        self.endpoint(&["species", &key.to_string(), "synonyms"])
    }

    async fn get(&self, url: Url) -> Result<Bytes, TaxonomyError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TaxonomyError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?)
    }

    async fn fetch_synonyms(&self, key: u64) -> Result<Vec<SynonymEntry>, TaxonomyError> {
        let body = self.get(self.synonyms_url(key)).await?;
        let listing: SynonymListing = serde_json::from_slice(&body)?;
        Ok(listing.into_entries())
    }
}

#[async_trait]
impl TaxonomyClient for GbifClient {
    async fn match_name(&self, name: &str) -> Result<Option<ClassificationRecord>, TaxonomyError> {
        let url = self.match_url(name);

        let outcome = self
            .retry
            .run(|attempt| {
                let url = url.clone();
                async move {
                    tracing::debug!(attempt, species = name, url = %url, "matching species name");
                    match self.get(url).await {
                        Ok(body) => match serde_json::from_slice::<ClassificationRecord>(&body) {
                            Ok(record) => Attempt::Done(Some(record)),
                            Err(err) => {
                                tracing::warn!(
                                    species = name,
                                    err.msg = %err,
                                    "match response has an unexpected structure"
                                );
                                Attempt::Done(None)
                            }
                        },
                        Err(err) => Attempt::Retry(err.to_string()),
                    }
                }
            })
            .await;

        let Some(record) = outcome.flatten() else {
            return Ok(None);
        };
        if !record.is_recognized() {
            tracing::info!(
                species = name,
                match_type = record.match_type.as_deref().unwrap_or("NONE"),
                "species name not recognized"
            );
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn list_synonyms(&self, key: u64) -> Vec<SynonymEntry> {
        self.fetch_synonyms(key).await.unwrap_or_else(|err| {
            tracing::warn!(key, err.msg = %err, err.detail = ?err, "synonym lookup failed");
            Vec::new()
        })
    }
}
