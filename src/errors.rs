//! # Application Error Handling

use crate::taxonomy::TaxonomyError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error("cannot parse `{1}`: {0}")]
    YAMLFile(#[source] serde_yaml::Error, String),

    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl Error {
    /// Message suitable for a client-facing `{"error": ...}` payload.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            _ => "internal server error".to_string(),
        }
    }
}
