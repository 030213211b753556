use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects malformed identifiers so that every class
    /// emitted into a document carries a resolvable `rdf:about`.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Wraps a constant that is known to be a valid IRI.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(NamedNode::new(value).is_ok());
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.value
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// Stringified GBIF usage key identifying a single taxon.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonKey(String);

impl TaxonKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TaxonKey {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Display for TaxonKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Iri, TaxonKey};

    #[test]
    fn accepts_valid_iri() {
        let iri = Iri::new("https://www.gbif.org/species/").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://www.gbif.org/species/");
    }

    #[test]
    fn rejects_invalid_iri() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn taxon_key_displays_the_numeric_key() {
        assert_eq!(TaxonKey::from(1341976).to_string(), "1341976");
        assert_eq!(TaxonKey::new("2441017").as_str(), "2441017");
    }

    #[test]
    fn deserializes_through_validation() {
        let err = serde_json::from_str::<Iri>("\"no scheme\"");
        assert!(err.is_err());
        let iri: Iri = serde_json::from_str("\"https://example.org/\"").expect("valid IRI");
        assert_eq!(iri.to_string(), "https://example.org/");
    }
}
