use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::value_objects::TaxonKey;

/// Taxonomic levels folded into the hierarchy, from the root downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// Every rank in hierarchy order.
    pub const ALL: [Self; 7] = [
        Self::Kingdom,
        Self::Phylum,
        Self::Class,
        Self::Order,
        Self::Family,
        Self::Genus,
        Self::Species,
    ];

    /// Returns the lowercase label used by GBIF for this rank.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kingdom => "kingdom",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
        }
    }

    /// Returns the rank immediately above this one, if any.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|rank| *rank == self)?;
        index.checked_sub(1).map(|parent| Self::ALL[parent])
    }

    /// Returns the ranks above this one, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), |rank| rank.parent())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single class of the generated ontology.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaxonNode {
    pub name: String,
    pub rank: Rank,
    /// Key of the enclosing taxon. `None` for lineage roots.
    pub parent_key: Option<TaxonKey>,
}

impl TaxonNode {
    /// Creates a new node without a parent.
    #[must_use]
    pub fn new(name: impl Into<String>, rank: Rank) -> Self {
        Self {
            name: name.into(),
            rank,
            parent_key: None,
        }
    }

    /// Sets the parent taxon.
    #[must_use]
    pub fn with_parent(mut self, parent_key: Option<TaxonKey>) -> Self {
        self.parent_key = parent_key;
        self
    }
}

/// Insertion ordered set of taxa keyed by their GBIF identifier.
///
/// The first node recorded for a key wins; later insertions for the same key
/// are ignored. Iteration follows insertion order, which in turn decides the
/// order of classes in the rendered document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaxonMapping {
    entries: Vec<(TaxonKey, TaxonNode)>,
    index: HashMap<TaxonKey, usize>,
}

impl TaxonMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under `key` unless the key is already present.
    ///
    /// Returns `true` when the node was inserted.
    pub fn insert(&mut self, key: TaxonKey, node: TaxonNode) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, node));
        true
    }

    #[must_use]
    pub fn contains(&self, key: &TaxonKey) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &TaxonKey) -> Option<&TaxonNode> {
        self.index.get(key).map(|position| &self.entries[*position].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the taxa in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TaxonKey, &TaxonNode)> {
        self.entries.iter().map(|(key, node)| (key, node))
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &TaxonKey> {
        self.entries.iter().map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rank, TaxonMapping, TaxonNode};
    use crate::ontology::value_objects::TaxonKey;

    #[test]
    fn rank_parents_follow_hierarchy_order() {
        assert_eq!(Rank::Kingdom.parent(), None);
        assert_eq!(Rank::Phylum.parent(), Some(Rank::Kingdom));
        assert_eq!(Rank::Species.parent(), Some(Rank::Genus));
        assert_eq!(
            Rank::Order.ancestors().collect::<Vec<_>>(),
            vec![Rank::Class, Rank::Phylum, Rank::Kingdom]
        );
    }

    #[test]
    fn rank_serializes_lowercase() {
        let value = serde_json::to_value(Rank::Family).expect("serialize rank");
        assert_eq!(value, serde_json::json!("family"));
    }

    #[test]
    fn first_insertion_wins() {
        let mut mapping = TaxonMapping::new();
        assert!(mapping.insert(TaxonKey::from(1), TaxonNode::new("Animalia", Rank::Kingdom)));
        assert!(!mapping.insert(TaxonKey::from(1), TaxonNode::new("Plantae", Rank::Kingdom)));

        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.get(&TaxonKey::from(1)).map(|node| node.name.as_str()),
            Some("Animalia")
        );
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut mapping = TaxonMapping::new();
        mapping.insert(TaxonKey::from(44), TaxonNode::new("Chordata", Rank::Phylum));
        mapping.insert(TaxonKey::from(1), TaxonNode::new("Animalia", Rank::Kingdom));
        mapping.insert(TaxonKey::from(359), TaxonNode::new("Mammalia", Rank::Class));

        let keys: Vec<_> = mapping.keys().map(TaxonKey::as_str).collect();
        assert_eq!(keys, vec!["44", "1", "359"]);
    }
}
