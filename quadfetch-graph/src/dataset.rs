//! RDF dataset - a mutable, unordered set of quads

use crate::Quad;
use std::collections::{BTreeMap, HashSet};

/// Prefix-to-namespace mappings used as a serialization hint
///
/// BTreeMap keeps iteration deterministic for serializers that emit prefix
/// declarations.
pub type PrefixMap = BTreeMap<String, String>;

/// A mutable set of quads
///
/// # Design Decisions
///
/// - **Set semantics**: duplicate quads collapse on insert; parsers that
///   emit the same statement twice produce a single entry.
/// - **No observable ordering**: iteration order is arbitrary. Collect and
///   sort when deterministic output is needed.
///
/// # Example
///
/// ```
/// use quadfetch_graph::{Dataset, Quad, Term};
///
/// let mut dataset = Dataset::new();
///
/// let quad = Quad::new(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// );
///
/// dataset.add(quad.clone());
/// dataset.add(quad);
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    quads: HashSet<Quad>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quad
    ///
    /// Returns true if the quad was not already present.
    pub fn add(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    /// Check if the dataset contains a quad
    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    /// Remove a quad
    ///
    /// Returns true if the quad was present.
    pub fn remove(&mut self, quad: &Quad) -> bool {
        self.quads.remove(quad)
    }

    /// Get the number of quads
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterate over quads (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Quad;
    type IntoIter = std::collections::hash_set::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quad;
    type IntoIter = std::collections::hash_set::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Dataset {
            quads: iter.into_iter().collect(),
        }
    }
}

impl Extend<Quad> for Dataset {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.quads.extend(iter);
    }
}

/// Capability for creating empty datasets
///
/// The client materializes a response quad stream only when this capability
/// is supplied; it is an explicit parameter, never inferred from the shape
/// of another object.
pub trait DatasetFactory: Send + Sync {
    /// Create a new empty dataset
    fn dataset(&self) -> Dataset;
}

/// Factory producing plain `Dataset` containers
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDatasetFactory;

impl DatasetFactory for DefaultDatasetFactory {
    fn dataset(&self) -> Dataset {
        Dataset::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    fn quad(object: &str) -> Quad {
        Quad::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string(object),
        )
    }

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::new();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_dataset_dedupe_on_insert() {
        let mut dataset = Dataset::new();
        assert!(dataset.add(quad("o")));
        assert!(!dataset.add(quad("o")));
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_dataset_contains_and_remove() {
        let mut dataset = Dataset::new();
        dataset.add(quad("o"));

        assert!(dataset.contains(&quad("o")));
        assert!(!dataset.contains(&quad("other")));

        assert!(dataset.remove(&quad("o")));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let dataset: Dataset = vec![quad("a"), quad("b"), quad("a")].into_iter().collect();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_default_factory() {
        let factory = DefaultDatasetFactory;
        let dataset = factory.dataset();
        assert!(dataset.is_empty());
    }
}
