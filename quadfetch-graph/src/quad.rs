//! RDF quad - a triple plus an optional named-graph label

use crate::Term;
use serde::{Deserialize, Serialize};

/// A subject-predicate-object statement with an optional graph label
///
/// A quad with `graph: None` belongs to the default graph. Equality, hashing,
/// and ordering cover all four positions, so `Dataset` deduplicates quads
/// that differ only in their graph label correctly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    /// Subject (IRI or blank node)
    pub s: Term,
    /// Predicate (IRI)
    pub p: Term,
    /// Object (any term)
    pub o: Term,
    /// Named-graph label (IRI or blank node), None for the default graph
    pub g: Option<Term>,
}

impl Quad {
    /// Create a quad in the default graph
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o, g: None }
    }

    /// Create a quad with a named-graph label
    pub fn with_graph(s: Term, p: Term, o: Term, g: Term) -> Self {
        Self {
            s,
            p,
            o,
            g: Some(g),
        }
    }

    /// Check if this quad belongs to the default graph
    pub fn is_default_graph(&self) -> bool {
        self.g.is_none()
    }

    /// Get the graph label, if any
    pub fn graph(&self) -> Option<&Term> {
        self.g.as_ref()
    }
}

impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.g {
            Some(g) => write!(f, "{} {} {} {} .", self.s, self.p, self.o, g),
            None => write!(f, "{} {} {} .", self.s, self.p, self.o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_default_graph() {
        let quad = Quad::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert!(quad.is_default_graph());
        assert_eq!(quad.graph(), None);
    }

    #[test]
    fn test_quad_named_graph() {
        let quad = Quad::with_graph(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
            Term::iri("http://example.org/g"),
        );
        assert!(!quad.is_default_graph());
        assert_eq!(
            quad.graph().and_then(Term::as_iri),
            Some("http://example.org/g")
        );
    }

    #[test]
    fn test_quad_equality_covers_graph_label() {
        let s = Term::iri("http://example.org/s");
        let p = Term::iri("http://example.org/p");
        let o = Term::string("o");

        let default = Quad::new(s.clone(), p.clone(), o.clone());
        let named = Quad::with_graph(s, p, o, Term::iri("http://example.org/g"));
        assert_ne!(default, named);
    }

    #[test]
    fn test_quad_display() {
        let quad = Quad::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert_eq!(
            format!("{}", quad),
            "<http://example.org/s> <http://example.org/p> \"o\" ."
        );
    }
}
