//! RDF data model for the quadfetch client
//!
//! This crate provides the canonical types exchanged between the transport
//! layer and the codecs:
//!
//! - `Term` - IRI, blank node, or literal
//! - `Quad` - subject/predicate/object plus an optional named-graph label
//! - `Dataset` - a mutable, unordered set of quads
//! - `DatasetFactory` - the capability used to materialize response streams
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction is a serializer concern, driven by a `PrefixMap` hint.
//!
//! 2. **Explicit datatypes** - Literals always carry an explicit datatype
//!    IRI. Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`.
//!
//! 3. **Set semantics** - `Dataset` deduplicates on insert; insertion order
//!    is not observable.
//!
//! # Example
//!
//! ```
//! use quadfetch_graph::{Dataset, Quad, Term};
//!
//! let mut dataset = Dataset::new();
//!
//! dataset.add(Quad::new(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! ));
//!
//! assert_eq!(dataset.len(), 1);
//! ```

mod dataset;
mod quad;
mod term;
pub mod vocab;

pub use dataset::{Dataset, DatasetFactory, DefaultDatasetFactory, PrefixMap};
pub use quad::Quad;
pub use term::{BlankId, Term};
