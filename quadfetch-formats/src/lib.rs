//! Codec capabilities and media-type registry
//!
//! This crate defines the seam between the HTTP negotiation layer and the
//! wire formats:
//!
//! - `QuadDecoder` / `QuadEncoder` - capabilities converting between byte
//!   streams and quad streams for one media type
//! - `FormatRegistry` - two independent, insertion-ordered lookup tables
//!   (decoders and encoders) keyed by parameterless media type
//! - `NTriplesCodec` - a reference line-based codec for
//!   `application/n-triples` and `application/n-quads`
//!
//! Registration order is significant: it defines lookup priority and the
//! ordering of Accept headers built from the decoder table.
//!
//! # Example
//!
//! ```
//! use quadfetch_formats::FormatRegistry;
//!
//! let registry = FormatRegistry::common();
//! assert!(registry.decoders().has("application/n-triples"));
//!
//! let accept: Vec<&str> = registry.decoders().list().collect();
//! assert_eq!(accept, ["application/n-triples", "application/n-quads"]);
//! ```

mod codec;
mod error;
mod ntriples;
mod registry;

pub use codec::{ByteStream, DecodeOptions, EncodeOptions, QuadDecoder, QuadEncoder, QuadStream};
pub use error::{FormatError, Result};
pub use ntriples::{NTriplesCodec, MEDIA_TYPE_NQUADS, MEDIA_TYPE_NTRIPLES};
pub use registry::{base_media_type, CodecTable, FormatRegistry};
