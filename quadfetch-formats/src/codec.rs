//! Decoder and encoder capability traits
//!
//! Codecs are runtime-agnostic: both directions take a stream and return a
//! stream, with all suspension driven by the consumer. Implementations must
//! not read from the input before the returned stream is polled.

use crate::error::FormatError;
use bytes::Bytes;
use futures::Stream;
use quadfetch_graph::{PrefixMap, Quad};
use std::pin::Pin;

/// A lazy sequence of raw body chunks
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// A lazy sequence of parsed quads
pub type QuadStream = Pin<Box<dyn Stream<Item = Result<Quad, FormatError>> + Send>>;

/// Inputs a decoder may need beyond the raw bytes
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    /// Base IRI for resolving relative IRIs, typically the response URL
    pub base_iri: Option<String>,

    /// Out-of-band JSON-LD @context document, when one was linked
    pub context: Option<serde_json::Value>,
}

/// Serialization hints passed through from the request
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Prefix mappings for formats with a compact IRI syntax
    pub prefixes: PrefixMap,
}

/// Capability decoding a byte stream into a quad stream for one media type
pub trait QuadDecoder: Send + Sync {
    /// Start decoding; the returned stream yields quads as input arrives
    fn decode(&self, input: ByteStream, options: DecodeOptions) -> QuadStream;
}

/// Capability encoding a quad stream into a byte stream for one media type
pub trait QuadEncoder: Send + Sync {
    /// Start encoding; the returned stream yields chunks as quads arrive
    fn encode(&self, input: QuadStream, options: EncodeOptions) -> ByteStream;
}
