//! Media-type registry for codec instance sharing
//!
//! The `FormatRegistry` holds two independent lookup tables, one for
//! decoders and one for encoders. Keys are media types without parameters
//! (`text/turtle`, never `text/turtle; charset=utf-8`); lookups strip
//! parameters from the query before matching.
//!
//! Insertion order is preserved and significant:
//! - the decoder table's order defines the Accept header the client builds,
//! - the encoder table's first entry is the default request content type.

use crate::codec::{QuadDecoder, QuadEncoder};
use crate::ntriples::{NTriplesCodec, MEDIA_TYPE_NQUADS, MEDIA_TYPE_NTRIPLES};
use std::sync::Arc;

/// Strip `;`-delimited parameters from a media-type string
///
/// `"text/turtle; charset=utf-8"` becomes `"text/turtle"`.
pub fn base_media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}

/// An insertion-ordered table from media type to codec instance
///
/// Registering an existing media type replaces the codec in place, keeping
/// its position; new media types append.
pub struct CodecTable<T: ?Sized> {
    entries: Vec<(String, Arc<T>)>,
}

impl<T: ?Sized> CodecTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a codec for a media type
    ///
    /// Parameters are stripped from the key before storing.
    pub fn register(&mut self, media_type: impl AsRef<str>, codec: Arc<T>) {
        let key = base_media_type(media_type.as_ref()).to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = codec,
            None => self.entries.push((key, codec)),
        }
    }

    /// Check if a media type is registered
    pub fn has(&self, media_type: &str) -> bool {
        let key = base_media_type(media_type);
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Get the codec registered for a media type
    pub fn get(&self, media_type: &str) -> Option<Arc<T>> {
        let key = base_media_type(media_type);
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, codec)| codec.clone())
    }

    /// List registered media types in registration order
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Get the first registered media type (the table's priority default)
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }

    /// Get the number of registered media types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for CodecTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder and encoder tables shared by all requests of a client
///
/// The registry is read-only from the negotiators' perspective; build it
/// up front and share it as `Arc<FormatRegistry>` across concurrent
/// requests.
#[derive(Default)]
pub struct FormatRegistry {
    decoders: CodecTable<dyn QuadDecoder>,
    encoders: CodecTable<dyn QuadEncoder>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the bundled N-Triples/N-Quads codec
    /// registered in both tables
    pub fn common() -> Self {
        let mut registry = Self::new();
        let codec = Arc::new(NTriplesCodec);
        registry.register_decoder(MEDIA_TYPE_NTRIPLES, codec.clone());
        registry.register_decoder(MEDIA_TYPE_NQUADS, codec.clone());
        registry.register_encoder(MEDIA_TYPE_NTRIPLES, codec.clone());
        registry.register_encoder(MEDIA_TYPE_NQUADS, codec);
        registry
    }

    /// Get the decoder table
    pub fn decoders(&self) -> &CodecTable<dyn QuadDecoder> {
        &self.decoders
    }

    /// Get the encoder table
    pub fn encoders(&self) -> &CodecTable<dyn QuadEncoder> {
        &self.encoders
    }

    /// Register a decoder for a media type
    pub fn register_decoder(&mut self, media_type: impl AsRef<str>, codec: Arc<dyn QuadDecoder>) {
        self.decoders.register(media_type, codec);
    }

    /// Register an encoder for a media type
    pub fn register_encoder(&mut self, media_type: impl AsRef<str>, codec: Arc<dyn QuadEncoder>) {
        self.encoders.register(media_type, codec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ByteStream, DecodeOptions, QuadStream};

    struct NoopDecoder;

    impl QuadDecoder for NoopDecoder {
        fn decode(&self, _input: ByteStream, _options: DecodeOptions) -> QuadStream {
            Box::pin(futures::stream::empty())
        }
    }

    #[test]
    fn test_base_media_type() {
        assert_eq!(base_media_type("text/turtle"), "text/turtle");
        assert_eq!(base_media_type("text/turtle; charset=utf-8"), "text/turtle");
        assert_eq!(base_media_type("application/json;q=0.9"), "application/json");
        assert_eq!(base_media_type(""), "");
    }

    #[test]
    fn test_table_preserves_registration_order() {
        let mut table: CodecTable<dyn QuadDecoder> = CodecTable::new();
        table.register("text/turtle", Arc::new(NoopDecoder));
        table.register("application/n-triples", Arc::new(NoopDecoder));
        table.register("application/ld+json", Arc::new(NoopDecoder));

        let listed: Vec<&str> = table.list().collect();
        assert_eq!(
            listed,
            ["text/turtle", "application/n-triples", "application/ld+json"]
        );
        assert_eq!(table.first(), Some("text/turtle"));
    }

    #[test]
    fn test_table_replace_keeps_position() {
        let mut table: CodecTable<dyn QuadDecoder> = CodecTable::new();
        table.register("text/turtle", Arc::new(NoopDecoder));
        table.register("application/n-triples", Arc::new(NoopDecoder));
        table.register("text/turtle", Arc::new(NoopDecoder));

        let listed: Vec<&str> = table.list().collect();
        assert_eq!(listed, ["text/turtle", "application/n-triples"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_strips_parameters() {
        let mut table: CodecTable<dyn QuadDecoder> = CodecTable::new();
        table.register("text/turtle; charset=utf-8", Arc::new(NoopDecoder));

        assert!(table.has("text/turtle"));
        assert!(table.has("text/turtle; charset=iso-8859-1"));
        assert!(table.get("text/turtle").is_some());
        assert_eq!(table.list().collect::<Vec<_>>(), ["text/turtle"]);
    }

    #[test]
    fn test_common_registry() {
        let registry = FormatRegistry::common();

        assert!(registry.decoders().has(MEDIA_TYPE_NTRIPLES));
        assert!(registry.decoders().has(MEDIA_TYPE_NQUADS));
        assert!(registry.encoders().has(MEDIA_TYPE_NTRIPLES));
        assert_eq!(registry.encoders().first(), Some(MEDIA_TYPE_NTRIPLES));
    }
}
