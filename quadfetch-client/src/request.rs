//! Outgoing request negotiation
//!
//! `negotiate` prepares a request for the transport: it builds the Accept
//! header from the decoder table and, when the body is quad-shaped, picks an
//! encoder and replaces the body with the serialized byte stream. It never
//! performs network I/O.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use quadfetch_formats::{base_media_type, ByteStream, EncodeOptions, FormatRegistry, QuadStream};
use quadfetch_graph::{PrefixMap, Quad};

use crate::error::{Error, Result};
use crate::stream::to_stream;

/// Request body in one of its lifecycle shapes
///
/// Callers hand over quad-shaped bodies; `negotiate` converts them to
/// `Bytes`. `Text` and `Bytes` bodies are considered wire-ready and pass
/// through untouched, with the existing `content-type` header trusted
/// as-is.
#[derive(Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Wire-ready text
    Text(String),
    /// In-memory finite quad sequence
    Quads(Vec<Quad>),
    /// Lazy quad sequence
    QuadStream(QuadStream),
    /// Wire-ready byte stream
    Bytes(ByteStream),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::None => f.write_str("None"),
            RequestBody::Text(text) => f.debug_tuple("Text").field(text).finish(),
            RequestBody::Quads(quads) => f.debug_tuple("Quads").field(quads).finish(),
            RequestBody::QuadStream(_) => f.debug_tuple("QuadStream").field(&"..").finish(),
            RequestBody::Bytes(_) => f.debug_tuple("Bytes").field(&"..").finish(),
        }
    }
}

impl RequestBody {
    /// Check if a body is present
    pub fn is_none(&self) -> bool {
        matches!(self, RequestBody::None)
    }

    /// Check if the body still needs an encoder pass
    pub fn is_quad_shaped(&self) -> bool {
        matches!(self, RequestBody::Quads(_) | RequestBody::QuadStream(_))
    }
}

/// Mutable options for one outgoing request
///
/// Exclusively owned by the caller until handed to the transport.
#[derive(Debug)]
pub struct RequestOptions {
    /// Request method
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Prefix mappings forwarded to the encoder as a serialization hint
    pub prefixes: PrefixMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: RequestBody::None,
            prefixes: PrefixMap::new(),
        }
    }
}

/// Negotiate headers and body against the format registry
///
/// - Sets `accept` to the decoder media types in registry order unless the
///   caller already set one (header lookups are case-insensitive).
/// - Leaves absent, text, and byte-stream bodies untouched.
/// - For quad-shaped bodies, validates or chooses the request content type
///   (first encoder in registry order when none was set) and replaces the
///   body with the encoder's byte stream.
///
/// Mutates `options` in place and returns it for chaining. Fails before any
/// network call with `UnsupportedMediaType` when the declared content type
/// has no encoder.
pub fn negotiate<'a>(
    options: &'a mut RequestOptions,
    formats: &FormatRegistry,
) -> Result<&'a mut RequestOptions> {
    if !options.headers.contains_key(ACCEPT) {
        let accept = formats.decoders().list().collect::<Vec<_>>().join(", ");
        if !accept.is_empty() {
            let value = HeaderValue::from_str(&accept)
                .map_err(|e| Error::invalid_header(format!("accept: {e}")))?;
            options.headers.insert(ACCEPT, value);
            tracing::debug!(accept = %accept, "built accept header from decoder registry");
        }
    }

    if !options.body.is_quad_shaped() {
        return Ok(options);
    }

    let media_type = match options.headers.get(CONTENT_TYPE) {
        Some(value) => {
            let requested = value
                .to_str()
                .map_err(|e| Error::invalid_header(format!("content-type: {e}")))?;
            let media_type = base_media_type(requested).to_string();
            if !formats.encoders().has(&media_type) {
                return Err(Error::unsupported_media_type(media_type));
            }
            media_type
        }
        None => {
            let media_type = formats
                .encoders()
                .first()
                .ok_or(Error::NoEncoders)?
                .to_string();
            let value = HeaderValue::from_str(&media_type)
                .map_err(|e| Error::invalid_header(format!("content-type: {e}")))?;
            options.headers.insert(CONTENT_TYPE, value);
            media_type
        }
    };

    let encoder = formats
        .encoders()
        .get(&media_type)
        .ok_or_else(|| Error::unsupported_media_type(&media_type))?;

    let encode_options = EncodeOptions {
        prefixes: options.prefixes.clone(),
    };

    tracing::debug!(media_type = %media_type, "serializing request body");

    options.body = match std::mem::take(&mut options.body) {
        RequestBody::Quads(quads) => {
            RequestBody::Bytes(encoder.encode(to_stream(quads), encode_options))
        }
        RequestBody::QuadStream(stream) => {
            RequestBody::Bytes(encoder.encode(stream, encode_options))
        }
        other => other,
    };

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use quadfetch_formats::{DecodeOptions, QuadDecoder, QuadEncoder};
    use quadfetch_graph::Term;
    use std::sync::Arc;

    struct NoopDecoder;

    impl QuadDecoder for NoopDecoder {
        fn decode(&self, _input: ByteStream, _options: DecodeOptions) -> QuadStream {
            Box::pin(futures::stream::empty())
        }
    }

    fn registry() -> FormatRegistry {
        let mut registry = FormatRegistry::common();
        registry.register_decoder("text/turtle", Arc::new(NoopDecoder));
        registry
    }

    fn quad() -> Quad {
        Quad::new(Term::iri("s"), Term::iri("p"), Term::string("o"))
    }

    fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_accept_built_in_registry_order() {
        let mut options = RequestOptions::default();
        negotiate(&mut options, &registry()).unwrap();

        assert_eq!(
            header_str(&options.headers, "accept"),
            Some("application/n-triples, application/n-quads, text/turtle")
        );
    }

    #[test]
    fn test_accept_preserved_when_caller_set_it() {
        let mut options = RequestOptions::default();
        options
            .headers
            .insert(ACCEPT, HeaderValue::from_static("text/html"));

        negotiate(&mut options, &registry()).unwrap();

        assert_eq!(header_str(&options.headers, "accept"), Some("text/html"));
        let values: Vec<_> = options.headers.get_all(ACCEPT).iter().collect();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_accept_not_set_for_empty_registry() {
        let mut options = RequestOptions::default();
        negotiate(&mut options, &FormatRegistry::new()).unwrap();
        assert!(options.headers.get(ACCEPT).is_none());
    }

    #[test]
    fn test_no_body_untouched() {
        let mut options = RequestOptions::default();
        negotiate(&mut options, &registry()).unwrap();

        assert!(options.body.is_none());
        assert!(options.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_text_body_untouched() {
        let mut options = RequestOptions {
            body: RequestBody::Text("<s> <p> \"o\" .\n".to_string()),
            ..Default::default()
        };
        options
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/turtle"));

        negotiate(&mut options, &registry()).unwrap();

        // text/turtle has no encoder registered, but string bodies are
        // wire-ready and bypass encoder selection entirely
        assert!(matches!(options.body, RequestBody::Text(_)));
        assert_eq!(
            header_str(&options.headers, "content-type"),
            Some("text/turtle")
        );
    }

    #[test]
    fn test_unsupported_content_type_fails() {
        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            ..Default::default()
        };
        options
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let err = negotiate(&mut options, &registry()).unwrap_err();
        match err {
            Error::UnsupportedMediaType(media_type) => assert_eq!(media_type, "text/html"),
            other => panic!("expected UnsupportedMediaType, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_content_type_parameters_stripped() {
        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            ..Default::default()
        };
        options.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/n-triples; charset=utf-8"),
        );

        negotiate(&mut options, &registry()).unwrap();
        assert!(matches!(options.body, RequestBody::Bytes(_)));
    }

    #[test]
    fn test_default_content_type_is_first_encoder() {
        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            ..Default::default()
        };

        negotiate(&mut options, &registry()).unwrap();

        assert_eq!(
            header_str(&options.headers, "content-type"),
            Some("application/n-triples")
        );
        assert!(matches!(options.body, RequestBody::Bytes(_)));
    }

    #[test]
    fn test_quad_body_without_encoders_fails() {
        let mut registry = FormatRegistry::new();
        registry.register_decoder("text/turtle", Arc::new(NoopDecoder));

        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            ..Default::default()
        };

        let err = negotiate(&mut options, &registry).unwrap_err();
        assert!(matches!(err, Error::NoEncoders));
    }

    #[tokio::test]
    async fn test_quad_body_serialized() {
        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            ..Default::default()
        };

        negotiate(&mut options, &registry()).unwrap();

        let mut body = match std::mem::take(&mut options.body) {
            RequestBody::Bytes(stream) => stream,
            _ => panic!("expected byte stream body"),
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = body.next().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(bytes, b"<s> <p> \"o\" .\n");
    }

    #[test]
    fn test_prefixes_forwarded_to_encoder() {
        struct RecordingEncoder {
            seen: std::sync::Mutex<Option<PrefixMap>>,
        }

        impl QuadEncoder for RecordingEncoder {
            fn encode(&self, _input: QuadStream, options: EncodeOptions) -> ByteStream {
                *self.seen.lock().unwrap() = Some(options.prefixes);
                Box::pin(futures::stream::empty())
            }
        }

        let encoder = Arc::new(RecordingEncoder {
            seen: std::sync::Mutex::new(None),
        });

        let mut registry = FormatRegistry::new();
        registry.register_encoder("text/turtle", encoder.clone());
        registry.register_decoder("text/turtle", Arc::new(NoopDecoder));

        let mut prefixes = PrefixMap::new();
        prefixes.insert("ex".to_string(), "http://example.org/".to_string());

        let mut options = RequestOptions {
            body: RequestBody::Quads(vec![quad()]),
            prefixes: prefixes.clone(),
            ..Default::default()
        };

        negotiate(&mut options, &registry).unwrap();

        assert_eq!(encoder.seen.lock().unwrap().as_ref(), Some(&prefixes));
    }

    #[test]
    fn test_returns_options_for_chaining() {
        let registry = registry();
        let mut options = RequestOptions::default();
        let returned = negotiate(&mut options, &registry).unwrap();
        returned.method = Method::POST;
        assert_eq!(options.method, Method::POST);
    }
}
