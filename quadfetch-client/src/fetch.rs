//! Fetch entry points
//!
//! `fetch` runs the full pipeline for one exchange: request negotiation,
//! the transport call, and response wrapping. `FetchClient` binds a format
//! registry (and optionally a dataset factory and transport override) once
//! and reuses them across calls; there is no process-wide default
//! configuration.

use bytes::Bytes;
use futures::stream;
use http::{HeaderMap, Method};
use quadfetch_formats::FormatRegistry;
use quadfetch_graph::{DatasetFactory, PrefixMap};
use std::sync::Arc;
use url::Url;

use crate::error::{Error, Result};
use crate::request::{negotiate, RequestBody, RequestOptions};
use crate::response::FetchResponse;
use crate::transport::{Transport, TransportRequest};

/// Options recognized by `fetch`
///
/// `formats` is the only required capability; `fetch` fails with
/// `NoFormatsProvided` before any network call when it is absent.
#[derive(Default)]
pub struct FetchOptions {
    /// Request method
    pub method: Option<Method>,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Prefix mappings forwarded to the encoder
    pub prefixes: PrefixMap,
    /// Codec registry used for both directions
    pub formats: Option<Arc<FormatRegistry>>,
    /// Capability for materializing `dataset()` results
    pub factory: Option<Arc<dyn DatasetFactory>>,
    /// Transport override; the native transport is used when absent
    pub transport: Option<Arc<dyn Transport>>,
}

impl FetchOptions {
    /// Create options carrying just a format registry
    pub fn with_formats(formats: Arc<FormatRegistry>) -> Self {
        Self {
            formats: Some(formats),
            ..Default::default()
        }
    }
}

/// Perform one negotiated exchange
///
/// Builds the Accept header and serializes quad-shaped bodies via the
/// registry, sends the request through the transport, and wraps the
/// response with the lazy `quad_stream()` / `dataset()` accessors.
pub async fn fetch(url: Url, options: FetchOptions) -> Result<FetchResponse> {
    let FetchOptions {
        method,
        headers,
        body,
        prefixes,
        formats,
        factory,
        transport,
    } = options;

    let formats = formats.ok_or(Error::NoFormatsProvided)?;

    let mut request = RequestOptions {
        method: method.unwrap_or(Method::GET),
        headers,
        body,
        prefixes,
    };
    negotiate(&mut request, &formats)?;

    let transport = match transport {
        Some(transport) => transport,
        None => default_transport()?,
    };

    let body = match request.body {
        RequestBody::None => None,
        RequestBody::Text(text) => Some(text_body(text)),
        RequestBody::Bytes(stream) => Some(stream),
        RequestBody::Quads(_) | RequestBody::QuadStream(_) => {
            return Err(Error::transport(
                "request body was not serialized during negotiation",
            ));
        }
    };

    tracing::debug!(url = %url, method = %request.method, "dispatching negotiated request");

    let response = transport
        .fetch(
            url,
            TransportRequest {
                method: request.method,
                headers: request.headers,
                body,
            },
        )
        .await?;

    Ok(FetchResponse::new(response, transport, formats, factory))
}

/// A reusable fetch handle with bound capabilities
///
/// Per-call options win over the bound defaults. The configuration is
/// immutable after construction; cloning shares the underlying registry and
/// capabilities.
#[derive(Clone)]
pub struct FetchClient {
    formats: Arc<FormatRegistry>,
    factory: Option<Arc<dyn DatasetFactory>>,
    transport: Option<Arc<dyn Transport>>,
}

impl FetchClient {
    /// Create a client bound to a format registry
    pub fn new(formats: Arc<FormatRegistry>) -> Self {
        Self {
            formats,
            factory: None,
            transport: None,
        }
    }

    /// Bind a dataset factory, enabling `dataset()` on responses
    pub fn with_factory(mut self, factory: Arc<dyn DatasetFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Bind a transport override
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Perform one exchange, filling in the bound capabilities
    pub async fn fetch(&self, url: Url, mut options: FetchOptions) -> Result<FetchResponse> {
        if options.formats.is_none() {
            options.formats = Some(self.formats.clone());
        }
        if options.factory.is_none() {
            options.factory = self.factory.clone();
        }
        if options.transport.is_none() {
            options.transport = self.transport.clone();
        }
        fetch(url, options).await
    }

    /// GET a resource with the bound capabilities only
    pub async fn get(&self, url: Url) -> Result<FetchResponse> {
        self.fetch(url, FetchOptions::default()).await
    }
}

fn text_body(text: String) -> quadfetch_formats::ByteStream {
    Box::pin(stream::once(async move {
        Ok::<_, std::io::Error>(Bytes::from(text))
    }))
}

#[cfg(feature = "native")]
fn default_transport() -> Result<Arc<dyn Transport>> {
    Ok(Arc::new(crate::transport::NativeTransport::new()?))
}

#[cfg(not(feature = "native"))]
fn default_transport() -> Result<Arc<dyn Transport>> {
    Err(Error::transport(
        "no transport configured and the `native` feature is disabled",
    ))
}
