//! Response negotiation and lazy quad accessors
//!
//! `FetchResponse` wraps the transport's response without touching the raw
//! body. Whether the response carries a body at all is decided once, up
//! front, from the headers; the actual content-type resolution, the optional
//! JSON-LD context fetch, and the decoder invocation all happen lazily on
//! the first `quad_stream()` call.
//!
//! # Body-stream ownership
//!
//! The raw body can be consumed once. The first `quad_stream()` call
//! (directly, or indirectly via `dataset()`) takes it; any further call
//! fails with `StreamAlreadyConsumed`.

use http::header::{CONTENT_TYPE, TRANSFER_ENCODING};
use http::{HeaderMap, StatusCode};
use futures::StreamExt;
use quadfetch_formats::{base_media_type, ByteStream, DecodeOptions, FormatRegistry, QuadStream};
use quadfetch_graph::{Dataset, DatasetFactory};
use std::sync::Arc;
use url::Url;

use crate::error::{Error, Result};
use crate::link::{jsonld_context_link_url, MEDIA_TYPE_JSON_LD};
use crate::stream::drain;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// A negotiated HTTP response exposing lazy quad accessors
pub struct FetchResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    has_body: bool,
    body: Option<ByteStream>,
    transport: Arc<dyn Transport>,
    formats: Arc<FormatRegistry>,
    factory: Option<Arc<dyn DatasetFactory>>,
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("url", &self.url)
            .field("has_body", &self.has_body)
            .field("body_available", &self.body.is_some())
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

impl FetchResponse {
    /// Wrap a transport response
    ///
    /// Decides body presence from the status and headers; never fails.
    pub(crate) fn new(
        response: TransportResponse,
        transport: Arc<dyn Transport>,
        formats: Arc<FormatRegistry>,
        factory: Option<Arc<dyn DatasetFactory>>,
    ) -> Self {
        let TransportResponse {
            status,
            headers,
            url,
            body,
        } = response;

        let has_body = body_present(status, &headers);

        Self {
            status,
            headers,
            url,
            has_body,
            body: has_body.then_some(body),
            transport,
            formats,
            factory,
        }
    }

    /// Response status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolved response URL (used as the decoder's base IRI)
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the response was judged to carry a body
    ///
    /// When false, `quad_stream()` and `dataset()` fail with
    /// `NoResponseBody`.
    pub fn has_body(&self) -> bool {
        self.has_body
    }

    /// Whether `dataset()` can succeed (a factory capability was supplied)
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Decode the response body into a lazy quad stream
    ///
    /// Resolves the decode media type from the `content-type` header
    /// (parameters stripped). A bare `application/json` response with a
    /// JSON-LD context link is decoded as `application/ld+json`; the linked
    /// context document is fetched and JSON-decoded before decoding starts,
    /// and handed to the decoder along with the response URL as base IRI.
    ///
    /// Consumes the raw body stream; see the module docs for the
    /// single-consumption rule.
    pub async fn quad_stream(&mut self) -> Result<QuadStream> {
        if !self.has_body {
            return Err(Error::NoResponseBody);
        }
        if self.body.is_none() {
            return Err(Error::StreamAlreadyConsumed);
        }

        let content_type = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::MissingContentType)?;

        let mut media_type = base_media_type(content_type).to_string();

        let context_url = jsonld_context_link_url(&self.headers, &self.url, &media_type);
        if context_url.is_some() {
            media_type = MEDIA_TYPE_JSON_LD.to_string();
        }

        let decoder = self
            .formats
            .decoders()
            .get(&media_type)
            .ok_or_else(|| Error::unknown_content_type(&media_type))?;

        let context = match &context_url {
            Some(url) => {
                tracing::debug!(context_url = %url, "fetching linked JSON-LD context");
                Some(self.fetch_jsonld_context(url).await?)
            }
            None => None,
        };

        let body = self.body.take().ok_or(Error::StreamAlreadyConsumed)?;

        tracing::debug!(media_type = %media_type, url = %self.url, "decoding response body");

        Ok(decoder.decode(
            body,
            DecodeOptions {
                base_iri: Some(self.url.to_string()),
                context,
            },
        ))
    }

    /// Decode the response body and materialize it into a fresh dataset
    ///
    /// Requires the dataset-factory capability; fails with `MissingFactory`
    /// otherwise. Goes through `quad_stream()`, so it follows the same
    /// single-consumption rule.
    pub async fn dataset(&mut self) -> Result<Dataset> {
        let factory = self.factory.clone().ok_or(Error::MissingFactory)?;

        let stream = self.quad_stream().await?;
        let mut dataset = factory.dataset();
        drain(&mut dataset, stream).await?;
        Ok(dataset)
    }

    /// Fetch and JSON-decode the linked @context document
    async fn fetch_jsonld_context(&self, url: &Url) -> Result<serde_json::Value> {
        let mut request = TransportRequest::get();
        request.headers.insert(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/ld+json, application/json"),
        );

        let response = self
            .transport
            .fetch(url.clone(), request)
            .await
            .map_err(|e| Error::context_fetch(url.as_str(), e.to_string()))?;

        let bytes = collect_bytes(response.body)
            .await
            .map_err(|e| Error::context_fetch(url.as_str(), e.to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::context_fetch(url.as_str(), e.to_string()))
    }
}

/// Body-presence heuristic
///
/// A 204 never carries a body. Otherwise a body is assumed present iff any
/// header name starts with `content-` (content-type, content-length, ...)
/// or the transfer encoding is chunked.
fn body_present(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::NO_CONTENT {
        return false;
    }

    let content_header = headers
        .keys()
        .any(|name| name.as_str().starts_with("content-"));

    let chunked = headers
        .get(TRANSFER_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().eq_ignore_ascii_case("chunked"))
        .unwrap_or(false);

    content_header || chunked
}

/// Collect a byte stream into memory (used for context documents only;
/// response bodies stay streaming)
async fn collect_bytes(mut stream: ByteStream) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = stream.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in entries {
            headers.append(
                http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_body_present_with_content_headers() {
        assert!(body_present(
            StatusCode::OK,
            &headers(&[("content-type", "text/turtle")])
        ));
        assert!(body_present(
            StatusCode::OK,
            &headers(&[("content-length", "12")])
        ));
    }

    #[test]
    fn test_body_present_with_chunked_encoding() {
        assert!(body_present(
            StatusCode::OK,
            &headers(&[("transfer-encoding", "chunked")])
        ));
        assert!(body_present(
            StatusCode::OK,
            &headers(&[("transfer-encoding", "Chunked")])
        ));
    }

    #[test]
    fn test_body_absent_without_indicators() {
        assert!(!body_present(StatusCode::OK, &HeaderMap::new()));
        assert!(!body_present(
            StatusCode::OK,
            &headers(&[("etag", "\"abc\""), ("transfer-encoding", "gzip")])
        ));
    }

    #[test]
    fn test_body_absent_for_204() {
        assert!(!body_present(
            StatusCode::NO_CONTENT,
            &headers(&[("content-type", "text/turtle")])
        ));
    }
}
