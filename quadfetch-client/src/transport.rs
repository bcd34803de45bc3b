//! Transport capability
//!
//! The client performs HTTP exchanges through the `Transport` trait so the
//! whole negotiation pipeline is testable without sockets and portable to
//! hosts with their own HTTP stack. A reqwest-backed implementation ships
//! behind the `native` feature and is used when no override is supplied.
//!
//! Connection pooling, redirects, TLS, retries, and timeouts are all the
//! transport's responsibility; the negotiators never retry.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use quadfetch_formats::ByteStream;
use url::Url;

use crate::error::Result;

/// One outgoing HTTP exchange, already negotiated
pub struct TransportRequest {
    /// Request method
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Wire-ready request body, if any
    pub body: Option<ByteStream>,
}

impl TransportRequest {
    /// Create a bare GET request
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl Default for TransportRequest {
    fn default() -> Self {
        Self::get()
    }
}

/// The transport's view of an HTTP response
pub struct TransportResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Resolved response URL (after redirects)
    pub url: Url,
    /// Raw response body
    pub body: ByteStream,
}

/// Capability performing one HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response with a streaming body
    async fn fetch(&self, url: Url, request: TransportRequest) -> Result<TransportResponse>;
}

#[cfg(feature = "native")]
pub use native::NativeTransport;

#[cfg(feature = "native")]
mod native {
    use super::*;
    use crate::error::Error;
    use futures::TryStreamExt;

    /// Default transport backed by a shared reqwest client
    pub struct NativeTransport {
        client: reqwest::Client,
    }

    impl NativeTransport {
        /// Create a transport with a default client
        pub fn new() -> Result<Self> {
            let client = reqwest::Client::builder()
                .build()
                .map_err(|e| Error::transport(format!("failed to create HTTP client: {e}")))?;
            Ok(Self { client })
        }

        /// Create a transport from an existing reqwest client
        ///
        /// Use this to control timeouts, redirect policy, or proxies.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl Transport for NativeTransport {
        async fn fetch(&self, url: Url, request: TransportRequest) -> Result<TransportResponse> {
            let mut builder = self
                .client
                .request(request.method, url)
                .headers(request.headers);

            if let Some(body) = request.body {
                builder = builder.body(reqwest::Body::wrap_stream(body));
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Error::transport(e.to_string()))?;

            let status = response.status();
            let headers = response.headers().clone();
            let url = response.url().clone();
            let body: ByteStream = Box::pin(
                response
                    .bytes_stream()
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e)),
            );

            Ok(TransportResponse {
                status,
                headers,
                url,
                body,
            })
        }
    }
}
