//! # quadfetch-client
//!
//! Content-negotiating HTTP client for RDF quad streams.
//!
//! This crate sits between a pluggable HTTP transport and a codec registry:
//! it builds Accept headers from the registered decoders, serializes
//! quad-shaped request bodies with the matching encoder, resolves the
//! response content type (including the JSON-LD context-link indirection
//! for bare JSON responses), and exposes the response body as a lazy quad
//! stream or a materialized dataset.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quadfetch_client::FetchClient;
//! use quadfetch_formats::FormatRegistry;
//! use quadfetch_graph::DefaultDatasetFactory;
//! use std::sync::Arc;
//!
//! let client = FetchClient::new(Arc::new(FormatRegistry::common()))
//!     .with_factory(Arc::new(DefaultDatasetFactory));
//!
//! let url = url::Url::parse("http://example.org/data")?;
//! let mut response = client.get(url).await?;
//! let dataset = response.dataset().await?;
//! ```
//!
//! ## Capabilities
//!
//! All collaborators are explicit parameters:
//! - formats: `quadfetch_formats::FormatRegistry` (required)
//! - factory: `quadfetch_graph::DatasetFactory` (optional, enables
//!   `dataset()`)
//! - transport: `Transport` (optional, defaults to the reqwest-backed
//!   `NativeTransport` behind the `native` feature)
//!
//! ## Body-stream consumption
//!
//! The raw response body can be decoded once. A second `quad_stream()` or
//! `dataset()` call after the body was consumed fails with
//! `StreamAlreadyConsumed`.

mod error;
mod fetch;
pub mod link;
pub mod request;
pub mod response;
pub mod stream;
pub mod transport;

pub use error::{Error, Result};
pub use fetch::{fetch, FetchClient, FetchOptions};
pub use request::{negotiate, RequestBody, RequestOptions};
pub use response::FetchResponse;
#[cfg(feature = "native")]
pub use transport::NativeTransport;
pub use transport::{Transport, TransportRequest, TransportResponse};
