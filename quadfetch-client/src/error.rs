//! Error types for quadfetch-client

use quadfetch_formats::FormatError;
use thiserror::Error;

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Negotiation and transport errors
#[derive(Error, Debug)]
pub enum Error {
    /// No format registry was supplied; negotiation cannot proceed
    #[error("no formats given: a format registry is required to negotiate content types")]
    NoFormatsProvided,

    /// Request declares a content type with no matching encoder
    #[error("no serializer found for media type: {0}")]
    UnsupportedMediaType(String),

    /// Request body needs encoding but the registry has no encoders at all
    #[error("format registry has no encoders; cannot serialize a quad body")]
    NoEncoders,

    /// Response carries no Content-Type header
    #[error(
        "response is missing the Content-Type header - without this the parser \
         cannot be determined (consider setting this header on the response \
         before processing it)"
    )]
    MissingContentType,

    /// No decoder registered for the response content type
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    /// Dataset accessor invoked without a dataset factory
    #[error("no dataset factory was supplied; cannot materialize a dataset")]
    MissingFactory,

    /// Accessor invoked on a response without a body
    #[error("response carries no body")]
    NoResponseBody,

    /// Accessor invoked after the response body stream was consumed
    #[error("response body stream was already consumed")]
    StreamAlreadyConsumed,

    /// A header value could not be constructed or read
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Underlying transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The secondary JSON-LD context fetch failed
    #[error("failed to fetch JSON-LD context document {url}: {message}")]
    ContextFetch { url: String, message: String },

    /// Codec error
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl Error {
    /// Create an unsupported media type error
    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Error::UnsupportedMediaType(media_type.into())
    }

    /// Create an unknown content type error
    pub fn unknown_content_type(media_type: impl Into<String>) -> Self {
        Error::UnknownContentType(media_type.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Error::InvalidHeader(message.into())
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(message.into())
    }

    /// Create a context fetch error
    pub fn context_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ContextFetch {
            url: url.into(),
            message: message.into(),
        }
    }
}
