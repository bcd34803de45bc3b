//! JSON-LD context link extraction
//!
//! A server answering with bare `application/json` may point to the JSON-LD
//! @context document needed to interpret the payload via a `Link` response
//! header with the `http://www.w3.org/ns/json-ld#context` relation. This
//! module extracts and resolves that URL.

use http::header::LINK;
use http::HeaderMap;
use quadfetch_graph::vocab::jsonld::CONTEXT_REL;
use url::Url;

/// Media type for bare JSON
pub const MEDIA_TYPE_JSON: &str = "application/json";

/// Media type for JSON-LD
pub const MEDIA_TYPE_JSON_LD: &str = "application/ld+json";

/// Extract the JSON-LD context URL from a response's `Link` header
///
/// Returns None unless `media_type` is exactly `application/json`: the
/// context indirection is defined only for bare JSON, never when the server
/// already declared `application/ld+json`.
///
/// The first comma-separated link segment carrying the context relation
/// wins; unrelated relations and malformed segments (no `<...>` target) are
/// ignored. The extracted target is resolved against `base`, so both
/// absolute and relative links work.
pub fn jsonld_context_link_url(headers: &HeaderMap, base: &Url, media_type: &str) -> Option<Url> {
    if media_type != MEDIA_TYPE_JSON {
        return None;
    }

    let relation = format!("rel=\"{}\"", CONTEXT_REL);

    let context_link = headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .find(|link| link.contains(&relation))?;

    let start = context_link.find('<')?;
    let end = context_link.rfind('>')?;
    let target = context_link.get(start + 1..end)?;
    if target.is_empty() {
        return None;
    }

    base.join(target).ok()
}
