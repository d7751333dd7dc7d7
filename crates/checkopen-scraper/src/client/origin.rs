//! Base URL validation and venue URL construction.

use reqwest::Url;

use crate::error::ScraperError;

/// Parses the configured base URL, rejecting anything a path cannot be
/// appended to.
pub(super) fn parse_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}

/// `{base}/restaurants/{venue_id}`, with the id encoded as one path segment.
pub(super) fn venue_url(base: &Url, venue_id: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("restaurants").push(venue_id);
    }
    url
}

/// Site root, sent as the `Referer` of every request.
pub(super) fn referer_for(base: &Url) -> String {
    format!("{}/", base.origin().ascii_serialization())
}

/// Hostname for error messages; the full URL if it has none.
pub(super) fn domain_of(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.to_string(), str::to_owned)
}
