//! Status extraction from a fetched venue page.
//!
//! Two strategies run in priority order and the first one that yields a
//! [`Signal`] wins: the `window._wn` data blob, then localized phrases in the
//! rendered page text.

mod structured;
mod text;

pub use structured::{extract_structured, value_at_path};
pub use text::{extract_from_html, extract_from_text};

use crate::types::Signal;

/// Runs both strategies against `body`.
///
/// Returns `None` when the page carries no recognizable status at all; a
/// malformed blob is logged and treated like a missing one.
#[must_use]
pub fn extract_signal(body: &str) -> Option<Signal> {
    match extract_structured(body) {
        Ok(Some(signal)) => return Some(signal),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "could not decode status blob; falling back to page text");
        }
    }
    extract_from_html(body)
}
