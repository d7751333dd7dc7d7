//! Strategy 1: the `window._wn = {...};` state blob.
//!
//! The page bootstraps its client state through a single script assignment.
//! The status lives at `store.business.value.workingHoursStatus`; any level of
//! that path may be missing, which counts as "not found", never as an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;
use crate::types::{OpenState, Signal, SignalSource};

/// First `window._wn` assignment, shortest object up to the closing `};`.
static WN_ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\._wn\s*=\s*(\{.*?\});").expect("valid window._wn regex")
});

const BUSINESS_PATH: [&str; 3] = ["store", "business", "value"];

/// Extracts a [`Signal`] from the embedded state blob.
///
/// Returns `Ok(None)` when the page has no blob or the blob lacks the
/// business status object.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedBlob`] if the assignment is present but
/// its object literal is not valid JSON.
pub fn extract_structured(body: &str) -> Result<Option<Signal>, ExtractError> {
    let Some(blob) = WN_ASSIGNMENT_RE.captures(body).and_then(|cap| cap.get(1)) else {
        return Ok(None);
    };

    let root: Value = serde_json::from_str(blob.as_str())?;

    let Some(business) = value_at_path(&root, &BUSINESS_PATH) else {
        tracing::debug!("status blob has no store.business.value");
        return Ok(None);
    };
    let Some(hours) = business.get("workingHoursStatus").filter(|v| v.is_object()) else {
        tracing::debug!("status blob has no workingHoursStatus");
        return Ok(None);
    };

    let name = business
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let open = hours.get("open").and_then(Value::as_bool).unwrap_or(false);
    let closing_soon = hours
        .get("closingSoon")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let message = hours
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned);

    let state = if closing_soon {
        OpenState::ClosingSoon
    } else if open {
        OpenState::Open
    } else {
        OpenState::Closed
    };

    // The blob has no dedicated closing-time field; its message is what the
    // page shows next to the status, so it doubles as the open-until value.
    Ok(Some(Signal {
        name,
        state,
        open_until: message.clone(),
        message,
        source: SignalSource::Structured,
    }))
}

/// Follows `path` through nested objects, returning `None` at the first
/// missing key or non-object level.
#[must_use]
pub fn value_at_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, key| node.as_object()?.get(*key))
}
