//! Strategy 2: localized status phrases in the rendered page text.
//!
//! Used when the page carries no usable state blob. Three phrase families are
//! tried in a fixed order and the first hit decides the status:
//!
//! 1. "open until HH:MM" (only counts when a time is present)
//! 2. "closing soon", optionally with a time
//! 3. "closed"
//!
//! The order matters: listing pages often contain a stray "closed" in
//! boilerplate, and a named closing time is the stronger evidence.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::types::{OpenState, Signal, SignalSource};

/// "open" / "เปิด", then an optional "until HH:MM" tail.
static OPEN_UNTIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:เปิดอยู่|เปิด|\bopen(?:\s+now)?)(?:\s*[·•,\-]?\s*(?:จนถึง|ถึง|ปิดเวลา|until|closes(?:\s+at)?)\s*(\d{1,2}:\d{2}))?",
    )
    .expect("valid open-until regex")
});

static CLOSING_SOON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:ใกล้ปิด|กำลังจะปิด|\bclosing\s+soon)(?:\s*[·•,\-]?\s*(?:เวลา|ตอน|at)?\s*(\d{1,2}:\d{2}))?",
    )
    .expect("valid closing-soon regex")
});

/// "ปิด..." must not be the tail of "เปิด..." (open), hence the leading guard.
static CLOSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\x{0E40}])(?:ปิดแล้ว|ปิดอยู่|ปิดทำการ)|\bclosed\b")
        .expect("valid closed regex")
});

/// Parses `body` as HTML and runs [`extract_from_text`] on its visible text,
/// using the first `<h1>` as the venue name.
#[must_use]
pub fn extract_from_html(body: &str) -> Option<Signal> {
    let document = Html::parse_document(body);
    let heading = first_heading(&document);
    let text = render_text(&document);
    extract_from_text(&text, heading)
}

/// Classifies already-rendered page text.
///
/// `heading` is carried through as the signal's name. Returns `None` when no
/// status phrase matches, whatever the heading.
#[must_use]
pub fn extract_from_text(rendered: &str, heading: Option<String>) -> Option<Signal> {
    let (state, open_until, message) = classify(rendered)?;
    Some(Signal {
        name: heading,
        state,
        message: Some(message),
        open_until,
        source: SignalSource::Text,
    })
}

fn classify(text: &str) -> Option<(OpenState, Option<String>, String)> {
    let open_until = OPEN_UNTIL_RE
        .captures_iter(text)
        .find_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned());
    if let Some(time) = open_until {
        let message = format!("open until {time}");
        return Some((OpenState::Open, Some(time), message));
    }

    if let Some(cap) = CLOSING_SOON_RE.captures(text) {
        return Some(match cap.get(1) {
            Some(m) => {
                let time = m.as_str().to_owned();
                let message = format!("closing soon, open until {time}");
                (OpenState::ClosingSoon, Some(time), message)
            }
            None => (OpenState::ClosingSoon, None, "closing soon".to_owned()),
        });
    }

    if CLOSED_RE.is_match(text) {
        return Some((OpenState::Closed, None, "closed".to_owned()));
    }

    None
}

fn first_heading(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;
    let text = heading.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Visible text of the document's `<body>`, one space between text nodes.
fn render_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript" | "template"));
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
