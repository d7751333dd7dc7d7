//! Intermediate values passed between the fetch, extract and normalize steps.

use std::borrow::Cow;

/// Open state as read from a page, before it becomes a
/// [`checkopen_core::StatusLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Open,
    ClosingSoon,
    Closed,
    Unknown,
}

/// Which extraction strategy produced a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    /// The `window._wn` data blob.
    Structured,
    /// Localized phrases in the rendered page text.
    Text,
}

/// A status finding from one extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: Option<String>,
    pub state: OpenState,
    pub message: Option<String>,
    /// `HH:MM` display string, never parsed as a time.
    pub open_until: Option<String>,
    pub source: SignalSource,
}

/// A successful (2xx) response for one fetch attempt.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
