//! Canonical open/closed status handed to every caller of the lookup pipeline.
//!
//! [`VenueStatus`] is assembled once per lookup and never mutated afterwards.
//! Its `is_open` flag is derived from the [`StatusLabel`] at construction, so
//! the two can never disagree.

use serde::Serialize;

/// Message used whenever a lookup produced no status text of its own.
pub const NO_STATUS_MESSAGE: &str = "no status information found";

/// One of the four states a venue can be reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Open,
    ClosingSoon,
    Closed,
    Unknown,
}

impl StatusLabel {
    /// `true` for labels that mean the venue is currently serving.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::ClosingSoon)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::ClosingSoon => "closing_soon",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status record for one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueStatus {
    venue_id: String,
    name: String,
    is_open: bool,
    status: StatusLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    open_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl VenueStatus {
    #[must_use]
    pub fn new(
        venue_id: impl Into<String>,
        name: impl Into<String>,
        status: StatusLabel,
        open_until: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            venue_id: venue_id.into(),
            name: name.into(),
            is_open: status.is_open(),
            status,
            open_until,
            message,
        }
    }

    #[must_use]
    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    /// Display name of the venue; empty when the page never named it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn status(&self) -> StatusLabel {
        self.status
    }

    /// Opaque display string such as `"21:00"`.
    #[must_use]
    pub fn open_until(&self) -> Option<&str> {
        self.open_until.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
