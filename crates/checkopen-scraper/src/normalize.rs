//! Conversion from an extraction [`Signal`] to the canonical
//! [`checkopen_core::VenueStatus`].

use checkopen_core::{StatusLabel, VenueStatus, NO_STATUS_MESSAGE};

use crate::types::{OpenState, Signal};

/// Builds the final status record for `venue_id`.
///
/// `None` means no strategy found anything on the page and yields the
/// `unknown` status. A missing name becomes the empty string and a missing
/// message becomes [`NO_STATUS_MESSAGE`]. The function is pure: the same
/// input always produces an identical record.
#[must_use]
pub fn normalize_status(venue_id: &str, signal: Option<Signal>) -> VenueStatus {
    let Some(signal) = signal else {
        return VenueStatus::new(
            venue_id,
            "",
            StatusLabel::Unknown,
            None,
            Some(NO_STATUS_MESSAGE.to_owned()),
        );
    };

    let message = signal
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| NO_STATUS_MESSAGE.to_owned());

    VenueStatus::new(
        venue_id,
        signal.name.unwrap_or_default(),
        label_for(signal.state),
        signal.open_until,
        Some(message),
    )
}

fn label_for(state: OpenState) -> StatusLabel {
    match state {
        OpenState::Open => StatusLabel::Open,
        OpenState::ClosingSoon => StatusLabel::ClosingSoon,
        OpenState::Closed => StatusLabel::Closed,
        OpenState::Unknown => StatusLabel::Unknown,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
