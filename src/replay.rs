//! Event stream replay — drives a [`LocationSource`] from recorded platform
//! callbacks, one JSON object per line.
//!
//! ```text
//! {"event": "authorization", "state": "authorized-when-in-use"}
//! {"event": "locations", "readings": [{"latitude": 59.33, "longitude": 18.07, "timestamp": "2026-03-20T12:00:00Z"}]}
//! {"event": "heading", "true_heading": 87.5}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::error::GeotagError;
use crate::location::{
    AuthorizationState, HeadingReading, LocationPlatform, LocationReading, LocationSource,
};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::debug;

/// One recorded platform callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PlatformEvent {
    Authorization { state: AuthorizationState },
    Locations { readings: Vec<LocationReading> },
    Heading { true_heading: f64 },
}

/// What a replay left behind besides the source's own state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReplaySummary {
    pub events: usize,
    /// Latest heading seen in the stream.
    pub heading: Option<HeadingReading>,
}

/// Apply a single event to the source.
pub fn apply<P: LocationPlatform>(
    source: &LocationSource<P>,
    event: &PlatformEvent,
    summary: &mut ReplaySummary,
) {
    match event {
        PlatformEvent::Authorization { state } => source.on_authorization_changed(*state),
        PlatformEvent::Locations { readings } => source.on_location_updated(readings),
        PlatformEvent::Heading { true_heading } => {
            summary.heading = Some(HeadingReading { true_heading: *true_heading });
        }
    }
    summary.events += 1;
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<PlatformEvent>, GeotagError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| GeotagError::InvalidEvent { line: line_no, message: e.to_string() })
}

/// Replay every event from `reader`, stopping at the first bad line.
pub fn replay<P: LocationPlatform, R: BufRead>(
    source: &LocationSource<P>,
    reader: R,
) -> Result<ReplaySummary, GeotagError> {
    let mut summary = ReplaySummary::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(event) = parse_line(&line, idx + 1)? {
            debug!(line = idx + 1, ?event, "replaying event");
            apply(source, &event, &mut summary);
        }
    }
    Ok(summary)
}
