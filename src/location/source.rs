//! The location source — tracks authorization and the latest fix, renders
//! GPS metadata on demand.
//!
//! Authorization flow:
//!   not-determined → request permission
//!   authorized-when-in-use / authorized-always → start continuous updates
//!   restricted / denied / unknown → log only
//!
//! Updates are never stopped once started, even if permission is later
//! revoked; the platform stops delivering fixes on its own.

use super::platform::LocationPlatform;
use super::types::{AuthorizationState, DesiredAccuracy, HeadingReading, LocationReading};
use crate::metadata::{ClockZone, GpsMetadata};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Construction options for a [`LocationSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions {
    pub desired_accuracy: DesiredAccuracy,
    pub clock_zone: ClockZone,
}

/// Authorization and last fix as seen at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceSnapshot {
    pub authorization: Option<AuthorizationState>,
    pub last_reading: Option<LocationReading>,
}

#[derive(Debug, Default)]
struct SourceState {
    authorization: Option<AuthorizationState>,
    last_reading: Option<LocationReading>,
}

/// Location source bound to a platform.
pub struct LocationSource<P> {
    platform: P,
    clock_zone: ClockZone,
    state: Mutex<SourceState>,
}

impl<P: LocationPlatform> LocationSource<P> {
    pub fn new(platform: P, options: SourceOptions) -> Self {
        debug!(accuracy = %options.desired_accuracy, zone = %options.clock_zone, "location source created");
        platform.set_desired_accuracy(options.desired_accuracy);
        Self {
            platform,
            clock_zone: options.clock_zone,
            state: Mutex::new(SourceState::default()),
        }
    }

    /// Authorization callback. Stores the state, then issues at most one
    /// platform command.
    pub fn on_authorization_changed(&self, state: AuthorizationState) {
        self.lock().authorization = Some(state);

        // The lock is released here: a platform may answer synchronously.
        match state {
            AuthorizationState::NotDetermined => {
                info!("no location data - permission not determined, requesting");
                self.platform.request_authorization();
            }
            AuthorizationState::Restricted => warn!("no location data - permission restricted"),
            AuthorizationState::Denied => warn!("no location data - permission denied"),
            AuthorizationState::AuthorizedWhenInUse | AuthorizationState::AuthorizedAlways => {
                info!(%state, "starting location updates");
                self.platform.start_updating_location();
            }
            AuthorizationState::Unknown => warn!("no location data - unknown status"),
        }
    }

    /// Location callback. Only the newest reading in the batch is kept.
    pub fn on_location_updated(&self, readings: &[LocationReading]) {
        let Some(latest) = readings.last() else { return };
        debug!(
            batch = readings.len(),
            lat = latest.latitude,
            lon = latest.longitude,
            "stored location reading"
        );
        self.lock().last_reading = Some(*latest);
    }

    /// Render the stored fix as GPS metadata.
    ///
    /// Empty when not authorized or when no fix has arrived yet; callers that
    /// need to tell those apart should check [`authorization`](Self::authorization).
    pub fn build_gps_metadata(&self, heading: Option<HeadingReading>) -> GpsMetadata {
        let snapshot = self.snapshot();

        if !snapshot.authorization.is_some_and(AuthorizationState::is_authorized) {
            debug!(authorization = ?snapshot.authorization, "metadata skipped: not authorized");
            return GpsMetadata::new();
        }
        let Some(reading) = snapshot.last_reading else {
            debug!("metadata skipped: no location reading yet");
            return GpsMetadata::new();
        };

        let md = GpsMetadata::from_reading(&reading, heading, self.clock_zone);
        debug!(tags = md.len(), zone = %self.clock_zone, "built GPS metadata");
        md
    }

    pub fn authorization(&self) -> Option<AuthorizationState> {
        self.lock().authorization
    }

    pub fn last_reading(&self) -> Option<LocationReading> {
        self.lock().last_reading
    }

    /// Both stored fields, read under one lock.
    pub fn snapshot(&self) -> SourceSnapshot {
        let state = self.lock();
        SourceSnapshot {
            authorization: state.authorization,
            last_reading: state.last_reading,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn clock_zone(&self) -> ClockZone {
        self.clock_zone
    }

    fn lock(&self) -> MutexGuard<'_, SourceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
