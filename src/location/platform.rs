//! The seam between the location source and the host's location service.
//!
//! The source only ever issues fire-and-forget commands; whatever the
//! platform does in response comes back through
//! [`LocationSource::on_authorization_changed`](super::LocationSource::on_authorization_changed)
//! and [`LocationSource::on_location_updated`](super::LocationSource::on_location_updated).

use super::types::DesiredAccuracy;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Commands a location source can issue to its platform.
pub trait LocationPlatform {
    /// Set the accuracy subsequent fixes should be delivered at.
    fn set_desired_accuracy(&self, accuracy: DesiredAccuracy);

    /// Ask the user for when-in-use permission.
    fn request_authorization(&self);

    /// Begin continuous location updates.
    fn start_updating_location(&self);
}

/// A command as seen by [`RecordingPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum PlatformCommand {
    SetDesiredAccuracy { accuracy: DesiredAccuracy },
    RequestAuthorization,
    StartUpdatingLocation,
}

/// Platform that records every command in issue order.
///
/// Used by the replay driver and the HTTP host, where the real location
/// service lives on the other side of the event stream.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    commands: Mutex<Vec<PlatformCommand>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued so far, oldest first.
    pub fn commands(&self) -> Vec<PlatformCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, command: PlatformCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }
}

impl LocationPlatform for RecordingPlatform {
    fn set_desired_accuracy(&self, accuracy: DesiredAccuracy) {
        self.record(PlatformCommand::SetDesiredAccuracy { accuracy });
    }

    fn request_authorization(&self) {
        self.record(PlatformCommand::RequestAuthorization);
    }

    fn start_updating_location(&self) {
        self.record(PlatformCommand::StartUpdatingLocation);
    }
}

impl<P: LocationPlatform + ?Sized> LocationPlatform for std::sync::Arc<P> {
    fn set_desired_accuracy(&self, accuracy: DesiredAccuracy) {
        (**self).set_desired_accuracy(accuracy)
    }

    fn request_authorization(&self) {
        (**self).request_authorization()
    }

    fn start_updating_location(&self) {
        (**self).start_updating_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let platform = RecordingPlatform::new();
        platform.set_desired_accuracy(DesiredAccuracy::Kilometer);
        platform.request_authorization();
        platform.start_updating_location();

        assert_eq!(
            platform.commands(),
            vec![
                PlatformCommand::SetDesiredAccuracy { accuracy: DesiredAccuracy::Kilometer },
                PlatformCommand::RequestAuthorization,
                PlatformCommand::StartUpdatingLocation,
            ]
        );
    }

    #[test]
    fn test_command_json_shape() {
        let json = serde_json::to_value(PlatformCommand::SetDesiredAccuracy {
            accuracy: DesiredAccuracy::Best,
        })
        .unwrap();
        assert_eq!(json["command"], "set-desired-accuracy");
        assert_eq!(json["accuracy"], "best");
    }
}
