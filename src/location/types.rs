//! Core types for the location subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Permission state as delivered by the platform's authorization callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationState {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedWhenInUse,
    AuthorizedAlways,
    /// Any value the platform reports that we don't recognize.
    Unknown,
}

impl AuthorizationState {
    /// True for the two variants that allow location updates.
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedWhenInUse | Self::AuthorizedAlways)
    }

    /// Parse a platform state name. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "not-determined" | "notdetermined" => Self::NotDetermined,
            "restricted" => Self::Restricted,
            "denied" => Self::Denied,
            "authorized-when-in-use" | "authorizedwheninuse" | "when-in-use" => {
                Self::AuthorizedWhenInUse
            }
            "authorized-always" | "authorizedalways" | "always" => Self::AuthorizedAlways,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for AuthorizationState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not-determined"),
            Self::Restricted => write!(f, "restricted"),
            Self::Denied => write!(f, "denied"),
            Self::AuthorizedWhenInUse => write!(f, "authorized-when-in-use"),
            Self::AuthorizedAlways => write!(f, "authorized-always"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single fix from the location service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level; negative below.
    #[serde(default)]
    pub altitude: f64,
    /// Radius of uncertainty in meters, passed through as reported.
    #[serde(default)]
    pub horizontal_accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

/// Compass reading supplied by the caller when metadata is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingReading {
    /// Degrees relative to true north.
    pub true_heading: f64,
}

/// Accuracy the platform is asked to deliver fixes at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DesiredAccuracy {
    #[default]
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
    ThreeKilometers,
}

impl fmt::Display for DesiredAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best => write!(f, "best"),
            Self::NearestTenMeters => write!(f, "nearest-ten-meters"),
            Self::HundredMeters => write!(f, "hundred-meters"),
            Self::Kilometer => write!(f, "kilometer"),
            Self::ThreeKilometers => write!(f, "three-kilometers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorized_variants() {
        assert!(AuthorizationState::AuthorizedWhenInUse.is_authorized());
        assert!(AuthorizationState::AuthorizedAlways.is_authorized());
        for state in [
            AuthorizationState::NotDetermined,
            AuthorizationState::Restricted,
            AuthorizationState::Denied,
            AuthorizationState::Unknown,
        ] {
            assert!(!state.is_authorized(), "{} should not be authorized", state);
        }
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(AuthorizationState::from_name("authorized_always"), AuthorizationState::AuthorizedAlways);
        assert_eq!(AuthorizationState::from_name("AuthorizedWhenInUse"), AuthorizationState::AuthorizedWhenInUse);
        assert_eq!(AuthorizationState::from_name(" Denied "), AuthorizationState::Denied);
    }

    #[test]
    fn test_unrecognized_state_is_unknown() {
        let state: AuthorizationState = serde_json::from_str("\"provisional\"").unwrap();
        assert_eq!(state, AuthorizationState::Unknown);
    }

    #[test]
    fn test_state_serializes_kebab_case() {
        let json = serde_json::to_string(&AuthorizationState::AuthorizedWhenInUse).unwrap();
        assert_eq!(json, "\"authorized-when-in-use\"");
        let back: AuthorizationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AuthorizationState::AuthorizedWhenInUse);
    }

    #[test]
    fn test_accuracy_display_matches_serde() {
        for accuracy in [
            DesiredAccuracy::Best,
            DesiredAccuracy::NearestTenMeters,
            DesiredAccuracy::HundredMeters,
            DesiredAccuracy::Kilometer,
            DesiredAccuracy::ThreeKilometers,
        ] {
            let json = serde_json::to_string(&accuracy).unwrap();
            assert_eq!(json, format!("\"{}\"", accuracy));
        }
    }

    #[test]
    fn test_reading_defaults_missing_fields() {
        let reading: LocationReading = serde_json::from_str(
            r#"{"latitude": 59.3293, "longitude": 18.0686, "timestamp": "2026-03-20T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(reading.altitude, 0.0);
        assert_eq!(reading.horizontal_accuracy, 0.0);
    }
}
