//! Location subsystem for geotag.
//!
//! Receives authorization and location callbacks from the host platform,
//! keeps the most recent fix, and issues permission / start-updates commands
//! through the [`LocationPlatform`] seam.

pub mod platform;
pub mod source;
pub mod types;

pub use platform::{LocationPlatform, PlatformCommand, RecordingPlatform};
pub use source::{LocationSource, SourceOptions, SourceSnapshot};
pub use types::{AuthorizationState, DesiredAccuracy, HeadingReading, LocationReading};
