//! geotag — location source for photo capture.
//!
//! Tracks location permission and the latest fix delivered by a platform
//! location service, and renders that fix as EXIF GPS metadata for an image
//! writer to embed.

pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod metadata;
pub mod replay;
pub mod server;

pub use error::GeotagError;
pub use location::{
    AuthorizationState, HeadingReading, LocationPlatform, LocationReading, LocationSource,
};
pub use metadata::{ClockZone, GpsMetadata, GpsTag, GpsValue};
