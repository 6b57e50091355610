//! EXIF GPS metadata rendering.
//!
//! Reference letters carry the sign, values are always non-negative:
//! latitude N/S, longitude E/W, altitude 0 (above) / 1 (below sea level).

use crate::location::{HeadingReading, LocationReading};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// The fixed set of GPS keys, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsTag {
    DateStamp,
    TimeStamp,
    LatitudeRef,
    Latitude,
    LongitudeRef,
    Longitude,
    Dop,
    AltitudeRef,
    Altitude,
    ImgDirectionRef,
    ImgDirection,
}

impl GpsTag {
    pub fn key(self) -> &'static str {
        match self {
            Self::DateStamp => "GPSDateStamp",
            Self::TimeStamp => "GPSTimeStamp",
            Self::LatitudeRef => "GPSLatitudeRef",
            Self::Latitude => "GPSLatitude",
            Self::LongitudeRef => "GPSLongitudeRef",
            Self::Longitude => "GPSLongitude",
            Self::Dop => "GPSDOP",
            Self::AltitudeRef => "GPSAltitudeRef",
            Self::Altitude => "GPSAltitude",
            Self::ImgDirectionRef => "GPSImgDirectionRef",
            Self::ImgDirection => "GPSImgDirection",
        }
    }
}

impl fmt::Display for GpsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A metadata value: string, real or integer.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsValue {
    Text(String),
    Real(f64),
    Integer(i64),
}

impl GpsValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl Serialize for GpsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Real(v) => serializer.serialize_f64(*v),
            Self::Integer(v) => serializer.serialize_i64(*v),
        }
    }
}

/// Zone used to render the date and time stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    /// Host local zone, matching the platform clock.
    #[default]
    Local,
    Named(Tz),
}

impl ClockZone {
    /// `None` selects the host local zone.
    pub fn from_name(name: Option<&str>) -> Option<Self> {
        match name {
            None => Some(Self::Local),
            Some(n) => n.parse::<Tz>().ok().map(Self::Named),
        }
    }

    /// `(YYYY:MM:DD, HH:MM:SS)` for the instant in this zone.
    pub fn stamps(self, instant: DateTime<Utc>) -> (String, String) {
        match self {
            Self::Local => format_stamps(&Local, instant),
            Self::Named(tz) => format_stamps(&tz, instant),
        }
    }
}

impl fmt::Display for ClockZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn format_stamps<Z: TimeZone>(zone: &Z, instant: DateTime<Utc>) -> (String, String)
where
    Z::Offset: fmt::Display,
{
    let local = instant.with_timezone(zone);
    (
        local.format("%Y:%m:%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}

/// Ordered GPS tag mapping, ready to hand to an image writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsMetadata {
    entries: Vec<(GpsTag, GpsValue)>,
}

impl GpsMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a reading, plus the heading if one is available.
    pub fn from_reading(
        reading: &LocationReading,
        heading: Option<HeadingReading>,
        zone: ClockZone,
    ) -> Self {
        let (latitude_ref, latitude) = signed_ref(reading.latitude, "N", "S");
        let (longitude_ref, longitude) = signed_ref(reading.longitude, "E", "W");
        let altitude_ref = if reading.altitude < 0.0 { 1 } else { 0 };
        let altitude = reading.altitude.abs();
        let (date, time) = zone.stamps(reading.timestamp);

        let mut md = Self::new();
        md.insert(GpsTag::DateStamp, GpsValue::Text(date));
        md.insert(GpsTag::TimeStamp, GpsValue::Text(time));
        md.insert(GpsTag::LatitudeRef, GpsValue::Text(latitude_ref.into()));
        md.insert(GpsTag::Latitude, GpsValue::Real(latitude));
        md.insert(GpsTag::LongitudeRef, GpsValue::Text(longitude_ref.into()));
        md.insert(GpsTag::Longitude, GpsValue::Real(longitude));
        md.insert(GpsTag::Dop, GpsValue::Real(reading.horizontal_accuracy));
        md.insert(GpsTag::AltitudeRef, GpsValue::Integer(altitude_ref));
        md.insert(GpsTag::Altitude, GpsValue::Real(altitude));

        if let Some(h) = heading {
            md.insert(GpsTag::ImgDirectionRef, GpsValue::Text("T".into()));
            md.insert(GpsTag::ImgDirection, GpsValue::Real(h.true_heading));
        }
        md
    }

    /// Set a tag, replacing any existing value in place.
    pub fn insert(&mut self, tag: GpsTag, value: GpsValue) {
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((tag, value)),
        }
    }

    pub fn get(&self, tag: GpsTag) -> Option<&GpsValue> {
        self.entries.iter().find(|(t, _)| *t == tag).map(|(_, v)| v)
    }

    pub fn contains(&self, tag: GpsTag) -> bool {
        self.get(tag).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn tags(&self) -> impl Iterator<Item = GpsTag> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GpsTag, &GpsValue)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }
}

impl Serialize for GpsMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(tag.key(), value)?;
        }
        map.end()
    }
}

fn signed_ref(value: f64, positive: &'static str, negative: &'static str) -> (&'static str, f64) {
    let reference = if value < 0.0 { negative } else { positive };
    (reference, value.abs())
}
