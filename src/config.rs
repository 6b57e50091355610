//! File-based configuration at ~/.geotag/config.json.
//!
//! Every field is optional; a missing file means all defaults.
//! Command-line flags override whatever the file says.

use crate::error::GeotagError;
use crate::location::{DesiredAccuracy, SourceOptions};
use crate::metadata::ClockZone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone for the date/time stamps. Absent means host local time.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub desired_accuracy: DesiredAccuracy,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            desired_accuracy: DesiredAccuracy::default(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from the default location (~/.geotag/config.json).
    pub fn load() -> Result<Self, GeotagError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, GeotagError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|e| GeotagError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geotag")
            .join("config.json")
    }

    pub fn clock_zone(&self) -> Result<ClockZone, GeotagError> {
        ClockZone::from_name(self.timezone.as_deref())
            .ok_or_else(|| GeotagError::UnknownTimeZone(self.timezone.clone().unwrap_or_default()))
    }

    pub fn source_options(&self) -> Result<SourceOptions, GeotagError> {
        Ok(SourceOptions {
            desired_accuracy: self.desired_accuracy,
            clock_zone: self.clock_zone()?,
        })
    }
}
