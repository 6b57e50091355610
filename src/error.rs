//! Errors from the host-facing parts of geotag (config, event streams,
//! server). The location source itself never fails.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GeotagError {
    Io(io::Error),
    /// Config file exists but could not be parsed.
    Config { path: PathBuf, message: String },
    /// A line of an event stream was not a valid event.
    InvalidEvent { line: usize, message: String },
    UnknownTimeZone(String),
    Bind { addr: String, source: io::Error },
}

impl fmt::Display for GeotagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Config { path, message } => {
                write!(f, "Invalid config file '{}': {}", path.display(), message)
            }
            Self::InvalidEvent { line, message } => {
                write!(f, "Invalid event on line {}: {}", line, message)
            }
            Self::UnknownTimeZone(tz) => write!(
                f,
                "Unknown timezone '{}'. Use IANA format (e.g. Europe/Oslo).",
                tz
            ),
            Self::Bind { addr, source } => write!(f, "Cannot bind to {}: {}", addr, source),
        }
    }
}

impl std::error::Error for GeotagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Bind { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for GeotagError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = GeotagError::InvalidEvent { line: 3, message: "missing field `state`".into() };
        assert_eq!(e.to_string(), "Invalid event on line 3: missing field `state`");

        let e = GeotagError::UnknownTimeZone("Europe/Atlantis".into());
        assert!(e.to_string().contains("Europe/Atlantis"));
    }

    #[test]
    fn test_io_source_chain() {
        use std::error::Error;
        let e: GeotagError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(e.source().is_some());
    }
}
