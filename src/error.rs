//! Start-up errors
//!
//! The simulation itself cannot fail; only bringing up the platform can.

use std::fmt;

/// Errors raised while starting the game on a platform
#[derive(Debug)]
pub enum Error {
    /// No canvas/surface could be created for presentation
    Surface(String),
    /// No suitable GPU adapter was found
    Adapter(String),
    /// The GPU device request was rejected
    Device(String),
    /// Settings could not be parsed
    Settings(serde_json::Error),
    /// The headless run summary could not be written
    Summary(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "Surface creation failed: {}", e),
            Self::Adapter(e) => write!(f, "No GPU adapter: {}", e),
            Self::Device(e) => write!(f, "GPU device request failed: {}", e),
            Self::Settings(e) => write!(f, "Invalid settings: {}", e),
            Self::Summary(e) => write!(f, "Could not write run summary: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(e) | Self::Summary(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Settings(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_keeps_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(parse);
        assert!(err.to_string().starts_with("Invalid settings"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_summary_error_is_not_a_settings_error() {
        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = Error::Summary(parse);
        assert!(err.to_string().starts_with("Could not write run summary"));
        assert!(!err.to_string().contains("settings"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
