//! Player preferences
//!
//! Presentation and audio only; nothing here changes difficulty. Read once
//! at start-up and never written back.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Environment variable holding settings JSON for native runs
pub const SETTINGS_ENV: &str = "MILKY_WAY_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Display ===
    /// Integer pixel scale; 0 picks the largest that fits
    pub scale: u32,

    // === Accessibility ===
    /// No star sparkle, no blinking text
    pub reduced_motion: bool,

    /// Start in demo mode
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            scale: 0,
            reduced_motion: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Parse a URL query string such as `?mute=1&volume=0.5&scale=3`
    ///
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "mute" | "muted" => settings.muted = parse_flag(value),
                "volume" => {
                    if let Ok(v) = value.parse() {
                        settings.master_volume = v;
                    }
                }
                "sfx" => {
                    if let Ok(v) = value.parse() {
                        settings.sfx_volume = v;
                    }
                }
                "scale" => {
                    if let Ok(v) = value.parse() {
                        settings.scale = v;
                    }
                }
                "reduced_motion" | "calm" => settings.reduced_motion = parse_flag(value),
                "demo" | "autopilot" => settings.autopilot = parse_flag(value),
                _ => log::warn!("Ignoring unknown setting '{}'", key),
            }
        }

        settings.sanitized()
    }

    /// Settings from `MILKY_WAY_SETTINGS`, or defaults when unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(SETTINGS_ENV) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", SETTINGS_ENV);
                Ok(settings)
            }
            Err(_) => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parsing() {
        let s = Settings::from_query("?mute=1&volume=0.5&sfx=2&reduced_motion=true&scale=3&demo");
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.5);
        assert_eq!(s.sfx_volume, 1.0);
        assert!(s.reduced_motion);
        assert_eq!(s.scale, 3);
        assert!(s.autopilot);
    }

    #[test]
    fn test_query_ignores_garbage() {
        let s = Settings::from_query("volume=loud&foo=bar&&scale=-2");
        assert_eq!(s, Settings::default());
        assert_eq!(Settings::from_query(""), Settings::default());
    }

    #[test]
    fn test_json_fills_defaults() {
        let s = Settings::from_json(r#"{"muted": true, "master_volume": -1.0}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.0);
        assert_eq!(s.sfx_volume, 1.0);
        assert!(!s.autopilot);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_effective_volume() {
        let mut s = Settings::default();
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_json_round_trip_through_serde() {
        let s = Settings {
            scale: 2,
            reduced_motion: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }
}
