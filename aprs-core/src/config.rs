//! Configuration file handling for aprs-beacon.
//!
//! The config is a JSON document with the station callsign and an optional
//! `beacon` section. Unknown keys are ignored, so a file shared with the
//! iGate's transport settings loads as-is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::position::MAX_AMBIGUITY;
use crate::status::StatusSource;
use crate::types::{AprsError, Result};
use crate::weather::DEFAULT_WEATHER_TAG;

/// Full configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub callsign: String,
    #[serde(default)]
    pub beacon: Option<BeaconConfig>,
}

/// Everything the beacon needs for its lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeaconConfig {
    pub lat: f64,
    pub lng: f64,
    /// Symbol table identifier, `/` or `\` or an overlay character.
    pub table: char,
    pub symbol: char,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub ambiguity: u8,
    /// Seconds between beacon cycles.
    #[serde(default = "default_send_every")]
    pub send_every: u64,
    #[serde(default)]
    pub status: StatusSource,
    /// JSON weather reading, re-read every cycle.
    #[serde(default)]
    pub weather: Option<PathBuf>,
    #[serde(default = "default_weather_tag")]
    pub weather_tag: String,
}

fn default_send_every() -> u64 {
    600
}

fn default_weather_tag() -> String {
    DEFAULT_WEATHER_TAG.to_string()
}

impl Default for BeaconConfig {
    fn default() -> Self {
        BeaconConfig {
            lat: 0.0,
            lng: 0.0,
            table: '/',
            symbol: '&',
            comment: String::new(),
            ambiguity: 0,
            send_every: default_send_every(),
            status: StatusSource::default(),
            weather: None,
            weather_tag: default_weather_tag(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Config::from_json(&text)
    }

    /// Parse and validate config text.
    pub fn from_json(text: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the encoders cannot represent.
    pub fn validate(&self) -> Result<()> {
        let callsign = self.callsign.trim();
        if callsign.is_empty() || callsign.len() > 9 || callsign.contains(&['>', ',', ':'][..]) {
            return Err(AprsError::Config(format!(
                "invalid callsign {:?}",
                self.callsign
            )));
        }
        if let Some(beacon) = &self.beacon {
            beacon.validate()?;
        }
        Ok(())
    }
}

impl BeaconConfig {
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(AprsError::Config(format!("lat {} outside [-90, 90]", self.lat)));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(AprsError::Config(format!("lng {} outside [-180, 180]", self.lng)));
        }
        if self.ambiguity > MAX_AMBIGUITY {
            return Err(AprsError::Config(format!(
                "ambiguity {} outside 0-{MAX_AMBIGUITY}",
                self.ambiguity
            )));
        }
        if self.send_every == 0 {
            return Err(AprsError::Config("send_every must be at least 1 second".into()));
        }
        if !self.table.is_ascii_graphic() || !self.symbol.is_ascii_graphic() {
            return Err(AprsError::Config(format!(
                "symbol {:?}{:?} must be printable ASCII",
                self.table, self.symbol
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
