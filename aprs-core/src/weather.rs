//! Positionless weather report encoding.
//!
//! Field layout (each field fixed width, `.` filled when absent):
//!
//! ```text
//! MMDDhhmm c### s### g### t### r### p### P### h## b####
//! ```
//!
//! Readings arrive in metric units and are converted to the imperial units
//! APRS expects. The timestamp is mandatory; barometric pressure is the only
//! field dropped entirely when missing.

use std::fs;
use std::path::Path;

use chrono::DateTime;
use serde::Deserialize;

use crate::types::EncodeError;

/// Speed conversion factor used for wind speed and gust.
pub const SPEED_TO_MPH: f64 = 0.621371192;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Default software/unit tag appended after the weather fields.
pub const DEFAULT_WEATHER_TAG: &str = "RsMM";

/// A point-in-time weather reading as stored in the JSON source file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherReading {
    /// UNIX seconds. Required: a reading without it is not sent.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub wind: Wind,
    /// Degrees Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub rain: Rain,
    /// Relative humidity, percent.
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Barometric pressure, hPa.
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub direction: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Rainfall totals in millimetres.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Rain {
    #[serde(default)]
    pub rainlast1h: Option<f64>,
    #[serde(default)]
    pub rainlast24h: Option<f64>,
    #[serde(default)]
    pub rainmidnight: Option<f64>,
}

/// Load a reading from a JSON file. Read fresh on every beacon cycle.
pub fn read_reading(path: &Path) -> Result<WeatherReading, EncodeError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Encode a reading into the weather field string (without the `_` prefix).
pub fn encode_weather(reading: &WeatherReading) -> Result<String, EncodeError> {
    let secs = reading.timestamp.ok_or(EncodeError::MissingTimestamp)?.trunc() as i64;
    let ts = DateTime::from_timestamp(secs, 0).ok_or(EncodeError::InvalidTimestamp(secs))?;

    let mut out = ts.format("%m%d%H%M").to_string();

    push_field(&mut out, 'c', reading.wind.direction.map(|d| clamp(d.trunc(), 0, 359)));
    push_field(&mut out, 's', reading.wind.speed.map(to_mph));
    push_field(&mut out, 'g', reading.wind.gust.map(to_mph));
    push_field(&mut out, 't', reading.temperature.map(to_fahrenheit));
    push_field(&mut out, 'r', reading.rain.rainlast1h.map(to_hundredths_inch));
    push_field(&mut out, 'p', reading.rain.rainlast24h.map(to_hundredths_inch));
    push_field(&mut out, 'P', reading.rain.rainmidnight.map(to_hundredths_inch));

    match reading.humidity {
        Some(h) => out.push_str(&format!("h{:02}", humidity_code(h))),
        None => out.push_str("h.."),
    }

    if let Some(p) = reading.pressure {
        out.push_str(&format!("b{:04}", clamp((p * 10.0).round(), 0, 99999)));
    }

    Ok(out)
}

/// Append a 3-wide tagged field, or its `...` absence marker.
fn push_field(out: &mut String, tag: char, value: Option<i64>) {
    out.push(tag);
    match value {
        Some(v) => out.push_str(&format!("{v:03}")),
        None => out.push_str("..."),
    }
}

fn clamp(value: f64, min: i64, max: i64) -> i64 {
    (value as i64).clamp(min, max)
}

fn to_mph(speed: f64) -> i64 {
    clamp((speed * SPEED_TO_MPH).round(), 0, 999)
}

// -99 keeps the sign inside the 3-char field
fn to_fahrenheit(celsius: f64) -> i64 {
    clamp((celsius / (5.0 / 9.0) + 32.0).round(), -99, 999)
}

fn to_hundredths_inch(mm: f64) -> i64 {
    clamp((mm / MM_PER_INCH * 100.0).round(), 0, 999)
}

/// Two-digit humidity code. `00` means 100%, so a real 0% goes out as `01`.
pub fn humidity_code(percent: f64) -> i64 {
    match clamp(percent.round(), 0, 100) {
        0 => 1,
        100 => 0,
        h => h,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
