//! One beacon cycle: position, status, weather.
//!
//! Each encode is isolated. A failed status or weather encode is logged and
//! skipped; it never prevents the remaining beacons of the cycle from going
//! out. Timing between cycles belongs to the caller.

use tracing::{debug, warn};

use crate::config::BeaconConfig;
use crate::frame::{make_frame, Frame, PayloadKind};
use crate::position::encode_position;
use crate::status::encode_status;
use crate::types::EncodeError;
use crate::weather::{encode_weather, read_reading};

/// Consumer of finished frames. Transmission failures stay on its side.
pub trait Sender {
    fn send(&mut self, frame: Frame);
}

impl Sender for Vec<Frame> {
    fn send(&mut self, frame: Frame) {
        self.push(frame);
    }
}

/// Outcome of a single cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub sent: u32,
    pub skipped: u32,
}

/// Beacon driver for one station. Owns its configuration for its lifetime.
#[derive(Debug, Clone)]
pub struct Beacon {
    callsign: String,
    config: BeaconConfig,
}

impl Beacon {
    pub fn new(callsign: &str, config: BeaconConfig) -> Self {
        Beacon {
            callsign: callsign.to_string(),
            config,
        }
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Names of the optional beacons this station has a source for.
    pub fn optional_sources(&self) -> Vec<&'static str> {
        let mut sources = Vec::new();
        if self.config.status.is_configured() {
            sources.push(PayloadKind::Status.name());
        }
        if self.config.weather.is_some() {
            sources.push(PayloadKind::Weather.name());
        }
        sources
    }

    /// `=` position frame with symbol and comment.
    pub fn position_frame(&self) -> Frame {
        let c = &self.config;
        let pos = encode_position(c.lat, c.lng, c.table, c.symbol, c.ambiguity);
        let body = format!("{pos}{}", c.comment);
        make_frame(&self.callsign, PayloadKind::Position.payload(&body))
    }

    /// `>` status frame, if a status source yields text.
    pub fn status_frame(&self) -> Result<Frame, EncodeError> {
        let text = encode_status(&self.config.status)?;
        Ok(make_frame(&self.callsign, PayloadKind::Status.payload(&text)))
    }

    /// `_` weather frame from a fresh read of the weather file.
    pub fn weather_frame(&self) -> Result<Frame, EncodeError> {
        let path = self.config.weather.as_deref().ok_or(EncodeError::NotConfigured)?;
        let reading = read_reading(path)?;
        let body = encode_weather(&reading)?;
        let payload = format!("{}{}", PayloadKind::Weather.payload(&body), self.config.weather_tag);
        Ok(make_frame(&self.callsign, payload))
    }

    /// Run position, status, then weather, sending each frame as soon as it
    /// is assembled.
    pub fn run_cycle(&self, sender: &mut dyn Sender) -> CycleReport {
        let mut report = CycleReport::default();

        let frame = self.position_frame();
        debug!(frame = %frame, "sending position beacon");
        sender.send(frame);
        report.sent += 1;

        dispatch(PayloadKind::Status, self.status_frame(), sender, &mut report);
        dispatch(PayloadKind::Weather, self.weather_frame(), sender, &mut report);

        report
    }
}

fn dispatch(
    kind: PayloadKind,
    result: Result<Frame, EncodeError>,
    sender: &mut dyn Sender,
    report: &mut CycleReport,
) {
    match result {
        Ok(frame) => {
            debug!(frame = %frame, "sending {} beacon", kind.name());
            sender.send(frame);
            report.sent += 1;
        }
        Err(EncodeError::NotConfigured) => {}
        Err(e) => {
            warn!(error = %e, "skipping {} beacon", kind.name());
            report.skipped += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusSource;
    use std::io::Write;
    use std::path::PathBuf;

    fn config() -> BeaconConfig {
        BeaconConfig {
            lat: 47.675,
            lng: -122.3,
            table: '/',
            symbol: '-',
            comment: "rust igate".into(),
            ..BeaconConfig::default()
        }
    }

    #[test]
    fn test_position_frame() {
        let beacon = Beacon::new("N0CALL-10", config());
        let frame = beacon.position_frame();
        assert_eq!(
            frame.to_tnc2(),
            "N0CALL-10>APRS,TCPIP*:=4740.50N/12218.00W-rust igate"
        );
    }

    #[test]
    fn test_position_frame_ambiguous() {
        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                ambiguity: 2,
                ..config()
            },
        );
        assert_eq!(beacon.position_frame().payload, "=4740.  N/12218.  W-rust igate");
    }

    #[test]
    fn test_cycle_position_only() {
        let beacon = Beacon::new("N0CALL", config());
        let mut sent: Vec<Frame> = Vec::new();
        let report = beacon.run_cycle(&mut sent);
        assert_eq!(report, CycleReport { sent: 1, skipped: 0 });
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].payload_kind(), Some(PayloadKind::Position));
    }

    #[test]
    fn test_cycle_order_position_status_weather() {
        let mut wx = tempfile::NamedTempFile::new().unwrap();
        write!(wx, r#"{{"timestamp": 1704164645, "temperature": 20, "humidity": 100}}"#).unwrap();

        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                status: StatusSource {
                    file: None,
                    text: Some("hello".into()),
                },
                weather: Some(wx.path().to_path_buf()),
                ..config()
            },
        );
        let mut sent: Vec<Frame> = Vec::new();
        let report = beacon.run_cycle(&mut sent);
        assert_eq!(report, CycleReport { sent: 3, skipped: 0 });

        let kinds: Vec<_> = sent.iter().map(|f| f.payload_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(PayloadKind::Position),
                Some(PayloadKind::Status),
                Some(PayloadKind::Weather)
            ]
        );
        assert_eq!(sent[1].payload, ">hello");
        assert_eq!(
            sent[2].payload,
            "_01020304c...s...g...t068r...p...P...h00RsMM"
        );
    }

    #[test]
    fn test_missing_weather_file_still_sends_position() {
        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                weather: Some(PathBuf::from("/nonexistent/wx.json")),
                ..config()
            },
        );
        let mut sent: Vec<Frame> = Vec::new();
        let report = beacon.run_cycle(&mut sent);
        assert_eq!(report, CycleReport { sent: 1, skipped: 1 });
        assert_eq!(sent[0].payload_kind(), Some(PayloadKind::Position));
        assert!(matches!(
            beacon.weather_frame(),
            Err(EncodeError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_weather_skipped_status_sent() {
        let mut wx = tempfile::NamedTempFile::new().unwrap();
        write!(wx, "garbage").unwrap();

        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                status: StatusSource {
                    file: None,
                    text: Some("up".into()),
                },
                weather: Some(wx.path().to_path_buf()),
                ..config()
            },
        );
        let mut sent: Vec<Frame> = Vec::new();
        let report = beacon.run_cycle(&mut sent);
        assert_eq!(report, CycleReport { sent: 2, skipped: 1 });
        assert_eq!(sent[1].payload, ">up");
    }

    #[test]
    fn test_weather_without_timestamp_skipped() {
        let mut wx = tempfile::NamedTempFile::new().unwrap();
        write!(wx, r#"{{"temperature": 20}}"#).unwrap();

        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                weather: Some(wx.path().to_path_buf()),
                ..config()
            },
        );
        let mut sent: Vec<Frame> = Vec::new();
        let report = beacon.run_cycle(&mut sent);
        assert_eq!(report, CycleReport { sent: 1, skipped: 1 });
        assert_eq!(sent[0].payload_kind(), Some(PayloadKind::Position));
        assert!(matches!(
            beacon.weather_frame(),
            Err(EncodeError::MissingTimestamp)
        ));
    }

    #[test]
    fn test_optional_sources() {
        let beacon = Beacon::new("N0CALL", config());
        assert!(beacon.optional_sources().is_empty());

        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                status: StatusSource {
                    file: None,
                    text: Some("up".into()),
                },
                weather: Some(PathBuf::from("/tmp/wx.json")),
                ..config()
            },
        );
        assert_eq!(beacon.optional_sources(), vec!["status", "weather"]);
    }

    #[test]
    fn test_weather_tag_configurable() {
        let mut wx = tempfile::NamedTempFile::new().unwrap();
        write!(wx, r#"{{"timestamp": 1704164645}}"#).unwrap();
        let beacon = Beacon::new(
            "N0CALL",
            BeaconConfig {
                weather: Some(wx.path().to_path_buf()),
                weather_tag: "xDvs".into(),
                ..config()
            },
        );
        let frame = beacon.weather_frame().unwrap();
        assert!(frame.payload.ends_with("h..xDvs"), "got {}", frame.payload);
    }
}
