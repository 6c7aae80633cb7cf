//! APRS frame assembly and TNC2 text export.
//!
//! Every beacon goes out addressed to `APRS` via the single `TCPIP*` hop,
//! which marks it as originated on the internet side of the iGate.

use std::fmt;

/// Destination identifier for generic APRS traffic.
pub const DEST: &str = "APRS";

/// Digipeater path for frames injected by an internet-connected station.
pub const PATH: &[&str] = &["TCPIP*"];

/// Payload category, identified by the leading data type character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `=` position without timestamp, messaging capable
    Position,
    /// `>` status report
    Status,
    /// `_` positionless weather report
    Weather,
}

impl PayloadKind {
    /// APRS data type identifier.
    pub fn prefix(self) -> char {
        match self {
            PayloadKind::Position => '=',
            PayloadKind::Status => '>',
            PayloadKind::Weather => '_',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '=' => Some(PayloadKind::Position),
            '>' => Some(PayloadKind::Status),
            '_' => Some(PayloadKind::Weather),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PayloadKind::Position => "position",
            PayloadKind::Status => "status",
            PayloadKind::Weather => "weather",
        }
    }

    /// Prefix an encoded body with this kind's data type identifier.
    pub fn payload(self, body: &str) -> String {
        format!("{}{body}", self.prefix())
    }
}

/// A transmittable APRS frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub source: String,
    pub dest: String,
    pub path: Vec<String>,
    pub payload: String,
}

impl Frame {
    /// Kind of payload carried, if the first character is one we emit.
    pub fn payload_kind(&self) -> Option<PayloadKind> {
        self.payload.chars().next().and_then(PayloadKind::from_prefix)
    }

    /// TNC2 monitor format: `SOURCE>DEST,PATH:payload`.
    pub fn to_tnc2(&self) -> String {
        let mut header = format!("{}>{}", self.source, self.dest);
        for hop in &self.path {
            header.push(',');
            header.push_str(hop);
        }
        format!("{header}:{}", self.payload)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tnc2())
    }
}

/// Wrap a finished payload into a frame from `callsign`.
///
/// No validation: the encoders are responsible for valid payload text.
pub fn make_frame(callsign: &str, payload: String) -> Frame {
    Frame {
        source: callsign.to_string(),
        dest: DEST.to_string(),
        path: PATH.iter().map(|hop| hop.to_string()).collect(),
        payload,
    }
}
