//! aprs-core: Pure encoding library for APRS beacons.
//!
//! No async, no network — just the text encoders, frame assembly, and the
//! single-cycle beacon driver. The `aprs-beacon` binary owns scheduling,
//! logging setup, and the actual frame sender.

pub mod beacon;
pub mod config;
pub mod frame;
pub mod position;
pub mod status;
pub mod types;
pub mod weather;

// Re-export commonly used types at crate root
pub use beacon::{Beacon, CycleReport, Sender};
pub use config::{BeaconConfig, Config};
pub use frame::{make_frame, Frame, PayloadKind};
pub use types::*;
