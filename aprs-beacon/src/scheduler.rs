//! Interval loop around [`Beacon::run_cycle`].
//!
//! Idle between cycles, one synchronous cycle on each tick. Shutdown is only
//! observed while idle, so a cycle that has started always completes.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use aprs_core::{Beacon, Sender};

/// Run beacon cycles every `interval` until `shutdown` turns true.
///
/// A dropped shutdown sender also ends the loop. Returns the number of
/// completed cycles.
pub async fn run(
    beacon: &Beacon,
    sender: &mut dyn Sender,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut cycles = 0u64;

    info!(
        callsign = beacon.callsign(),
        interval_secs = interval.as_secs(),
        "beacon loop started"
    );

    while !*shutdown.borrow() {
        let report = beacon.run_cycle(sender);
        cycles += 1;
        debug!(cycle = cycles, sent = report.sent, skipped = report.skipped, "beacon cycle done");

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.wait_for(|&stop| stop) => break,
        }
    }

    info!(cycles, "beacon loop stopped");
    cycles
}
