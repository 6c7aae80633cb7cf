//! aprs-beacon: Periodic position, status, and weather beacons for an iGate.
//!
//! Frames are written to stdout in TNC2 format; logs go to stderr.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use aprs_core::{Beacon, Config};

mod logging;
mod scheduler;
mod sender;

use sender::Tnc2Writer;

#[derive(Parser)]
#[command(
    name = "aprs-beacon",
    version,
    about = "APRS position, status, and weather beaconing"
)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, env = "APRS_BEACON_CONFIG", default_value = "aprs-beacon.json")]
    config: PathBuf,

    /// Log every frame sent
    #[arg(short, long)]
    verbose: bool,

    /// Run a single beacon cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Error loading {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };

    let Some(beacon_config) = config.beacon.clone() else {
        warn!("No beacon section in {}, nothing to do", cli.config.display());
        return;
    };

    let interval = Duration::from_secs(beacon_config.send_every);
    let beacon = Beacon::new(&config.callsign, beacon_config);
    let mut out = Tnc2Writer::new(io::stdout());

    if cli.once {
        let report = beacon.run_cycle(&mut out);
        info!(sent = report.sent, skipped = report.skipped, "single cycle done");
        return;
    }

    info!(
        sources = ?beacon.optional_sources(),
        "Starting aprs-beacon as {}",
        config.callsign
    );

    let (tx, rx) = watch::channel(false);
    tokio::spawn(shutdown_signal(tx));

    scheduler::run(&beacon, &mut out, interval, rx).await;
    info!("{} frames written", out.written());
}

/// Flip the shutdown channel on SIGINT or SIGTERM.
async fn shutdown_signal(tx: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Stopping aprs-beacon");
    let _ = tx.send(true);
}
