//! trackfleet — GPS fleet emulator.
//!
//! Loads a track, builds a fleet of simulated trackers, and streams their
//! telemetry as UDP datagrams through the network emulator until Ctrl-C.
//! On shutdown, queued packets are flushed for up to `--drain-timeout-ms`
//! and the final counters are logged.

mod cli;
mod logging;


use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};

use tf_core::{Clock, SystemClock};
use tf_device::FleetConfig;
use tf_network::{NetworkConfig, Transport, UdpTransport};
use tf_output::{CsvWriter, SimOutputObserver};
use tf_path::load_path_json;
use tf_sim::{Sim, SimBuilder, SimConfig, StatsLogger};

use cli::Cli;
use logging::init_logging;

/// Everything that shapes a run, as printed by `--print-config`.
#[derive(Serialize)]
struct EffectiveConfig<'a> {
    sim:         &'a SimConfig,
    fleet:       &'a FleetConfig,
    network:     &'a NetworkConfig,
    destination: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let sim_config = cli.sim_config(seed);
    let fleet = cli.fleet_config();
    let network = cli.network_config();

    if cli.print_config {
        let effective = EffectiveConfig {
            sim:         &sim_config,
            fleet:       &fleet,
            network:     &network,
            destination: format!("{}:{}", cli.host, cli.port),
        };
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let path = load_path_json(&cli.file)
        .with_context(|| format!("loading track {}", cli.file.display()))?;
    let udp = UdpTransport::connect((cli.host.as_str(), cli.port))
        .with_context(|| format!("opening UDP socket to {}:{}", cli.host, cli.port))?;

    info!(
        devices = fleet.device_count,
        hz = sim_config.tick_hz,
        dest = %udp.destination(),
        local = ?udp.local_addr().ok(),
        track_m = path.total_length_m(),
        seed,
        "starting"
    );
    info!(
        max_offset_m = fleet.max_offset_m,
        wavelength_m = fleet.offset_wavelength_m,
        base_delay_ms = network.base_delay.as_millis() as u64,
        max_delay_ms = network.max_delay.as_millis() as u64,
        spike_prob = network.spike_probability,
        spike_delay_ms = network.spike_delay.as_millis() as u64,
        "trajectory and network model"
    );

    let stop = Arc::new(AtomicBool::new(false));
    let sim = SimBuilder::new(sim_config.clone(), path, SystemClock::new(), udp)
        .fleet(fleet)
        .network(network)
        .stop_flag(Arc::clone(&stop))
        .build()?;

    let flag = Arc::clone(&stop);
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, stopping");
                flag.store(true, Ordering::Relaxed);
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    let record = cli.record.clone();
    let interval = sim_config.stats_interval;
    tokio::task::spawn_blocking(move || run(sim, record, interval))
        .await
        .context("simulation thread panicked")?
}

/// Drive the loop on the current (blocking) thread until the stop flag.
/// `StatsLogger` logs the final counters.
fn run<C: Clock, T: Transport>(
    mut sim:  Sim<C, T>,
    record:   Option<PathBuf>,
    interval: Duration,
) -> Result<()> {
    let stats = StatsLogger::new(interval);
    match record {
        Some(dir) => {
            let writer = CsvWriter::new(&dir)
                .with_context(|| format!("creating recording in {}", dir.display()))?;
            let mut obs = (stats, SimOutputObserver::new(writer));
            sim.run(&mut obs)?;
            if let Some(e) = obs.1.take_error() {
                warn!(error = %e, dir = %dir.display(), "recording incomplete");
            }
        }
        None => {
            let mut obs = stats;
            sim.run(&mut obs)?;
        }
    }
    Ok(())
}
