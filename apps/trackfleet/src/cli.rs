//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tf_device::{EndBehavior, FleetConfig, StartPosition};
use tf_network::{BlackoutMode, NetworkConfig};
use tf_sim::SimConfig;

/// GPS fleet emulator with a realistic 4G network model.
#[derive(Parser, Debug)]
#[command(
    name = "trackfleet",
    version,
    about = "Emulate GPS trackers streaming telemetry over an impaired cellular link",
    long_about = r#"
Moves N simulated devices along a track and sends one UDP datagram per device
per tick, delayed, reordered in bursts, or dropped the way a cellular uplink
would.

EXAMPLES:
  Normal run:     trackfleet --file track.json --devices 20 --hz 15
  Poor network:   trackfleet --file track.json --devices 20 \
                      --max-delay-ms 1500 --spike-prob 0.05 --spike-delay-ms 3000
  Good network:   trackfleet --file track.json --devices 20 \
                      --base-delay-ms 20 --max-delay-ms 100 --spike-prob 0.01
"#
)]
pub struct Cli {
    /// Track JSON file (`{ "pathPoints": [ { "lat", "lon" }, … ] }`)
    #[arg(long)]
    pub file: PathBuf,

    /// Number of simulated devices
    #[arg(long, default_value_t = 5)]
    pub devices: usize,

    /// Destination host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Destination UDP port
    #[arg(long, default_value_t = 8888)]
    pub port: u16,

    // ── Motion ────────────────────────────────────────────────────────────
    /// Minimum cruise speed, km/h
    #[arg(long, default_value_t = 30.0)]
    pub min_speed: f64,

    /// Maximum cruise speed, km/h
    #[arg(long, default_value_t = 60.0)]
    pub max_speed: f64,

    /// Per-tick speed jitter, ± km/h
    #[arg(long, default_value_t = 0.5)]
    pub jitter_speed: f64,

    /// Tick rate, Hz
    #[arg(long, default_value_t = 15.0)]
    pub hz: f64,

    /// Park devices at the end of the track instead of looping
    #[arg(long)]
    pub no_loop: bool,

    /// Maximum lateral trajectory offset, metres
    #[arg(long, default_value_t = 5.0)]
    pub max_offset: f64,

    /// Distance over which the offset varies, metres
    #[arg(long, default_value_t = 50.0)]
    pub offset_freq: f64,

    // ── Network ───────────────────────────────────────────────────────────
    /// Base network delay, ms
    #[arg(long, default_value_t = 50)]
    pub base_delay_ms: u64,

    /// Maximum normal network delay, ms
    #[arg(long, default_value_t = 250)]
    pub max_delay_ms: u64,

    /// Probability of a delay spike per packet (0-1)
    #[arg(long, default_value_t = 0.04)]
    pub spike_prob: f64,

    /// Maximum extra delay of a spike, ms
    #[arg(long, default_value_t = 1000)]
    pub spike_delay_ms: u64,

    /// Blackout onset probability per second
    #[arg(long, default_value_t = 0.02)]
    pub blackout_prob: f64,

    /// Shortest blackout, ms
    #[arg(long, default_value_t = 400)]
    pub blackout_min_ms: u64,

    /// Longest blackout, ms
    #[arg(long, default_value_t = 1600)]
    pub blackout_max_ms: u64,

    /// What happens to packets during a blackout
    #[arg(long, value_enum, default_value_t = BlackoutModeArg::Buffer)]
    pub blackout_mode: BlackoutModeArg,

    /// Drop probability per packet in `drop` mode (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub drop_ratio: f64,

    /// Spacing of packets released after a blackout, ms
    #[arg(long, default_value_t = 8)]
    pub flush_compaction_ms: u64,

    /// Per-device queue cap (unbounded when omitted)
    #[arg(long)]
    pub max_queue: Option<usize>,

    // ── Run ───────────────────────────────────────────────────────────────
    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds between periodic stats lines
    #[arg(long, default_value_t = 5)]
    pub stats_interval_secs: u64,

    /// Maximum time spent flushing queued packets on shutdown, ms
    #[arg(long, default_value_t = 5000)]
    pub drain_timeout_ms: u64,

    /// Record deliveries and tick summaries as CSV into this directory
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BlackoutModeArg {
    /// Hold packets and release them in a burst
    Buffer,
    /// Drop packets with `--drop-ratio`, hold the rest
    Drop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    pub fn fleet_config(&self) -> FleetConfig {
        FleetConfig {
            device_count:        self.devices,
            min_speed_kmh:       self.min_speed,
            max_speed_kmh:       self.max_speed,
            speed_jitter_kmh:    self.jitter_speed,
            end_behavior:        if self.no_loop { EndBehavior::Park } else { EndBehavior::Loop },
            max_offset_m:        self.max_offset,
            offset_wavelength_m: self.offset_freq,
            start_position:      StartPosition::Random,
        }
    }

    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            base_delay:            Duration::from_millis(self.base_delay_ms),
            max_delay:             Duration::from_millis(self.max_delay_ms),
            spike_probability:     self.spike_prob,
            spike_delay:           Duration::from_millis(self.spike_delay_ms),
            blackout_prob_per_sec: self.blackout_prob,
            blackout_min:          Duration::from_millis(self.blackout_min_ms),
            blackout_max:          Duration::from_millis(self.blackout_max_ms),
            blackout_mode:         match self.blackout_mode {
                BlackoutModeArg::Buffer => BlackoutMode::Buffer,
                BlackoutModeArg::Drop => BlackoutMode::Drop { drop_ratio: self.drop_ratio },
            },
            flush_compaction:      Duration::from_millis(self.flush_compaction_ms),
            max_queue_per_device:  self.max_queue,
        }
    }

    pub fn sim_config(&self, seed: u64) -> SimConfig {
        SimConfig {
            tick_hz:        self.hz,
            seed,
            stats_interval: Duration::from_secs(self.stats_interval_secs),
            drain_timeout:  Duration::from_millis(self.drain_timeout_ms),
        }
    }
}
