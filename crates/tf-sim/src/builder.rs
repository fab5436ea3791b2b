//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tf_core::{Clock, Tick};
use tf_device::{FleetBuilder, FleetConfig};
use tf_network::{NetworkConfig, NetworkEmulator, Transport};
use tf_path::GeoPath;

use crate::{Sim, SimConfig, SimResult};

/// Fluent builder for [`Sim<C, T>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick rate, seed, drain timeout
/// - [`GeoPath`]: the path every device follows
/// - `C: Clock`: [`tf_core::SystemClock`] in production,
///   [`tf_core::ManualClock`] in tests
/// - `T: Transport`: where delivered payloads go
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                       |
/// |-------------------|-------------------------------|
/// | `.fleet(cfg)`     | `FleetConfig::default()`      |
/// | `.network(cfg)`   | `NetworkConfig::default()`    |
/// | `.stop_flag(f)`   | A fresh, unset flag           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, path, SystemClock::new(), udp)
///     .fleet(fleet_cfg)
///     .network(net_cfg)
///     .stop_flag(stop.clone())
///     .build()?;
/// let report = sim.run(&mut StatsLogger::new(config.stats_interval))?;
/// ```
pub struct SimBuilder<C: Clock, T: Transport> {
    config:    SimConfig,
    path:      GeoPath,
    fleet:     FleetConfig,
    network:   NetworkConfig,
    stop:      Option<Arc<AtomicBool>>,
    clock:     C,
    transport: T,
}

impl<C: Clock, T: Transport> SimBuilder<C, T> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, path: GeoPath, clock: C, transport: T) -> Self {
        Self {
            config,
            path,
            fleet:   FleetConfig::default(),
            network: NetworkConfig::default(),
            stop:    None,
            clock,
            transport,
        }
    }

    pub fn fleet(mut self, fleet: FleetConfig) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Share an externally owned stop flag (e.g. set from a signal handler).
    pub fn stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Validate every configuration, build the fleet and the emulator, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<C, T>> {
        self.config.validate()?;
        let seed = self.config.seed;

        let (devices, rngs) = FleetBuilder::new(self.fleet.clone(), seed).build(&self.path)?;
        let network = NetworkEmulator::new(self.network, seed)?;
        let last_tick = self.clock.now();

        Ok(Sim {
            config:           self.config,
            path:             self.path,
            devices,
            rngs,
            speed_jitter_kmh: self.fleet.speed_jitter_kmh,
            end_behavior:     self.fleet.end_behavior,
            network,
            clock:            self.clock,
            transport:        self.transport,
            stop:             self.stop.unwrap_or_default(),
            tick:             Tick::ZERO,
            last_tick,
        })
    }
}
