//! `tf-sim` — fixed-rate tick loop for the trackfleet emulator.
//!
//! # Tick loop
//!
//! ```text
//! until stop flag:
//!   ① Governor:  sleep so ticks are 1/tick_hz apart; elapsed = real gap.
//!   ② Generate:  advance each device by elapsed, build its payload
//!                 (parallel with the `parallel` feature).
//!   ③ Enqueue:   hand payloads to NetworkEmulator in ascending DeviceId.
//!   ④ Flush:     deliver every packet now due.
//! then:
//!   ⑤ Drain:     flush until empty or drain_timeout, discard the rest.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the generation phase on Rayon's thread pool.      |
//! | `fx-hash`  | FxHash for the network emulator's lane map.            |
//! | `serde`    | `Serialize`/`Deserialize` on all configuration types.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tf_core::SystemClock;
//! use tf_network::UdpTransport;
//! use tf_sim::{SimBuilder, SimConfig, StatsLogger};
//!
//! let udp = UdpTransport::connect(("127.0.0.1", 8888))?;
//! let mut sim = SimBuilder::new(SimConfig::default(), path, SystemClock::new(), udp)
//!     .build()?;
//! let report = sim.run(&mut StatsLogger::new(Duration::from_secs(5)))?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats_logger;


pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SimReport, TickSummary};
pub use sim::Sim;
pub use stats_logger::StatsLogger;
