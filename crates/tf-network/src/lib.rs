//! `tf-network` — emulated cellular uplink between devices and the
//! ingestion endpoint.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `NetworkConfig`, `BlackoutMode`                            |
//! | [`blackout`]  | `BlackoutState`, the per-device `Normal ⇄ Blackout` machine |
//! | [`queue`]     | `ScheduledPacket`, `DeliveryQueue` (per-device, time-ordered) |
//! | [`emulator`]  | `NetworkEmulator` (`enqueue`, `flush_due`, `drain_all`), reports |
//! | [`stats`]     | `NetworkStats`                                             |
//! | [`transport`] | `Transport` trait, `UdpTransport`, `MemoryTransport`       |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` on `NetworkConfig` and stats. |
//! | `fx-hash` | FxHash for the identity → lane map.                     |

pub mod blackout;
pub mod config;
pub mod emulator;
pub mod error;
pub mod queue;
pub mod stats;
pub mod transport;

#[cfg(test)]
mod tests;

pub use blackout::BlackoutState;
pub use config::{BlackoutMode, NetworkConfig};
pub use emulator::{
    DRAIN_POLL, DeliveryRecord, DrainReport, EnqueueOutcome, FlushReport, NetworkEmulator,
};
pub use error::{NetworkError, NetworkResult};
pub use queue::{DeliveryQueue, ScheduledPacket};
pub use stats::NetworkStats;
pub use transport::{MemoryTransport, Transport, UdpTransport};
