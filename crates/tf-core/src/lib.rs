//! `tf-core` — foundational types for the `trackfleet` GPS fleet emulator.
//!
//! This crate is a dependency of every other `tf-*` crate.  It has no `tf-*`
//! dependencies and few external ones (`rand`, `chrono`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `DeviceId`, `DeviceIdentity` (hardware address)           |
//! | [`geo`]         | `GeoPoint`, haversine, spherical interpolation, offsets   |
//! | [`time`]        | `Tick`, `SimTime`, `CaptureTime`, `Clock` implementations |
//! | [`rng`]         | `DeviceRng` (per-device), `SimRng` (per emulator lane)    |
//! | [`error`]       | `CoreError`                                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::CoreError;
pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::{DeviceId, DeviceIdentity};
pub use rng::{DeviceRng, SimRng, mix_seed};
pub use time::{CaptureTime, Clock, ManualClock, SimTime, SystemClock, Tick};
