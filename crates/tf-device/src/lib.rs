//! `tf-device` — the simulated devices themselves.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`state`]   | `DeviceState` (arc position, speed, sensor metadata), `EndBehavior` |
//! | [`fleet`]   | `FleetBuilder`, `DeviceRngs`                                 |
//! | [`config`]  | `FleetConfig`, `StartPosition`                               |
//! | [`payload`] | `TelemetryFix`, the slash-delimited wire line                |
//! | [`error`]   | `DeviceError`, `DeviceResult<T>`                             |
//!
//! # Per-tick flow
//!
//! ```text
//! speed = state.advance(elapsed, jitter, rng, path_len, end)
//! point = state.position(&path)             // centre line + smooth offset
//! fix   = state.fix(&path, speed, captured) // → fix.to_wire()
//! ```

pub mod config;
pub mod error;
pub mod fleet;
pub mod payload;
pub mod state;


pub use config::{FleetConfig, StartPosition};
pub use error::{DeviceError, DeviceResult};
pub use fleet::{DeviceRngs, FleetBuilder};
pub use payload::TelemetryFix;
pub use state::{DeviceState, EndBehavior};
