//! `tf-path` — immutable track geometry and arc-length lookup.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`path`]   | `GeoPath` (points + cumulative distance), `position_at`    |
//! | [`loader`] | `load_path_json`, `load_path_reader`, `parse_point`        |
//! | [`error`]  | `PathError`, `PathResult<T>`                               |
//!
//! A `GeoPath` is built once at start-up and shared read-only by every
//! device for the lifetime of the run.

pub mod error;
pub mod loader;
pub mod path;


pub use error::{PathError, PathResult};
pub use loader::{load_path_json, load_path_reader, parse_point};
pub use path::GeoPath;
