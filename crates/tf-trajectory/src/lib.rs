//! `tf-trajectory` — per-device lateral offsets so simulated devices do not
//! all trace the identical centre line.
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`noise`]  | `NoiseField1D`: value noise, pure in `(seed, cell)`  |
//! | [`offset`] | `TrajectoryOffsetGenerator`: two fields → metres     |
//!
//! Nothing here holds mutable state: every sample is a pure function of the
//! seed and the query distance, so generators are `Copy`, thread-safe, and
//! use constant memory no matter how far a device travels.

pub mod noise;
pub mod offset;

#[cfg(test)]
mod tests;

pub use noise::NoiseField1D;
pub use offset::TrajectoryOffsetGenerator;
