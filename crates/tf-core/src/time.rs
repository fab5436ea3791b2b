//! Time model.
//!
//! # Three notions of time
//!
//! | Type            | Meaning                                                  |
//! |-----------------|----------------------------------------------------------|
//! | [`Tick`]        | Index of a simulation loop iteration.                    |
//! | [`SimTime`]     | Monotonic microseconds since the run's epoch.  Delivery  |
//! |                 | times are `SimTime`s; integer keys keep queue ordering   |
//! |                 | exact (no floating-point ties or NaNs).                  |
//! | [`CaptureTime`] | Unix milliseconds at which a device "read its GPS".      |
//! |                 | Embedded in the payload and never touched by the         |
//! |                 | network layer.                                           |
//!
//! All reads of the current time go through the [`Clock`] trait so the loop,
//! the rate governor, and the shutdown drain can be driven by a
//! [`ManualClock`] in tests.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A simulation loop iteration counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Monotonic instant, in microseconds since the run's epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_micros(us: u64) -> Self {
        SimTime(us)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        SimTime((secs.max(0.0) * 1_000_000.0).round() as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: SimTime) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_add(saturating_micros(rhs)))
    }
}

/// Whole microseconds in `d`, clamped to `u64::MAX`.
#[inline]
fn saturating_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.as_secs_f64())
    }
}

// ── CaptureTime ──────────────────────────────────────────────────────────────

/// The wall-clock instant a fix was captured, in Unix milliseconds (UTC).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptureTime(pub i64);

impl CaptureTime {
    #[inline]
    pub fn from_unix_ms(ms: i64) -> Self {
        CaptureTime(ms)
    }

    #[inline]
    pub fn unix_ms(self) -> i64 {
        self.0
    }

    /// The `(YYMMDDhhmmss, millis)` pair written into the payload.
    ///
    /// Both parts come from the same instant.  Out-of-range values fall back
    /// to the Unix epoch rather than failing.
    pub fn wire_parts(self) -> (String, u32) {
        let dt: DateTime<Utc> = DateTime::from_timestamp_millis(self.0).unwrap_or_default();
        (dt.format("%y%m%d%H%M%S").to_string(), dt.timestamp_subsec_millis())
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Source of monotonic and wall-clock time, plus the only blocking call in
/// the simulation (the rate governor's sleep).
pub trait Clock: Send {
    /// Monotonic time since this clock's epoch.
    fn now(&self) -> SimTime;

    /// Current wall-clock time in Unix milliseconds.
    fn unix_ms(&self) -> i64;

    /// Block for `d`.
    fn sleep(&self, d: Duration);
}

/// Real time: `Instant` for monotonic reads, `SystemTime` for capture stamps.
#[derive(Clone, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> SimTime {
        SimTime(self.epoch.elapsed().as_micros() as u64)
    }

    fn unix_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual time that only moves when told to.
///
/// `sleep` advances the clock by exactly the requested duration, so a loop
/// driven by a `ManualClock` runs instantly and deterministically.  Clones
/// share the same underlying time, letting a test keep a handle while the
/// simulation owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    micros:        Arc<AtomicU64>,
    unix_epoch_ms: i64,
}

impl ManualClock {
    /// Start at `SimTime::ZERO`, which corresponds to `unix_epoch_ms`.
    pub fn new(unix_epoch_ms: i64) -> Self {
        Self {
            micros: Arc::new(AtomicU64::new(0)),
            unix_epoch_ms,
        }
    }

    /// Move the clock forward by `d`.
    pub fn advance(&self, d: Duration) {
        let step = saturating_micros(d);
        let _ = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| Some(t.saturating_add(step)));
    }

    /// Jump to an absolute time.
    pub fn set(&self, t: SimTime) {
        self.micros.store(t.0, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SimTime {
        SimTime(self.micros.load(Ordering::SeqCst))
    }

    fn unix_ms(&self) -> i64 {
        self.unix_epoch_ms + (self.micros.load(Ordering::SeqCst) / 1_000) as i64
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}
