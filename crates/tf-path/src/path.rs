//! `GeoPath` — a track as ordered points plus cumulative arc length.
//!
//! # Lookup
//!
//! `position_at(s)` finds the segment `[i-1, i]` with
//! `cum[i-1] ≤ s ≤ cum[i]` by guessing `i ≈ round(s / L · (n-1))` and then
//! stepping linearly.  Recorded tracks have roughly uniform point spacing,
//! so the guess is usually exact or one step off and the walk beats a
//! binary search on the hot path.  Within the segment the point is found by
//! great-circle interpolation.

use tf_core::GeoPoint;

use crate::{PathError, PathResult};

/// An immutable track.
///
/// Invariants (checked by [`GeoPath::build_from`]):
/// - `points.len() >= 2`
/// - `cumulative_m.len() == points.len()`, `cumulative_m[0] == 0`,
///   non-decreasing
/// - `total_length_m() > 0`
#[derive(Clone, Debug)]
pub struct GeoPath {
    points:       Vec<GeoPoint>,
    cumulative_m: Vec<f64>,
}

impl GeoPath {
    /// Build a path, silently dropping invalid points (non-finite or out of
    /// range coordinates).
    ///
    /// # Errors
    ///
    /// - [`PathError::TooFewPoints`] if fewer than 2 valid points remain.
    /// - [`PathError::ZeroLength`] if every remaining point coincides.
    pub fn build_from<I>(points: I) -> PathResult<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let points: Vec<GeoPoint> = points.into_iter().filter(|p| p.is_valid()).collect();
        if points.len() < 2 {
            return Err(PathError::TooFewPoints { usable: points.len() });
        }

        let mut cumulative_m = Vec::with_capacity(points.len());
        cumulative_m.push(0.0);
        for pair in points.windows(2) {
            let d = pair[0].distance_m(pair[1]).max(0.0);
            let prev = cumulative_m[cumulative_m.len() - 1];
            cumulative_m.push(prev + d);
        }

        let path = Self { points, cumulative_m };
        let total = path.total_length_m();
        if total.is_nan() || total <= 0.0 {
            return Err(PathError::ZeroLength(total));
        }
        Ok(path)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn total_length_m(&self) -> f64 {
        self.cumulative_m[self.cumulative_m.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a built path has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn cumulative_m(&self) -> &[f64] {
        &self.cumulative_m
    }

    #[inline]
    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The point `s` metres along the path.
    ///
    /// `s` is clamped to `[0, total_length_m()]`.
    pub fn position_at(&self, s: f64) -> GeoPoint {
        let s = if s.is_nan() { 0.0 } else { s.clamp(0.0, self.total_length_m()) };
        let i = self.segment_end(s);

        let s0 = self.cumulative_m[i - 1];
        let s1 = self.cumulative_m[i];
        let (a, b) = (self.points[i - 1], self.points[i]);
        if s1 <= s0 {
            return a;
        }

        let t = ((s - s0) / (s1 - s0)).clamp(0.0, 1.0);
        a.slerp(b, t)
    }

    /// Index `i ∈ [1, n-1]` of the segment end such that
    /// `cum[i-1] ≤ s ≤ cum[i]`.
    pub(crate) fn segment_end(&self, s: f64) -> usize {
        let cum = &self.cumulative_m;
        let last = cum.len() - 1;

        let guess = (s / self.total_length_m() * last as f64).round() as usize;
        let mut i = guess.clamp(1, last);

        if cum[i] < s {
            while i < last && cum[i] < s {
                i += 1;
            }
        } else {
            while i > 1 && cum[i - 1] > s {
                i -= 1;
            }
        }
        i
    }
}
