//! Geographic coordinate type and spherical-earth helpers.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Emitted fixes carry seven
//! decimal places (~1 cm at the equator), which single precision cannot
//! represent, and the interpolation divides by `sin(δ)` for segments only a
//! few metres long.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both coordinates are finite and inside ±90° / ±180°.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        EARTH_RADIUS_M * self.central_angle(other)
    }

    /// Central angle between two points in radians (haversine form).
    fn central_angle(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Rounding can push `a` a hair above 1 for antipodal points.
        let a = a.clamp(0.0, 1.0);
        2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Spherical linear interpolation along the great circle from `self` to
    /// `other`.  `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// Returns `self` unchanged when the two points coincide.
    pub fn slerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        let delta = self.central_angle(other);
        if delta == 0.0 {
            return self;
        }

        let (phi1, lmb1) = (self.lat.to_radians(), self.lon.to_radians());
        let (phi2, lmb2) = (other.lat.to_radians(), other.lon.to_radians());

        let sin_delta = delta.sin();
        let a = ((1.0 - t) * delta).sin() / sin_delta;
        let b = (t * delta).sin() / sin_delta;

        let x = a * phi1.cos() * lmb1.cos() + b * phi2.cos() * lmb2.cos();
        let y = a * phi1.cos() * lmb1.sin() + b * phi2.cos() * lmb2.sin();
        let z = a * phi1.sin() + b * phi2.sin();

        let phi = z.atan2((x * x + y * y).sqrt());
        let lmb = y.atan2(x);
        GeoPoint::new(phi.to_degrees(), lmb.to_degrees())
    }

    /// Degree deltas `(d_lat, d_lon)` equivalent to a displacement of
    /// `north_m` / `east_m` metres at this point's latitude.
    pub fn metres_to_degrees(self, north_m: f64, east_m: f64) -> (f64, f64) {
        let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
        let d_lon = (east_m / (EARTH_RADIUS_M * self.lat.to_radians().cos())).to_degrees();
        (d_lat, d_lon)
    }

    /// This point displaced by `north_m` / `east_m` metres.
    #[inline]
    pub fn offset_by_m(self, north_m: f64, east_m: f64) -> GeoPoint {
        let (d_lat, d_lon) = self.metres_to_degrees(north_m, east_m);
        GeoPoint::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lon)
    }
}
