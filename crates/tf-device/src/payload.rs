//! The telemetry line a device sends.
//!
//! ```text
//! IDENTITY/±LAT/±LON/SATS/QUALITY/SPEED_KMH/YYMMDDhhmmss/MILLIS/CPU_TEMP
//! 0A1B2C3D4E5F/+44.8381000/+11.6198000/14/6/47.3/251023133940/123/52.4
//! ```
//!
//! Latitude and longitude always carry a sign and seven decimals; speed and
//! temperature one decimal.  The timestamp is the capture instant in UTC and
//! the millisecond field comes from the same instant.

use std::fmt;

use tf_core::{CaptureTime, DeviceIdentity, GeoPoint};

/// One position report, ready to encode.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryFix {
    pub identity:    DeviceIdentity,
    pub position:    GeoPoint,
    pub satellites:  u8,
    pub quality:     u8,
    pub speed_kmh:   f64,
    pub captured_at: CaptureTime,
    pub cpu_temp_c:  f64,
}

impl TelemetryFix {
    /// The ASCII wire line.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    /// The wire line as bytes.
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for TelemetryFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (stamp, millis) = self.captured_at.wire_parts();
        write!(
            f,
            "{}/{:+.7}/{:+.7}/{}/{}/{:.1}/{}/{}/{:.1}",
            self.identity,
            self.position.lat,
            self.position.lon,
            self.satellites,
            self.quality,
            self.speed_kmh,
            stamp,
            millis,
            self.cpu_temp_c,
        )
    }
}
