//! JSON track loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "name": "ferrara-gara",
//!   "pathPoints": [
//!     { "lat": 44.8381, "lon": 11.6198 },
//!     { "lat": "44.8383", "lon": "11.6201" }
//!   ]
//! }
//! ```
//!
//! Other top-level keys are ignored.  Coordinates may be JSON numbers or
//! numeric strings.  Entries without a usable `lat`/`lon` pair are skipped;
//! the load only fails if fewer than two valid points remain.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use tf_core::GeoPoint;

use crate::{GeoPath, PathError, PathResult};

// ── File record ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TrackFile {
    #[serde(rename = "pathPoints", default)]
    path_points: Option<Vec<Value>>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`GeoPath`] from a JSON track file.
pub fn load_path_json(path: &Path) -> PathResult<GeoPath> {
    let file = std::fs::File::open(path)?;
    load_path_reader(std::io::BufReader::new(file))
}

/// Like [`load_path_json`] but accepts any `Read` source.
pub fn load_path_reader<R: Read>(reader: R) -> PathResult<GeoPath> {
    let track: TrackFile = serde_json::from_reader(reader)?;
    let entries = match track.path_points {
        Some(v) if !v.is_empty() => v,
        _ => return Err(PathError::MissingPoints),
    };

    let total = entries.len();
    let points: Vec<GeoPoint> = entries.iter().filter_map(parse_point).collect();
    if points.len() < total {
        debug!(skipped = total - points.len(), total, "dropped malformed track points");
    }

    GeoPath::build_from(points)
}

/// Parse one `{ "lat": …, "lon": … }` entry.
///
/// Returns `None` for anything that is not a finite, in-range coordinate.
pub fn parse_point(entry: &Value) -> Option<GeoPoint> {
    let lat = coordinate(entry.get("lat")?)?;
    let lon = coordinate(entry.get("lon")?)?;
    let p = GeoPoint::new(lat, lon);
    p.is_valid().then_some(p)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn coordinate(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
