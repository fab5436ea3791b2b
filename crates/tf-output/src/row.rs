//! Plain data row types written by output backends.

use tf_core::DeviceIdentity;
use tf_network::DeliveryRecord;
use tf_sim::TickSummary;

/// One packet handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryRow {
    pub device:           DeviceIdentity,
    /// Capture instant embedded in the payload, Unix ms.
    pub captured_unix_ms: i64,
    /// Scheduled delivery time, µs since the run started.
    pub scheduled_us:     u64,
    /// When the flush sent it, µs since the run started.
    pub flushed_us:       u64,
    pub bytes:            u64,
    pub ok:               bool,
}

impl From<&DeliveryRecord> for DeliveryRow {
    fn from(r: &DeliveryRecord) -> Self {
        Self {
            device:           r.identity,
            captured_unix_ms: r.captured_at.unix_ms(),
            scheduled_us:     r.delivery_time.as_micros(),
            flushed_us:       r.flushed_at.as_micros(),
            bytes:            r.bytes as u64,
            ok:               r.ok,
        }
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub time_us:    u64,
    pub generated:  u64,
    pub dropped:    u64,
    pub sent:       u64,
    pub queue_size: u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:       s.tick.0,
            time_us:    s.now.as_micros(),
            generated:  s.generated as u64,
            dropped:    s.dropped as u64,
            sent:       s.sent as u64,
            queue_size: s.queue_size as u64,
        }
    }
}
