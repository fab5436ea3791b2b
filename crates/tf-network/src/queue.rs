//! `DeliveryQueue` — one device's packets ordered by delivery time.
//!
//! Keyed by `(delivery_time, seq)` where `seq` is a per-queue insertion
//! counter, so packets with equal delivery times leave in enqueue order.
//! `BTreeMap` gives O(log n) push and pop-min, and `range(..=now)` style
//! draining without a separate heap.

use std::collections::BTreeMap;

use tf_core::{CaptureTime, SimTime};

/// A payload waiting for its delivery time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledPacket {
    pub delivery_time: SimTime,
    /// The fix's capture instant; never rewritten by the network layer.
    pub captured_at:   CaptureTime,
    pub payload:       Vec<u8>,
}

#[derive(Default, Debug)]
pub struct DeliveryQueue {
    inner:    BTreeMap<(SimTime, u64), ScheduledPacket>,
    next_seq: u64,
}

impl DeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, packet: ScheduledPacket) {
        let key = (packet.delivery_time, self.next_seq);
        self.next_seq += 1;
        self.inner.insert(key, packet);
    }

    /// Remove and return the earliest packet if it is due at `now`.
    pub fn pop_due(&mut self, now: SimTime) -> Option<ScheduledPacket> {
        let entry = self.inner.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        Some(entry.remove())
    }

    /// Delivery time of the earliest queued packet.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Discard everything; returns how many packets were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.inner.len();
        self.inner.clear();
        n
    }
}
