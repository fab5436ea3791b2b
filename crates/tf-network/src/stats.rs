use std::fmt;

/// Running emulator counters.  Monotone except `current_queue_size`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    pub packets_queued:     u64,
    pub packets_sent:       u64,
    pub send_failures:      u64,
    pub current_queue_size: usize,
    pub max_queue_size:     usize,
    pub spikes_triggered:   u64,
    pub blackouts_started:  u64,
    pub blackouts_dropped:  u64,
    pub overflow_dropped:   u64,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queue {}/{} | sent {} | spikes {} | failed {} | blackouts {} | dropped {}",
            self.current_queue_size,
            self.max_queue_size,
            self.packets_sent,
            self.spikes_triggered,
            self.send_failures,
            self.blackouts_started,
            self.blackouts_dropped + self.overflow_dropped,
        )
    }
}
