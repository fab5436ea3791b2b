//! Unit tests for tf-network.

use std::time::Duration;

use tf_core::{CaptureTime, DeviceIdentity, SimTime};

use crate::{BlackoutMode, NetworkConfig, NetworkEmulator};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ident(last: u8) -> DeviceIdentity {
    DeviceIdentity([0x0A, 0, 0, 0, 0, last])
}

fn ms(v: u64) -> SimTime {
    SimTime::from_micros(v * 1_000)
}

fn cap(v: i64) -> CaptureTime {
    CaptureTime::from_unix_ms(v)
}

/// A link that blacks out on the second enqueue of every device and stays
/// dark for `dark`.
fn always_blackout(dark: Duration, mode: BlackoutMode) -> NetworkConfig {
    NetworkConfig {
        blackout_prob_per_sec: 1_000.0,
        blackout_min: dark,
        blackout_max: dark,
        blackout_mode: mode,
        ..NetworkConfig::ideal()
    }
}

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(NetworkConfig::default().validate().is_ok());
        assert!(NetworkConfig::ideal().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            NetworkConfig {
                base_delay: Duration::from_millis(300),
                max_delay: Duration::from_millis(200),
                ..NetworkConfig::default()
            },
            NetworkConfig { spike_probability: 1.5, ..NetworkConfig::default() },
            NetworkConfig { spike_probability: -0.1, ..NetworkConfig::default() },
            NetworkConfig { blackout_prob_per_sec: f64::NAN, ..NetworkConfig::default() },
            NetworkConfig {
                blackout_min: Duration::from_secs(2),
                blackout_max: Duration::from_secs(1),
                ..NetworkConfig::default()
            },
            NetworkConfig {
                blackout_mode: BlackoutMode::Drop { drop_ratio: 2.0 },
                ..NetworkConfig::default()
            },
            NetworkConfig { max_queue_per_device: Some(0), ..NetworkConfig::default() },
        ];
        for cfg in bad {
            assert!(NetworkEmulator::new(cfg.clone(), 0).is_err(), "{cfg:?}");
        }
    }
}

#[cfg(test)]
mod queue {
    use super::*;
    use crate::{DeliveryQueue, ScheduledPacket};

    fn pkt(t: u64, tag: u8) -> ScheduledPacket {
        ScheduledPacket { delivery_time: ms(t), captured_at: cap(0), payload: vec![tag] }
    }

    #[test]
    fn pops_in_time_order_then_insertion_order() {
        let mut q = DeliveryQueue::new();
        q.push(pkt(30, 1));
        q.push(pkt(10, 2));
        q.push(pkt(30, 3));
        q.push(pkt(20, 4));
        assert_eq!(q.next_time(), Some(ms(10)));

        let mut out = Vec::new();
        while let Some(p) = q.pop_due(ms(100)) {
            out.push(p.payload[0]);
        }
        assert_eq!(out, vec![2, 4, 1, 3]);
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_pops_before_due() {
        let mut q = DeliveryQueue::new();
        q.push(pkt(50, 1));
        assert!(q.pop_due(ms(49)).is_none());
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(ms(50)).is_some());
    }
}

#[cfg(test)]
mod delay {
    use super::*;
    use crate::{EnqueueOutcome, MemoryTransport};

    #[test]
    fn normal_delay_within_base_and_max() {
        let cfg = NetworkConfig {
            spike_probability: 0.0,
            blackout_prob_per_sec: 0.0,
            ..NetworkConfig::default()
        };
        let mut net = NetworkEmulator::new(cfg, 5).unwrap();
        for i in 0..2_000u64 {
            let now = ms(i * 10);
            match net.enqueue(ident((i % 7) as u8), cap(0), vec![0], now) {
                EnqueueOutcome::Scheduled(at) => {
                    let d = at.saturating_since(now);
                    assert!(d >= Duration::from_millis(50) && d <= Duration::from_millis(250), "{d:?}");
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(net.stats().spikes_triggered, 0);
    }

    #[test]
    fn spikes_counted_and_bounded() {
        let cfg = NetworkConfig {
            spike_probability: 0.5,
            blackout_prob_per_sec: 0.0,
            ..NetworkConfig::default()
        };
        let mut net = NetworkEmulator::new(cfg, 11).unwrap();
        for i in 0..1_000u64 {
            let now = ms(i);
            if let EnqueueOutcome::Scheduled(at) = net.enqueue(ident(1), cap(0), vec![], now) {
                assert!(at.saturating_since(now) <= Duration::from_millis(1_250));
            }
        }
        let spikes = net.stats().spikes_triggered;
        assert!((400..=600).contains(&spikes), "spikes = {spikes}");
    }

    #[test]
    fn never_delivered_before_due() {
        let mut net = NetworkEmulator::new(NetworkConfig::default(), 3).unwrap();
        let mut tx = MemoryTransport::new();
        for i in 0..500u64 {
            let now = ms(i * 5);
            net.enqueue(ident((i % 4) as u8), cap(i as i64), vec![1], now);
            for rec in net.flush_due(now, &mut tx).records {
                assert!(rec.delivery_time <= rec.flushed_at);
            }
        }
    }

    #[test]
    fn per_device_order_non_decreasing_and_capture_untouched() {
        let mut net = NetworkEmulator::new(NetworkConfig::default(), 21).unwrap();
        let mut tx = MemoryTransport::new();
        for i in 0..3_000u64 {
            net.enqueue(ident((i % 3) as u8), cap(i as i64), vec![], ms(i * 20));
        }
        let report = net.flush_due(SimTime(u64::MAX), &mut tx);
        assert_eq!(report.sent, 3_000);

        for dev in 0..3u8 {
            let recs: Vec<_> = report.records.iter().filter(|r| r.identity == ident(dev)).collect();
            assert_eq!(recs.len(), 1_000);
            assert!(recs.windows(2).all(|w| w[0].delivery_time <= w[1].delivery_time));
            for r in &recs {
                assert_eq!(r.captured_at.unix_ms() % 3, dev as i64);
            }
        }
    }

    #[test]
    fn equal_delivery_times_keep_enqueue_order() {
        let mut net = NetworkEmulator::new(NetworkConfig::ideal(), 0).unwrap();
        let mut tx = MemoryTransport::new();
        for tag in [b'a', b'b', b'c'] {
            net.enqueue(ident(0), cap(0), vec![tag], ms(10));
        }
        net.flush_due(ms(10), &mut tx);
        assert_eq!(tx.delivered, vec![vec![b'a'], vec![b'b'], vec![b'c']]);
    }

    #[test]
    fn same_seed_same_schedule() {
        let run = |seed| {
            let mut net = NetworkEmulator::new(NetworkConfig::default(), seed).unwrap();
            (0..200u64)
                .map(|i| net.enqueue(ident((i % 5) as u8), cap(0), vec![], ms(i * 66)))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }
}

#[cfg(test)]
mod blackout {
    use super::*;
    use crate::{EnqueueOutcome, MemoryTransport};

    #[test]
    fn buffered_burst_is_compacted_after_recovery() {
        let cfg = NetworkConfig {
            blackout_prob_per_sec: 1.0,
            blackout_min: Duration::from_secs(1),
            blackout_max: Duration::from_secs(1),
            flush_compaction: Duration::from_millis(8),
            ..NetworkConfig::ideal()
        };
        let mut net = NetworkEmulator::new(cfg, 1).unwrap();
        let mut tx = MemoryTransport::new();
        let d = ident(9);

        // First enqueue has dt = 0: no blackout possible.
        assert_eq!(net.enqueue(d, cap(0), b"p0".to_vec(), ms(0)), EnqueueOutcome::Scheduled(ms(0)));
        // dt = 1 s at 1/s: blackout until 2 s.
        assert_eq!(net.enqueue(d, cap(1), b"p1".to_vec(), ms(1_000)), EnqueueOutcome::Scheduled(ms(2_000)));
        assert_eq!(net.enqueue(d, cap(2), b"p2".to_vec(), ms(1_500)), EnqueueOutcome::Scheduled(ms(2_008)));
        assert_eq!(net.enqueue(d, cap(3), b"p3".to_vec(), ms(1_900)), EnqueueOutcome::Scheduled(ms(2_016)));
        assert_eq!(net.stats().blackouts_started, 1);
        assert!(net.blackout_state(d).unwrap().in_blackout);

        assert_eq!(net.flush_due(ms(1_999), &mut tx).sent, 1);
        assert_eq!(net.flush_due(ms(2_000), &mut tx).sent, 1);
        assert!(!net.blackout_state(d).unwrap().in_blackout);
        assert_eq!(net.flush_due(ms(2_016), &mut tx).sent, 2);
        assert_eq!(tx.lines(), vec!["p0", "p1", "p2", "p3"]);
    }

    #[test]
    fn buffer_mode_never_drops() {
        let cfg = always_blackout(Duration::from_secs(1_000), BlackoutMode::Buffer);
        let mut net = NetworkEmulator::new(cfg, 2).unwrap();
        for i in 0..1_000u64 {
            let out = net.enqueue(ident(0), cap(0), vec![], ms(i));
            assert!(matches!(out, EnqueueOutcome::Scheduled(_)));
        }
        assert_eq!(net.stats().blackouts_dropped, 0);
        assert_eq!(net.pending(), 1_000);
    }

    #[test]
    fn drop_mode_drops_about_ratio() {
        let cfg = always_blackout(Duration::from_secs(1_000), BlackoutMode::Drop { drop_ratio: 0.3 });
        let mut net = NetworkEmulator::new(cfg, 4).unwrap();
        let mut dropped = 0;
        for i in 0..10_000u64 {
            if net.enqueue(ident(0), cap(0), vec![], ms(i)) == EnqueueOutcome::Dropped {
                dropped += 1;
            }
        }
        assert_eq!(net.stats().blackouts_dropped, dropped);
        // 9 999 trials in blackout; mean 3 000, sd ≈ 46.
        assert!((2_800..=3_200).contains(&dropped), "dropped = {dropped}");
    }

    #[test]
    fn lanes_are_independent() {
        let cfg = always_blackout(Duration::from_secs(10), BlackoutMode::Buffer);
        let mut net = NetworkEmulator::new(cfg, 0).unwrap();
        net.enqueue(ident(1), cap(0), vec![], ms(0));
        net.enqueue(ident(1), cap(0), vec![], ms(5));
        // Device 2's first enqueue: no blackout regardless of device 1.
        assert_eq!(net.enqueue(ident(2), cap(0), vec![], ms(5)), EnqueueOutcome::Scheduled(ms(5)));
        assert!(net.blackout_state(ident(1)).unwrap().in_blackout);
        assert!(!net.blackout_state(ident(2)).unwrap().in_blackout);
    }
}

#[cfg(test)]
mod flush {
    use super::*;
    use crate::{EnqueueOutcome, MemoryTransport};

    #[test]
    fn send_failure_is_counted_and_not_requeued() {
        let mut net = NetworkEmulator::new(NetworkConfig::ideal(), 0).unwrap();
        let mut tx = MemoryTransport { fail_next: 1, ..MemoryTransport::default() };
        for tag in 0..3u8 {
            net.enqueue(ident(0), cap(0), vec![tag], ms(0));
        }
        let report = net.flush_due(ms(0), &mut tx);
        assert_eq!((report.sent, report.failed), (2, 1));
        assert!(!report.records[0].ok);
        assert!(net.is_empty());
        assert_eq!(net.stats().send_failures, 1);
        assert_eq!(net.stats().packets_sent, 2);
        assert_eq!(tx.delivered, vec![vec![1], vec![2]]);
    }

    #[test]
    fn queue_cap_rejects_tail() {
        let cfg = NetworkConfig {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(1),
            max_queue_per_device: Some(2),
            ..NetworkConfig::ideal()
        };
        let mut net = NetworkEmulator::new(cfg, 0).unwrap();
        assert!(matches!(net.enqueue(ident(0), cap(0), vec![], ms(0)), EnqueueOutcome::Scheduled(_)));
        assert!(matches!(net.enqueue(ident(0), cap(0), vec![], ms(1)), EnqueueOutcome::Scheduled(_)));
        assert_eq!(net.enqueue(ident(0), cap(0), vec![], ms(2)), EnqueueOutcome::Rejected);
        // Other devices have their own cap.
        assert!(matches!(net.enqueue(ident(1), cap(0), vec![], ms(2)), EnqueueOutcome::Scheduled(_)));
        assert_eq!(net.stats().overflow_dropped, 1);
        assert_eq!(net.pending_for(ident(0)), 2);
    }

    #[test]
    fn stats_track_current_and_peak() {
        let cfg = NetworkConfig {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(100),
            ..NetworkConfig::ideal()
        };
        let mut net = NetworkEmulator::new(cfg, 0).unwrap();
        let mut tx = MemoryTransport::new();
        for i in 0..5u64 {
            net.enqueue(ident(i as u8), cap(0), vec![], ms(0));
        }
        assert_eq!(net.next_delivery_time(), Some(ms(100)));
        net.flush_due(ms(100), &mut tx);
        net.enqueue(ident(0), cap(0), vec![], ms(100));

        let s = net.stats();
        assert_eq!(s.packets_queued, 6);
        assert_eq!(s.packets_sent, 5);
        assert_eq!(s.current_queue_size, 1);
        assert_eq!(s.max_queue_size, 5);
    }
}

#[cfg(test)]
mod drain {
    use tf_core::{Clock, ManualClock};

    use super::*;
    use crate::MemoryTransport;

    #[test]
    fn drains_everything_before_deadline() {
        let cfg = NetworkConfig {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(300),
            ..NetworkConfig::ideal()
        };
        let mut net = NetworkEmulator::new(cfg, 0).unwrap();
        let mut tx = MemoryTransport::new();
        let clock = ManualClock::new(0);
        for i in 0..50u64 {
            net.enqueue(ident((i % 5) as u8), cap(0), vec![], clock.now());
        }
        let mut seen = Vec::new();
        let report = net.drain_all(&clock, clock.now() + Duration::from_secs(5), &mut tx, |records| {
            seen.extend_from_slice(records);
        });
        assert_eq!(report.sent, 50);
        assert_eq!(report.discarded, 0);
        assert_eq!(seen.len(), 50);
        assert!(seen.iter().all(|r| r.ok && r.flushed_at >= r.delivery_time));
        assert!(clock.now() <= ms(310));
    }

    #[test]
    fn discards_what_cannot_leave_in_time() {
        let cfg = always_blackout(Duration::from_secs(30), BlackoutMode::Buffer);
        let mut net = NetworkEmulator::new(cfg, 0).unwrap();
        let mut tx = MemoryTransport::new();
        let clock = ManualClock::new(0);
        net.enqueue(ident(0), cap(0), vec![], ms(0));
        for i in 1..=4u64 {
            net.enqueue(ident(0), cap(0), vec![], ms(i));
        }
        clock.set(ms(4));

        let report = net.drain_all(&clock, ms(1_004), &mut tx, |_| {});
        assert_eq!(report.sent, 1);
        assert_eq!(report.discarded, 4);
        assert_eq!(clock.now(), ms(1_004));
        assert!(net.is_empty());
        assert_eq!(net.stats().current_queue_size, 0);
    }
}

#[cfg(test)]
mod stats {
    use super::*;
    use crate::MemoryTransport;

    #[test]
    fn display_leads_with_queue_sent_spikes() {
        let mut net = NetworkEmulator::new(NetworkConfig::ideal(), 0).unwrap();
        let mut tx = MemoryTransport::new();
        net.enqueue(ident(0), cap(0), b"a".to_vec(), ms(0));
        net.enqueue(ident(1), cap(0), b"b".to_vec(), ms(0));
        net.flush_due(ms(0), &mut tx);
        net.enqueue(ident(0), cap(0), b"c".to_vec(), ms(5));

        assert_eq!(
            net.stats().to_string(),
            "queue 1/2 | sent 2 | spikes 0 | failed 0 | blackouts 0 | dropped 0"
        );
    }
}

#[cfg(test)]
mod transport {
    use std::net::UdpSocket;

    use crate::{Transport, UdpTransport};

    #[test]
    fn udp_sends_one_datagram_per_payload_from_connected_socket() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let dest = receiver.local_addr().unwrap();

        let mut tx = UdpTransport::connect(dest).unwrap();
        assert_eq!(tx.destination(), dest);
        tx.deliver(b"0A1B2C3D4E5F/+0.0000000").unwrap();
        tx.deliver(b"second").unwrap();

        let mut buf = [0u8; 64];
        let (n, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"0A1B2C3D4E5F/+0.0000000");
        assert_eq!(from.port(), tx.local_addr().unwrap().port());
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"second");
    }
}
