//! Unit tests for tf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DeviceId, DeviceIdentity, DeviceRng};

    #[test]
    fn index_roundtrip() {
        let id = DeviceId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DeviceId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn identity_display_is_upper_hex() {
        let id = DeviceIdentity([0x0a, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]);
        assert_eq!(id.to_string(), "0A1B2C3D4E5F");
        assert_eq!(id.as_u64(), 0x0A1B_2C3D_4E5F);
    }

    #[test]
    fn identity_parse_roundtrip() {
        let id: DeviceIdentity = "E0FFA1B2C3D4".parse().unwrap();
        assert_eq!(id.to_string(), "E0FFA1B2C3D4");
        assert!("E0FF".parse::<DeviceIdentity>().is_err());
        assert!("ZZFFA1B2C3D4".parse::<DeviceIdentity>().is_err());
    }

    #[test]
    fn random_identity_has_even_first_digit() {
        let mut rng = DeviceRng::new(7, DeviceId(0));
        for _ in 0..200 {
            let id = DeviceIdentity::random(rng.inner());
            let first = id.to_string().chars().next().unwrap();
            assert!("02468ACE".contains(first), "got {id}");
        }
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(44.8381, 11.6198);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.19 km on a 6371 km sphere
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);
        let start = a.slerp(b, 0.0);
        let end = a.slerp(b, 1.0);
        let mid = a.slerp(b, 0.5);
        assert!(start.distance_m(a) < 1e-6);
        assert!(end.distance_m(b) < 1e-6);
        assert!((mid.lon - 0.0005).abs() < 1e-9, "got {mid}");
        assert!(mid.lat.abs() < 1e-9);
    }

    #[test]
    fn slerp_coincident_points_returns_first() {
        let a = GeoPoint::new(45.0, 9.0);
        assert_eq!(a.slerp(a, 0.7), a);
    }

    #[test]
    fn metre_offset_matches_haversine() {
        let p = GeoPoint::new(44.0, 11.0);
        let moved = p.offset_by_m(3.0, 4.0);
        let d = p.distance_m(moved);
        assert!((d - 5.0).abs() < 0.01, "got {d}");
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(89.9, 179.9).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{CaptureTime, Clock, ManualClock, SimTime, Tick};

    #[test]
    fn tick_next() {
        assert_eq!(Tick(4).next(), Tick(5));
        assert_eq!(Tick(3).to_string(), "T3");
    }

    #[test]
    fn sim_time_arithmetic() {
        let t = SimTime::from_secs_f64(1.5);
        assert_eq!(t.as_micros(), 1_500_000);
        assert_eq!(t + Duration::from_millis(8), SimTime(1_508_000));
        assert_eq!(t.saturating_since(SimTime(500_000)), Duration::from_secs(1));
        assert_eq!(SimTime(0).saturating_since(t), Duration::ZERO);
    }

    #[test]
    fn huge_durations_saturate() {
        // 2^64 µs + 448_384 µs: a plain `as u64` cast would wrap to 0.45 s.
        let huge = Duration::from_secs(18_446_744_073_710);
        assert_eq!(SimTime(0) + huge, SimTime(u64::MAX));
        assert_eq!(SimTime(1_000) + Duration::MAX, SimTime(u64::MAX));

        let clock = ManualClock::new(0);
        clock.advance(Duration::from_secs(1));
        clock.sleep(huge);
        assert_eq!(clock.now(), SimTime(u64::MAX));
    }

    #[test]
    fn capture_wire_parts() {
        // 2025-10-23T13:39:40.123Z
        let t = CaptureTime::from_unix_ms(1_761_226_780_123);
        let (stamp, ms) = t.wire_parts();
        assert_eq!(stamp, "251023133940");
        assert_eq!(ms, 123);
    }

    #[test]
    fn manual_clock_sleep_advances_shared_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        clock.sleep(Duration::from_millis(250));
        assert_eq!(handle.now(), SimTime(250_000));
        assert_eq!(handle.unix_ms(), 1_250);
        handle.set(SimTime(2_000_000));
        assert_eq!(clock.now(), SimTime(2_000_000));
    }
}

#[cfg(test)]
mod rng {
    use crate::{DeviceId, DeviceRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = DeviceRng::new(12345, DeviceId(0));
        let mut r2 = DeviceRng::new(12345, DeviceId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_devices_differ() {
        let mut r0 = DeviceRng::new(1, DeviceId(0));
        let mut r1 = DeviceRng::new(1, DeviceId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent devices should diverge");
    }

    #[test]
    fn uniform_degenerate_range() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.uniform(1.0, 1.0), 1.0);
        assert_eq!(rng.uniform(2.0, 1.0), 2.0);
        for _ in 0..1000 {
            let v = rng.uniform(0.4, 1.6);
            assert!((0.4..=1.6).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::for_lane(9, 3);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.5)); // clamped
    }
}
