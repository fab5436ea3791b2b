//! Unit tests for tf-trajectory.

#[cfg(test)]
mod noise {
    use crate::NoiseField1D;

    #[test]
    fn deterministic_per_seed() {
        let a = NoiseField1D::new(42);
        let b = NoiseField1D::new(42);
        for k in -50..50 {
            let x = k as f64 * 13.7;
            assert_eq!(a.sample(x), b.sample(x));
        }
    }

    #[test]
    fn seeds_differ() {
        let a = NoiseField1D::new(1);
        let b = NoiseField1D::new(2);
        let differs = (0..20).any(|c| a.cell_value(c) != b.cell_value(c));
        assert!(differs);
    }

    #[test]
    fn bounded() {
        let f = NoiseField1D::with_cell_size(7, 3.0);
        for k in -10_000..10_000 {
            let v = f.sample(k as f64 * 0.37);
            assert!((-1.0..=1.0).contains(&v), "got {v}");
        }
    }

    #[test]
    fn hits_lattice_values_at_cell_boundaries() {
        let f = NoiseField1D::with_cell_size(99, 10.0);
        for c in -5..5 {
            let v = f.sample(c as f64 * 10.0);
            assert!((v - f.cell_value(c)).abs() < 1e-12);
        }
    }

    #[test]
    fn continuous_across_cell_boundaries() {
        let f = NoiseField1D::with_cell_size(5, 1.0);
        for c in -20..20 {
            let edge = c as f64;
            let below = f.sample(edge - 1e-9);
            let above = f.sample(edge + 1e-9);
            assert!((below - above).abs() < 1e-6, "jump at {edge}");
        }
    }

    #[test]
    fn lattice_values_roughly_centred() {
        let f = NoiseField1D::new(2024);
        let n = 20_000;
        let mean: f64 = (0..n).map(|c| f.cell_value(c)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
    }
}

#[cfg(test)]
mod offset {
    use tf_core::GeoPoint;

    use crate::TrajectoryOffsetGenerator;

    #[test]
    fn deterministic_and_within_bounds() {
        let g1 = TrajectoryOffsetGenerator::new(123_456, 5.0, 50.0);
        let g2 = TrajectoryOffsetGenerator::new(123_456, 5.0, 50.0);
        for k in 0..5_000 {
            let d = k as f64 * 3.1;
            let (n1, e1) = g1.offset_at(d);
            let (n2, e2) = g2.offset_at(d);
            assert_eq!((n1, e1), (n2, e2));
            assert!(n1.abs() <= 5.0 && e1.abs() <= 5.0);
        }
    }

    #[test]
    fn components_are_independent() {
        let g = TrajectoryOffsetGenerator::new(77, 5.0, 1.0);
        let differs = (0..50).any(|k| {
            let (n, e) = g.offset_at(k as f64 * 100.0);
            n != e
        });
        assert!(differs);
    }

    #[test]
    fn smooth_in_distance() {
        let g = TrajectoryOffsetGenerator::new(8, 5.0, 0.5);
        let mut prev = g.offset_at(0.0);
        for k in 1..10_000 {
            let cur = g.offset_at(k as f64 * 0.01);
            assert!((cur.0 - prev.0).abs() < 0.05);
            assert!((cur.1 - prev.1).abs() < 0.05);
            prev = cur;
        }
    }

    #[test]
    fn zero_generator_leaves_point_unchanged() {
        let p = GeoPoint::new(44.8, 11.6);
        assert_eq!(TrajectoryOffsetGenerator::zero().apply(p, 1234.5), p);
    }

    #[test]
    fn applied_offset_distance_bounded() {
        let g = TrajectoryOffsetGenerator::new(31, 5.0, 50.0);
        let p = GeoPoint::new(44.8, 11.6);
        for k in 0..1_000 {
            let moved = g.apply(p, k as f64 * 25.0);
            // Both components ≤ 5 m → displacement ≤ 5·√2 m.
            assert!(p.distance_m(moved) <= 5.0 * 2f64.sqrt() + 1e-6);
        }
    }
}
