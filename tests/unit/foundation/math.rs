use super::*;

#[test]
fn smoothstep_endpoints_and_midpoint() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
    assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
}

#[test]
fn smoothstep_degenerate_edges_do_not_produce_nan() {
    assert_eq!(smoothstep(1.0, 1.0, 0.5), 0.0);
    assert_eq!(smoothstep(1.0, 1.0, 1.5), 1.0);
}

#[test]
fn clamp_finite_maps_nan_to_low() {
    assert_eq!(clamp_finite(f64::NAN, 0.0, 1.0), 0.0);
    assert_eq!(clamp_finite(2.0, 0.0, 1.0), 1.0);
}

#[test]
fn hashes_are_deterministic_and_in_range() {
    for i in 0..64u64 {
        let a = unit_hash(7, i, 1);
        assert_eq!(a, unit_hash(7, i, 1));
        assert!((0.0..1.0).contains(&a));

        let b = slice_hash(i as usize, 3.0);
        assert_eq!(b, slice_hash(i as usize, 3.0));
        assert!((0.0..1.0).contains(&b));
    }
    assert_ne!(unit_hash(7, 1, 1), unit_hash(8, 1, 1));
}
