use super::*;

#[test]
fn zero_outside_radius_and_bounded_inside() {
    let organic = OrganicNoiseInfluence::new(50.0, 50.0, 20.0, 1.0, 0.002);
    assert_eq!(organic.influence_at(80.0, 50.0, 10.0), 0.0);
    assert_eq!(organic.influence_at(f64::NAN, 50.0, 10.0), 0.0);

    for x in 30..=70 {
        let v = organic.influence_at(f64::from(x), 50.0, 10.0);
        assert!((0.0..=10.0).contains(&v), "x={x} v={v}");
    }
}

#[test]
fn identical_dt_sequences_reproduce_identical_fields() {
    let mut a = OrganicNoiseInfluence::new(0.0, 0.0, 100.0, 0.4, 0.002);
    let mut b = a.clone();
    for dt in [16.0, 17.0, 15.5, 16.0] {
        a.update(&FrameCtx::with_dt(dt));
        b.update(&FrameCtx::with_dt(dt));
    }
    assert_eq!(a.time(), b.time());
    for (x, y) in [(3.0, 4.0), (-20.0, 10.0), (50.0, -50.0)] {
        assert_eq!(a.influence_at(x, y, 8.0), b.influence_at(x, y, 8.0));
    }
}

#[test]
fn field_changes_over_time() {
    let mut organic = OrganicNoiseInfluence::new(0.0, 0.0, 100.0, 1.0, 0.01);
    let before = organic.influence_at(10.0, 10.0, 10.0);
    organic.update(&FrameCtx::with_dt(100.0));
    let after = organic.influence_at(10.0, 10.0, 10.0);
    assert_ne!(before, after);
}

#[test]
fn negative_radius_is_inert() {
    let organic = OrganicNoiseInfluence::new(0.0, 0.0, -5.0, 1.0, 1.0);
    let b = organic.bounds();
    assert!(b.x1 < b.x0);
    assert_eq!(organic.influence_at(0.0, 0.0, 10.0), 0.0);
}
