use super::*;
use crate::mask::raster::MaskRaster;

fn checker() -> MaskRaster {
    // 4x2: left half 1, right half 0.25
    MaskRaster::new(4, 2, vec![1.0, 1.0, 0.25, 0.25, 1.0, 1.0, 0.25, 0.25]).unwrap()
}

#[test]
fn samples_map_into_mask_local_coordinates() {
    let mask = MaskInfluence::new(MaskKind::Image, 10.0, 10.0, 2.0, MaskHandle::ready(checker()));

    // Top-left corner sits at (8, 9).
    assert_eq!(mask.sample(8.0, 9.0), 1.0);
    assert_eq!(mask.sample(10.5, 10.2), 0.25);
    assert_eq!(mask.sample(7.9, 9.0), 0.0);
    assert_eq!(mask.sample(12.0, 9.0), 0.0);
    assert_eq!(mask.sample(f64::NAN, 9.0), 0.0);

    assert_eq!(mask.influence_at(8.0, 9.0, 5.0), 10.0);
    assert_eq!(mask.bounds(), Rect::new(8.0, 9.0, 12.0, 11.0));
}

#[test]
fn pending_mask_is_alive_but_silent() {
    let (handle, loader) = MaskHandle::pending();
    let mask = MaskInfluence::new(MaskKind::Text, 0.0, 0.0, 1.0, handle);

    assert!(mask.is_alive());
    assert_eq!(mask.influence_at(0.0, 0.0, 10.0), 0.0);
    assert!(mask.bounds().x1 < mask.bounds().x0);

    assert!(loader.fulfill(MaskRaster::filled(2, 2, 1.0)));
    assert_eq!(mask.influence_at(0.0, 0.0, 10.0), 10.0);
}

#[test]
fn failed_mask_is_dead() {
    let (handle, loader) = MaskHandle::pending();
    let mask = MaskInfluence::new(MaskKind::Image, 0.0, 0.0, 1.0, handle);
    loader.fail("decode error");

    assert!(!mask.is_alive());
    assert_eq!(mask.influence_at(0.0, 0.0, 10.0), 0.0);
}
