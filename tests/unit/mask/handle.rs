use super::*;

#[test]
fn ready_handle_exposes_raster() {
    let h = MaskHandle::ready(MaskRaster::filled(3, 2, 1.0));
    assert_eq!(h.status(), MaskStatus::Ready);
    assert_eq!(h.dimensions(), (3, 2));
    assert!(h.failure().is_none());
}

#[test]
fn pending_then_fulfilled_is_visible_through_clones() {
    let (h, loader) = MaskHandle::pending();
    let view = h.clone();
    assert_eq!(view.status(), MaskStatus::Pending);
    assert!(view.raster().is_none());
    assert_eq!(view.dimensions(), (0, 0));

    assert!(loader.fulfill(MaskRaster::filled(1, 1, 0.5)));
    assert_eq!(view.status(), MaskStatus::Ready);
    assert_eq!(view.raster().unwrap().get(0, 0), 0.5);
}

#[test]
fn failed_and_dropped_loaders_mark_failed() {
    let (h, loader) = MaskHandle::pending();
    assert!(loader.fail("404"));
    assert_eq!(h.status(), MaskStatus::Failed);
    assert_eq!(h.failure(), Some("404"));

    let (h, loader) = MaskHandle::pending();
    drop(loader);
    assert_eq!(h.status(), MaskStatus::Failed);
}

#[test]
fn late_fulfill_after_handles_dropped_is_noop() {
    let (h, loader) = MaskHandle::pending();
    drop(h);
    assert!(loader.fulfill(MaskRaster::filled(1, 1, 1.0)));
}

#[test]
fn complete_routes_errors_to_failed() {
    let (h, loader) = MaskHandle::pending();
    loader.complete(Err(crate::GridError::mask("bad")));
    assert_eq!(h.status(), MaskStatus::Failed);
}

#[test]
fn spawned_load_of_missing_file_fails() {
    let h = spawn_image_mask_load(
        PathBuf::from("target/does-not-exist/mask.png"),
        ImageMaskOptions::default(),
    );
    assert_eq!(h.wait(), MaskStatus::Failed);
    assert_eq!(h.status(), MaskStatus::Failed);
}
