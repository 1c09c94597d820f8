use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255], 1.0), [1, 2, 3, 255]);
}

#[test]
fn over_handles_out_of_range_opacity() {
    let dst = [1, 2, 3, 4];
    let src = [10, 20, 30, 255];
    assert_eq!(over(dst, src, f64::NAN), dst);
    assert_eq!(over(dst, src, -0.5), dst);
    assert_eq!(over(dst, src, 3.0), src);
    assert_eq!(over(dst, src, f64::INFINITY), src);
}

#[test]
fn set_alpha_keeps_full_precision() {
    let mut s = CpuSurface::new(1, 1);
    s.set_fill(Color::rgb(255, 255, 255));
    s.set_alpha(f64::NAN);
    s.fill_rect(0, 0, 1, 1);
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));

    s.set_alpha(0.1);
    s.fill_rect(0, 0, 1, 1);
    assert_eq!(s.pixel(0, 0), Some([26, 26, 26, 26]));
}

#[test]
fn clear_fills_background_or_transparent() {
    let mut s = CpuSurface::new(4, 3);
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));

    s.clear(Some(Color::rgb(10, 20, 30)));
    assert!(s.data().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));

    s.clear(None);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn fill_rect_clips_to_surface() {
    let mut s = CpuSurface::new(4, 4);
    s.set_fill(Color::rgb(255, 0, 0));
    s.fill_rect(2, 2, 10, 10);
    s.fill_rect(-5, -5, 2, 2);

    assert_eq!(s.pixel(3, 3), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn alpha_blends_over_background() {
    let mut s = CpuSurface::new(1, 1);
    s.clear(Some(Color::rgb(0, 0, 0)));
    s.set_fill(Color::rgb(255, 255, 255));
    s.set_alpha(0.5);
    s.fill_rect(0, 0, 1, 1);
    let px = s.pixel(0, 0).unwrap();
    assert_eq!(px[3], 255);
    assert!((127..=129).contains(&px[0]));
}

#[test]
fn resize_scales_backing_store() {
    let mut s = CpuSurface::new(10, 5);
    s.resize(10, 5, 2.0);
    assert_eq!(s.size(), (10, 5));
    assert_eq!(s.pixel_size(), (20, 10));
    assert_eq!(s.data().len(), 20 * 10 * 4);

    s.set_fill(Color::rgb(0, 255, 0));
    s.fill_rect(1, 1, 1, 1);
    assert_eq!(s.pixel(2, 2), Some([0, 255, 0, 255]));
    assert_eq!(s.pixel(3, 3), Some([0, 255, 0, 255]));
    assert_eq!(s.pixel(4, 4), Some([0, 0, 0, 0]));
}

#[test]
fn straight_alpha_round_trips_opaque_and_half() {
    let mut s = CpuSurface::new(2, 1);
    s.set_fill(Color::rgba(200, 100, 50, 128));
    s.fill_rect(0, 0, 1, 1);
    let straight = s.to_straight_rgba8();
    assert_eq!(straight[3], 128);
    assert!((straight[0] as i32 - 200).abs() <= 2);
    assert_eq!(&straight[4..8], &[0, 0, 0, 0]);
}

#[test]
fn png_encoding_produces_png_signature() {
    let s = CpuSurface::new(3, 3);
    let bytes = s.encode_png().unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
