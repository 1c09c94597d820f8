use std::io::Cursor;

use super::*;

fn opts(mode: SampleMode) -> ImageMaskOptions {
    ImageMaskOptions {
        scale: 1.0,
        sample_mode: mode,
        ..ImageMaskOptions::default()
    }
}

fn two_px_image() -> image::DynamicImage {
    // black opaque, white half-transparent
    let img = image::RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 128]).unwrap();
    image::DynamicImage::ImageRgba8(img)
}

#[test]
fn new_checks_length_and_clamps() {
    assert!(MaskRaster::new(2, 2, vec![0.0; 3]).is_err());

    let m = MaskRaster::new(2, 1, vec![-1.0, f64::NAN]).unwrap();
    assert_eq!(m.data(), &[0.0, 0.0]);

    let m = MaskRaster::new(1, 1, vec![4.0]).unwrap();
    assert_eq!(m.get(0, 0), 1.0);
}

#[test]
fn get_is_zero_outside() {
    let m = MaskRaster::filled(2, 2, 0.5);
    assert_eq!(m.get(1, 1), 0.5);
    assert_eq!(m.get(-1, 0), 0.0);
    assert_eq!(m.get(0, 2), 0.0);
}

#[test]
fn sample_modes_map_pixels() {
    let img = two_px_image();

    let alpha = MaskRaster::from_image(&img, &opts(SampleMode::Alpha)).unwrap();
    assert_eq!(alpha.get(0, 0), 1.0);
    assert!((alpha.get(1, 0) - 128.0 / 255.0).abs() < 1e-9);

    let lum = MaskRaster::from_image(&img, &opts(SampleMode::Luminance)).unwrap();
    assert_eq!(lum.get(0, 0), 0.0);
    assert!((lum.get(1, 0) - 1.0).abs() < 1e-9);

    let inv = MaskRaster::from_image(&img, &opts(SampleMode::Invert)).unwrap();
    assert_eq!(inv.get(0, 0), 1.0);
    assert!(inv.get(1, 0).abs() < 1e-9);

    let thr = MaskRaster::from_image(&img, &opts(SampleMode::Threshold)).unwrap();
    assert_eq!(thr.data(), &[0.0, 1.0]);
}

#[test]
fn scale_resizes_raster() {
    let img = two_px_image();
    let m = MaskRaster::from_image(
        &img,
        &ImageMaskOptions {
            scale: 3.0,
            sample_mode: SampleMode::Alpha,
            ..ImageMaskOptions::default()
        },
    )
    .unwrap();
    assert_eq!((m.width(), m.height()), (6, 3));
}

#[test]
fn dithering_is_deterministic() {
    let img = two_px_image();
    let o = ImageMaskOptions {
        scale: 1.0,
        sample_mode: SampleMode::Luminance,
        dithering: true,
        ..ImageMaskOptions::default()
    };
    let a = MaskRaster::from_image(&img, &o).unwrap();
    let b = MaskRaster::from_image(&img, &o).unwrap();
    assert_eq!(a, b);
    assert!(a.data().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn box_blur_preserves_constant_and_spreads_spike() {
    let mut flat = MaskRaster::filled(4, 3, 0.25);
    flat.box_blur(2);
    assert!(flat.data().iter().all(|v| (v - 0.25).abs() < 1e-12));

    let mut data = vec![0.0; 9];
    data[4] = 1.0;
    let mut spike = MaskRaster::new(3, 3, data).unwrap();
    spike.box_blur(1);
    // centre window covers all 9 pixels
    assert!((spike.get(1, 1) - 1.0 / 9.0).abs() < 1e-12);
    // corner window covers 4 in-bounds pixels
    assert!((spike.get(0, 0) - 0.25).abs() < 1e-12);
}

#[test]
fn text_mask_uses_alpha() {
    let m = MaskRaster::from_text_image(&two_px_image(), 0).unwrap();
    assert_eq!(m.get(0, 0), 1.0);
    assert!((m.get(1, 0) - 128.0 / 255.0).abs() < 1e-9);
}

#[test]
fn decode_png_and_reject_garbage() {
    let mut buf = Vec::new();
    two_px_image()
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let m = decode_image_mask(&buf, &opts(SampleMode::Alpha)).unwrap();
    assert_eq!(m.width(), 2);

    assert!(decode_image_mask(b"not an image", &opts(SampleMode::Alpha)).is_err());
}
