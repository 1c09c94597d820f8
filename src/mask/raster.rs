use std::path::Path;

use anyhow::Context;

use crate::{
    config::model::{ImageMaskOptions, SampleMode},
    foundation::{
        error::{GridError, GridResult},
        math::unit_hash,
    },
};

const DITHER_SEED: u64 = 0x6d61_736b;
const DITHER_AMPLITUDE: f64 = 0.05;

/// Normalized weight buffer, row-major, values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskRaster {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl MaskRaster {
    /// Wrap a weight buffer; values are clamped into `[0, 1]` and non-finite entries become 0.
    pub fn new(width: u32, height: u32, mut data: Vec<f64>) -> GridResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| GridError::mask("mask size overflow"))?;
        if data.len() != expected {
            return Err(GridError::mask(format!(
                "mask buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        for v in &mut data {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform mask.
    pub fn filled(width: u32, height: u32, value: f64) -> Self {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Width in mask pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in mask pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw weights, row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at integer mask coordinates; 0 outside the raster.
    pub fn get(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0.0;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Generate a mask from a decoded image.
    #[tracing::instrument(skip(img), fields(src_w = img.width(), src_h = img.height()))]
    pub fn from_image(img: &image::DynamicImage, opts: &ImageMaskOptions) -> GridResult<Self> {
        if img.width() == 0 || img.height() == 0 {
            return Err(GridError::mask("image has zero size"));
        }
        if !opts.scale.is_finite() || opts.scale <= 0.0 {
            return Err(GridError::mask("image mask scale must be finite and > 0"));
        }

        let width = ((f64::from(img.width()) * opts.scale).floor() as u32).max(1);
        let height = ((f64::from(img.height()) * opts.scale).floor() as u32).max(1);

        let rgba = img.to_rgba8();
        let rgba = if (width, height) == rgba.dimensions() {
            rgba
        } else {
            image::imageops::resize(
                &rgba,
                width,
                height,
                image::imageops::FilterType::Triangle,
            )
        };

        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for (i, px) in rgba.pixels().enumerate() {
            let [r, g, b, a] = px.0;
            let luma = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
            let mut value = match opts.sample_mode {
                SampleMode::Alpha => f64::from(a) / 255.0,
                SampleMode::Luminance => luma,
                SampleMode::Threshold => {
                    if luma > opts.threshold {
                        1.0
                    } else {
                        0.0
                    }
                }
                SampleMode::Invert => 1.0 - luma,
            };
            if opts.dithering {
                value += (unit_hash(DITHER_SEED, i as u64, 0) - 0.5) * DITHER_AMPLITUDE;
            }
            data.push(value.clamp(0.0, 1.0));
        }

        let mut mask = Self {
            width,
            height,
            data,
        };
        mask.box_blur(opts.blur_radius);
        Ok(mask)
    }

    /// Generate a mask from the alpha channel of a rendered text image.
    #[tracing::instrument(skip(img), fields(w = img.width(), h = img.height()))]
    pub fn from_text_image(img: &image::DynamicImage, blur_radius: u32) -> GridResult<Self> {
        if img.width() == 0 || img.height() == 0 {
            return Err(GridError::mask("text image has zero size"));
        }
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.pixels().map(|px| f64::from(px.0[3]) / 255.0).collect();

        let mut mask = Self {
            width,
            height,
            data,
        };
        mask.box_blur(blur_radius);
        Ok(mask)
    }

    /// Box blur averaging only in-bounds neighbors.
    pub fn box_blur(&mut self, radius: u32) {
        if radius == 0 || self.data.is_empty() {
            return;
        }
        let mut tmp = vec![0.0; self.data.len()];
        horizontal_pass(&self.data, &mut tmp, self.width, self.height, radius);
        vertical_pass(&tmp, &mut self.data, self.width, self.height, radius);
    }
}

fn horizontal_pass(src: &[f64], dst: &mut [f64], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let r = i64::from(radius);
    for y in 0..height as i64 {
        let row = (y * w) as usize;
        for x in 0..w {
            let lo = (x - r).max(0);
            let hi = (x + r).min(w - 1);
            let sum: f64 = src[row + lo as usize..=row + hi as usize].iter().sum();
            dst[row + x as usize] = sum / ((hi - lo + 1) as f64);
        }
    }
}

fn vertical_pass(src: &[f64], dst: &mut [f64], width: u32, height: u32, radius: u32) {
    let w = width as usize;
    let h = height as i64;
    let r = i64::from(radius);
    for x in 0..w {
        for y in 0..h {
            let lo = (y - r).max(0);
            let hi = (y + r).min(h - 1);
            let mut sum = 0.0;
            for sy in lo..=hi {
                sum += src[(sy as usize) * w + x];
            }
            dst[(y as usize) * w + x] = sum / ((hi - lo + 1) as f64);
        }
    }
}

/// Decode encoded image bytes into an image mask.
pub fn decode_image_mask(bytes: &[u8], opts: &ImageMaskOptions) -> GridResult<MaskRaster> {
    let img = image::load_from_memory(bytes).context("decode mask image from memory")?;
    MaskRaster::from_image(&img, opts)
}

/// Read and decode an image file into an image mask.
pub fn load_image_mask(path: &Path, opts: &ImageMaskOptions) -> GridResult<MaskRaster> {
    let img = image::open(path).with_context(|| format!("open mask image '{}'", path.display()))?;
    MaskRaster::from_image(&img, opts)
}

/// Read a rendered text image and build a text mask from its alpha.
pub fn load_text_mask(path: &Path, blur_radius: u32) -> GridResult<MaskRaster> {
    let img = image::open(path).with_context(|| format!("open text image '{}'", path.display()))?;
    MaskRaster::from_text_image(&img, blur_radius)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/raster.rs"]
mod tests;
