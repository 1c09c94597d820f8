use crate::{
    foundation::{
        core::Color,
        error::{GridError, GridResult},
    },
    render::surface::Surface,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over of a premultiplied pixel at `opacity`. Non-finite opacity draws nothing.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f64) -> PremulRgba8 {
    if !(opacity > 0.0) || src[3] == 0 {
        return dst;
    }

    let op = (opacity.min(1.0) * 255.0).round() as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn premultiply(c: Color) -> PremulRgba8 {
    let a = u16::from(c.a);
    [
        mul_div255(u16::from(c.r), a),
        mul_div255(u16::from(c.g), a),
        mul_div255(u16::from(c.b), a),
        c.a,
    ]
}

/// In-memory premultiplied RGBA8 surface.
#[derive(Clone, Debug)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    scale: f64,
    pixel_width: u32,
    pixel_height: u32,
    data: Vec<u8>,
    fill: PremulRgba8,
    alpha: f64,
}

impl CpuSurface {
    /// Transparent surface of logical `width x height` at scale 1.
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            scale: 1.0,
            pixel_width: 0,
            pixel_height: 0,
            data: Vec::new(),
            fill: [0, 0, 0, 255],
            alpha: 1.0,
        };
        surface.resize(width, height, 1.0);
        surface
    }

    /// Logical size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Backing size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.pixel_width || y >= self.pixel_height {
            return None;
        }
        let i = ((y as usize) * (self.pixel_width as usize) + (x as usize)) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Straight-alpha copy suitable for PNG encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> GridResult<Vec<u8>> {
        let mut bytes = Vec::new();
        image::write_buffer_with_format(
            &mut std::io::Cursor::new(&mut bytes),
            &self.to_straight_rgba8(),
            self.pixel_width,
            self.pixel_height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GridError::render(format!("png encode failed: {e}")))?;
        Ok(bytes)
    }
}

impl Surface for CpuSurface {
    fn clear(&mut self, color: Option<Color>) {
        let px = color.map(premultiply).unwrap_or([0, 0, 0, 0]);
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = premultiply(color);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let s = self.scale;
        let to_dev = |v: i32, limit: u32| -> usize {
            ((f64::from(v) * s).round().max(0.0) as usize).min(limit as usize)
        };
        let x0 = to_dev(x, self.pixel_width);
        let y0 = to_dev(y, self.pixel_height);
        let x1 = to_dev(x.saturating_add(width), self.pixel_width);
        let y1 = to_dev(y.saturating_add(height), self.pixel_height);

        let stride = self.pixel_width as usize * 4;
        for row in y0..y1 {
            let line = &mut self.data[row * stride..(row + 1) * stride];
            for px in line[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                let out = over([px[0], px[1], px[2], px[3]], self.fill, self.alpha);
                px.copy_from_slice(&out);
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32, scale: f64) {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.pixel_width = (f64::from(width) * scale).round() as u32;
        self.pixel_height = (f64::from(height) * scale).round() as u32;
        self.data = vec![0; self.pixel_width as usize * self.pixel_height as usize * 4];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
