use crate::{
    foundation::{
        core::{Point, Rect},
        math::smoothstep,
    },
    influence::{BlendMode, FieldSource, FrameCtx, centered_bounds, empty_bounds, mask::MaskInfluence},
};

/// Time-bounded blend from one mask to another.
///
/// Both rasters are resampled nearest-neighbor into a shared frame sized to the larger
/// of the two and anchored at the source mask's center.
#[derive(Clone, Debug)]
pub struct MorphInfluence {
    from: MaskInfluence,
    to: MaskInfluence,
    duration_ms: f64,
    elapsed_ms: f64,
    /// Composition order.
    pub priority: i32,
    /// Blend rule.
    pub blend: BlendMode,
}

impl MorphInfluence {
    /// Morph starting at zero elapsed time.
    pub fn new(from: MaskInfluence, to: MaskInfluence, duration_ms: f64) -> Self {
        Self::with_elapsed(from, to, duration_ms, 0.0)
    }

    /// Morph that has already run for `elapsed_ms`.
    pub fn with_elapsed(from: MaskInfluence, to: MaskInfluence, duration_ms: f64, elapsed_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 },
            priority: MaskInfluence::PRIORITY,
            blend: BlendMode::Max,
        }
    }

    pub fn from_mask(&self) -> &MaskInfluence {
        &self.from
    }

    pub fn to_mask(&self) -> &MaskInfluence {
        &self.to
    }

    /// Linear time ratio in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if !(self.duration_ms > 0.0) {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Smoothstep-eased progress.
    pub fn eased(&self) -> f64 {
        smoothstep(0.0, 1.0, self.progress())
    }

    fn frame(&self) -> (u32, u32) {
        let (wa, ha) = self.from.handle().dimensions();
        let (wb, hb) = self.to.handle().dimensions();
        (wa.max(wb), ha.max(hb))
    }

    fn origin(&self) -> Point {
        self.from.center()
    }

    /// Blended raw weights `(a, b)` at a grid point, before easing.
    fn pair_at(&self, x: f64, y: f64) -> (f64, f64) {
        let (fw, fh) = self.frame();
        if fw == 0 || fh == 0 {
            return (0.0, 0.0);
        }
        let c = self.origin();
        let lx = (x - (c.x - f64::from(fw) * 0.5)).floor();
        let ly = (y - (c.y - f64::from(fh) * 0.5)).floor();
        if !(lx >= 0.0 && ly >= 0.0 && lx < f64::from(fw) && ly < f64::from(fh)) {
            return (0.0, 0.0);
        }
        (
            resample(&self.from, lx, ly, fw, fh),
            resample(&self.to, lx, ly, fw, fh),
        )
    }

    /// Blended weight in `[0, 1]`, ignoring strength.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (a, b) = self.pair_at(x, y);
        let e = self.eased();
        a * (1.0 - e) + b * e
    }
}

fn resample(mask: &MaskInfluence, lx: f64, ly: f64, fw: u32, fh: u32) -> f64 {
    let Some(raster) = mask.handle().raster() else {
        return 0.0;
    };
    let sx = (lx * f64::from(raster.width()) / f64::from(fw)).floor();
    let sy = (ly * f64::from(raster.height()) / f64::from(fh)).floor();
    raster.get(sx as i64, sy as i64)
}

impl FieldSource for MorphInfluence {
    fn update(&mut self, ctx: &FrameCtx) {
        if ctx.dt.is_finite() && ctx.dt > 0.0 {
            self.elapsed_ms += ctx.dt;
        }
    }

    fn is_alive(&self) -> bool {
        self.progress() < 1.0
    }

    fn bounds(&self) -> Rect {
        let (fw, fh) = self.frame();
        if fw == 0 || fh == 0 {
            return empty_bounds();
        }
        let c = self.origin();
        centered_bounds(c.x, c.y, f64::from(fw) * 0.5, f64::from(fh) * 0.5)
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        let (a, b) = self.pair_at(x, y);
        let e = self.eased();
        // Same factor order as `MaskInfluence::influence_at`, so the endpoints match bit for bit.
        let va = a * max_size * self.from.strength;
        let vb = b * max_size * self.to.strength;
        va * (1.0 - e) + vb * e
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/morph.rs"]
mod tests;
