use crate::{
    foundation::core::{Point, Rect},
    influence::{BlendMode, FieldSource, FrameCtx, centered_bounds, empty_bounds},
};

/// Expanding ring started by a click.
#[derive(Clone, Debug)]
pub struct RippleInfluence {
    origin: Point,
    radius: f64,
    /// Growth in pixels per millisecond.
    pub speed: f64,
    /// Half-width of the ring.
    pub thickness: f64,
    /// Size contribution multiplier.
    pub strength: f64,
    /// The ripple dies once its radius reaches this.
    pub max_radius: f64,
    /// Composition order.
    pub priority: i32,
    /// Blend rule.
    pub blend: BlendMode,
}

impl RippleInfluence {
    /// Default composition order for ripples.
    pub const PRIORITY: i32 = 10;

    /// Ripple at `(x, y)` with zero radius.
    pub fn new(x: f64, y: f64, speed: f64, thickness: f64, strength: f64, max_radius: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            radius: 0.0,
            speed,
            thickness,
            strength,
            max_radius,
            priority: Self::PRIORITY,
            blend: BlendMode::Max,
        }
    }

    /// Ring center.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current ring radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ring profile in `[0, 1]`: `1 - n²` with `n` the distance to the ring over thickness.
    pub fn ring_factor_at(&self, x: f64, y: f64) -> f64 {
        if !(self.thickness > 0.0) {
            return 0.0;
        }
        let dist = Point::new(x, y).distance(self.origin);
        let n = (dist - self.radius).abs() / self.thickness;
        if !(n < 1.0) {
            return 0.0;
        }
        1.0 - n * n
    }
}

impl FieldSource for RippleInfluence {
    fn update(&mut self, ctx: &FrameCtx) {
        let step = self.speed * ctx.dt;
        if step.is_finite() {
            self.radius += step;
        }
    }

    fn is_alive(&self) -> bool {
        self.radius < self.max_radius
    }

    fn bounds(&self) -> Rect {
        let extent = self.radius + self.thickness;
        if !(self.thickness > 0.0) {
            return empty_bounds();
        }
        centered_bounds(self.origin.x, self.origin.y, extent, extent)
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        let ring = self.ring_factor_at(x, y);
        if ring <= 0.0 {
            return 0.0;
        }
        max_size * ring * self.strength
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/ripple.rs"]
mod tests;
