use crate::{
    foundation::core::{Point, Rect},
    influence::{BlendMode, FieldSource, FrameCtx, centered_bounds},
};

const SPATIAL_FREQ: f64 = 0.05;

/// Slowly shifting blob of sine/cosine noise around a fixed center.
///
/// Driven only by accumulated time, so identical `dt` sequences reproduce identical fields.
#[derive(Clone, Debug)]
pub struct OrganicNoiseInfluence {
    center: Point,
    /// Outer radius; nothing contributes past it.
    pub radius: f64,
    /// Strength multiplier.
    pub strength: f64,
    /// Time scale applied to `dt`.
    pub speed: f64,
    /// Composition order.
    pub priority: i32,
    /// Blend rule.
    pub blend: BlendMode,
    time: f64,
}

impl OrganicNoiseInfluence {
    /// Default composition order for organic noise.
    pub const PRIORITY: i32 = 1;

    pub fn new(x: f64, y: f64, radius: f64, strength: f64, speed: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
            strength,
            speed,
            priority: Self::PRIORITY,
            blend: BlendMode::Add,
            time: 0.0,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Accumulated noise time.
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl FieldSource for OrganicNoiseInfluence {
    fn update(&mut self, ctx: &FrameCtx) {
        let step = ctx.dt * self.speed;
        if step.is_finite() {
            self.time += step;
        }
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        centered_bounds(self.center.x, self.center.y, self.radius, self.radius)
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        if !(self.radius > 0.0) {
            return 0.0;
        }
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        let dist = dx.hypot(dy);
        if !(dist <= self.radius) {
            return 0.0;
        }

        let noise = (dx * SPATIAL_FREQ + self.time).sin() * (dy * SPATIAL_FREQ - self.time).cos();
        let falloff = 1.0 - dist / self.radius;
        max_size * (noise * 0.5 + 0.5) * falloff * self.strength
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/organic.rs"]
mod tests;
