use crate::{
    config::model::HoverShape,
    foundation::{
        core::{Point, Rect},
        math::smoothstep,
    },
    influence::{BlendMode, FieldSource, FrameCtx, centered_bounds, empty_bounds},
};

/// Pointer falloff in `[0, 1]`: 1 at the pointer, 0 at or beyond the shape's edge.
pub fn hover_falloff(dx: f64, dy: f64, radius_x: f64, radius_y: f64, shape: HoverShape) -> f64 {
    if !(radius_x > 0.0 && radius_y > 0.0) {
        return 0.0;
    }
    let nx = dx.abs() / radius_x;
    let ny = dy.abs() / radius_y;

    let distance = match shape {
        HoverShape::Vignette => nx.max(ny),
        HoverShape::Circle => (nx * nx + ny * ny).sqrt(),
    };
    // NaN falls through to 0 as well.
    if !(distance < 1.0) {
        return 0.0;
    }
    1.0 - smoothstep(0.0, 1.0, distance)
}

/// Classic hover: a size field following the pointer.
#[derive(Clone, Debug)]
pub struct HoverInfluence {
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Falloff shape.
    pub shape: HoverShape,
    /// Strength multiplier.
    pub strength: f64,
    /// Composition order.
    pub priority: i32,
    /// Blend rule.
    pub blend: BlendMode,
    pointer: Option<Point>,
}

impl HoverInfluence {
    /// Default composition order for hover.
    pub const PRIORITY: i32 = 5;

    /// Hover with elliptical radii.
    pub fn new(radius_x: f64, radius_y: f64, shape: HoverShape, strength: f64) -> Self {
        Self {
            radius_x,
            radius_y,
            shape,
            strength,
            priority: Self::PRIORITY,
            blend: BlendMode::Add,
            pointer: None,
        }
    }

    /// Last pointer position seen by `update`, if inside.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }
}

impl FieldSource for HoverInfluence {
    fn update(&mut self, ctx: &FrameCtx) {
        self.pointer = ctx.pointer.position();
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        match self.pointer {
            Some(p) => centered_bounds(p.x, p.y, self.radius_x, self.radius_y),
            None => empty_bounds(),
        }
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        let Some(p) = self.pointer else {
            return 0.0;
        };
        let falloff = hover_falloff(x - p.x, y - p.y, self.radius_x, self.radius_y, self.shape);
        if falloff <= 0.0 {
            return 0.0;
        }
        max_size * falloff * self.strength
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/hover.rs"]
mod tests;
