use crate::{
    foundation::core::{Point, Rect},
    influence::{BlendMode, FieldSource, FrameCtx, centered_bounds, empty_bounds},
    mask::handle::{MaskHandle, MaskStatus},
};

/// Which silhouette a mask carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskKind {
    /// Image silhouette.
    Image,
    /// Rendered text silhouette.
    Text,
}

/// Static raster mask anchored at a center point.
///
/// While the handle is pending the mask is alive but contributes nothing; a failed
/// load makes it dead, so the manager drops it.
#[derive(Clone, Debug)]
pub struct MaskInfluence {
    kind: MaskKind,
    center: Point,
    handle: MaskHandle,
    /// Size contribution multiplier.
    pub strength: f64,
    /// Composition order.
    pub priority: i32,
    /// Blend rule.
    pub blend: BlendMode,
}

impl MaskInfluence {
    /// Default composition order for masks and morphs.
    pub const PRIORITY: i32 = 8;

    pub fn new(kind: MaskKind, cx: f64, cy: f64, strength: f64, handle: MaskHandle) -> Self {
        Self {
            kind,
            center: Point::new(cx, cy),
            handle,
            strength,
            priority: Self::PRIORITY,
            blend: BlendMode::Max,
        }
    }

    pub fn kind(&self) -> MaskKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn handle(&self) -> &MaskHandle {
        &self.handle
    }

    /// A failed mask is permanently absent.
    pub fn is_failed(&self) -> bool {
        self.handle.status() == MaskStatus::Failed
    }

    /// Raw weight in `[0, 1]` at a grid point, ignoring strength.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let Some(raster) = self.handle.raster() else {
            return 0.0;
        };
        let w = f64::from(raster.width());
        let h = f64::from(raster.height());
        let lx = (x - (self.center.x - w * 0.5)).floor();
        let ly = (y - (self.center.y - h * 0.5)).floor();
        if !lx.is_finite() || !ly.is_finite() {
            return 0.0;
        }
        raster.get(lx as i64, ly as i64)
    }
}

impl FieldSource for MaskInfluence {
    fn update(&mut self, _ctx: &FrameCtx) {}

    fn is_alive(&self) -> bool {
        !self.is_failed()
    }

    fn bounds(&self) -> Rect {
        match self.handle.raster() {
            Some(r) => centered_bounds(
                self.center.x,
                self.center.y,
                f64::from(r.width()) * 0.5,
                f64::from(r.height()) * 0.5,
            ),
            None => empty_bounds(),
        }
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        self.sample(x, y) * max_size * self.strength
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/mask.rs"]
mod tests;
