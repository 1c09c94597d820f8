use crate::foundation::core::Color;

/// Minimal fill-rect drawing target.
///
/// Fill color and alpha are sticky state, so callers can skip redundant changes.
pub trait Surface {
    /// Fill the whole surface with `color`, or transparent when `None`.
    fn clear(&mut self, color: Option<Color>);

    fn set_fill(&mut self, color: Color);

    /// Global alpha in `[0, 1]` applied to subsequent fills.
    fn set_alpha(&mut self, alpha: f64);

    /// Fill an axis-aligned rectangle in logical pixels.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Resize to logical `width x height` at a device `scale`.
    fn resize(&mut self, width: u32, height: u32, scale: f64);
}
