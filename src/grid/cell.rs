use std::f64::consts::TAU;

use crate::foundation::{core::Color, math::unit_hash};

/// One animated square of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Grid-space position, fixed after construction.
    pub x: f64,
    pub y: f64,
    /// Rendered edge length, eased toward `target_size`.
    pub size: f64,
    /// Composed size for this tick.
    pub target_size: f64,
    /// Upper bound for `target_size`.
    pub max_size: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Color drawn this tick; reset to `base_color` before composition.
    pub color: Color,
    pub base_color: Color,
    pub opacity: f64,
    breath_phase: f64,
    breath_offset: f64,
}

impl Cell {
    /// Cell with a palette color and breathing seed derived from `(seed, index)`.
    pub fn new(x: f64, y: f64, max_size: f64, palette: &[Color], seed: u64, index: usize) -> Self {
        let i = index as u64;
        let base_color = pick(palette, unit_hash(seed, i, 0));
        Self {
            x,
            y,
            size: 0.0,
            target_size: 0.0,
            max_size,
            offset_x: 0.0,
            offset_y: 0.0,
            color: base_color,
            base_color,
            opacity: 1.0,
            breath_phase: unit_hash(seed, i, 1) * TAU,
            breath_offset: 0.5 + 0.5 * unit_hash(seed, i, 2),
        }
    }

    /// Clear per-tick state ahead of composition.
    #[inline]
    pub fn reset_transient(&mut self) {
        self.target_size = 0.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.color = self.base_color;
        self.opacity = 1.0;
    }

    /// Per-cell sinusoid in `[0, breath_offset]` at elapsed `time_ms`.
    pub fn breath_factor(&self, time_ms: f64, speed: f64) -> f64 {
        let t = time_ms * 0.001 * speed;
        ((t + self.breath_phase).sin() * 0.5 + 0.5) * self.breath_offset
    }

    /// Exponential step toward `target_size`.
    #[inline]
    pub fn ease(&mut self, expand_ease: f64) {
        self.size += (self.target_size - self.size) * expand_ease;
    }
}

fn pick(palette: &[Color], u: f64) -> Color {
    if palette.is_empty() {
        return Color::rgb(0, 0, 0);
    }
    let idx = ((u * palette.len() as f64) as usize).min(palette.len() - 1);
    palette[idx]
}

#[cfg(test)]
#[path = "../../tests/unit/grid/cell.rs"]
mod tests;
