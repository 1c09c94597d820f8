use crate::{foundation::core::Color, grid::cell::Cell, render::surface::Surface};

const MIN_VISIBLE_SIZE: f64 = 0.5;

/// Draw every visible cell as a centered square.
///
/// Fill and alpha are only re-set when they differ from the previous drawn cell.
/// Alpha is restored to 1 afterwards.
pub fn render_cells(surface: &mut dyn Surface, cells: &[Cell], gap: f64) {
    let mut current_color: Option<Color> = None;
    let mut current_alpha: Option<f64> = None;

    for cell in cells {
        if !(cell.size > MIN_VISIBLE_SIZE) {
            continue;
        }

        if current_color != Some(cell.color) {
            surface.set_fill(cell.color);
            current_color = Some(cell.color);
        }
        if current_alpha != Some(cell.opacity) {
            surface.set_alpha(cell.opacity);
            current_alpha = Some(cell.opacity);
        }

        let inset = (gap - cell.size) * 0.5;
        let x = cell.x + cell.offset_x + inset;
        let y = cell.y + cell.offset_y + inset;
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let side = cell.size as i32;
        surface.fill_rect(x as i32, y as i32, side, side);
    }

    if current_alpha.is_some_and(|a| a != 1.0) {
        surface.set_alpha(1.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pass.rs"]
mod tests;
