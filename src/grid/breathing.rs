use crate::{
    config::model::{Breathing, HoverEffects},
    foundation::{
        core::PointerState,
        math::{clamp_finite, slice_hash},
    },
    grid::cell::Cell,
    influence::hover::hover_falloff,
    mask::weight_cache::MaskWeightCache,
};

const ACTIVE_EPSILON: f64 = 0.001;

/// Modulate opacity of cells near the pointer or under a mask.
///
/// The wave is 65% per-cell sinusoid and 35% pulse that is reseeded once per time slice.
pub fn apply_breathing(
    cells: &mut [Cell],
    cfg: &Breathing,
    hover: &HoverEffects,
    pointer: &PointerState,
    weights: &MaskWeightCache,
    reactive_time: f64,
) {
    if !cfg.enabled {
        return;
    }

    let min_opacity = clamp_finite(cfg.min_opacity, 0.0, 1.0);
    let max_opacity = clamp_finite(cfg.max_opacity, min_opacity, 1.0);
    let speed = clamp_finite(cfg.speed, 0.0, f64::MAX);
    let strength = clamp_finite(cfg.strength, 0.0, 1.0);
    let (rx, ry, shape) = cfg.hover_params(hover);
    let pointer = if cfg.affect_hover { pointer.position() } else { None };

    let slice = (reactive_time * 0.001 * speed * 2.0).floor();

    for (i, cell) in cells.iter_mut().enumerate() {
        if !(cell.target_size > ACTIVE_EPSILON) {
            continue;
        }

        let mut weight: f64 = 0.0;
        if let Some(p) = pointer {
            weight = weight.max(hover_falloff(cell.x - p.x, cell.y - p.y, rx, ry, shape));
        }
        if cfg.affect_image {
            weight = weight.max(weights.image().get(i).copied().unwrap_or(0.0));
        }
        if cfg.affect_text {
            weight = weight.max(weights.text().get(i).copied().unwrap_or(0.0));
        }
        if weight <= ACTIVE_EPSILON {
            continue;
        }

        let breath = cell.breath_factor(reactive_time, speed);
        let pulse = slice_hash(i, slice);
        let wave = clamp_finite(breath * 0.65 + pulse * 0.35, 0.0, 1.0);
        let breath_opacity = min_opacity + (max_opacity - min_opacity) * wave;
        let mix = clamp_finite(weight * strength, 0.0, 1.0);

        cell.opacity = 1.0 + (breath_opacity - 1.0) * mix;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/breathing.rs"]
mod tests;
