//! Post-composition hover and ripple reactions: deactivate, displace, tint.

use crate::{
    config::model::{HoverEffects, InteractionScope, RippleEffects},
    foundation::{
        core::{Color, Point, PointerState},
        math::clamp_finite,
    },
    grid::{cell::Cell, layout::GridLayout},
    influence::{FieldSource, hover::hover_falloff, ripple::RippleInfluence},
};

const ACTIVE_EPSILON: f64 = 0.001;
const MASK_EPSILON: f64 = 0.05;

/// Effect amounts for one reactive source.
#[derive(Clone, Copy, Debug)]
pub struct ReactiveParams<'a> {
    pub deactivate: f64,
    pub displace: f64,
    pub jitter: f64,
    pub palette: &'a [Color],
}

impl<'a> ReactiveParams<'a> {
    pub fn hover(hover: &'a HoverEffects) -> Self {
        Self {
            deactivate: hover.deactivate,
            displace: hover.displace,
            jitter: hover.jitter,
            palette: &hover.tint_palette,
        }
    }

    /// Hover amounts scaled by the ripple multipliers, with the ripple palette if set.
    pub fn ripple(hover: &'a HoverEffects, ripple: &'a RippleEffects) -> Self {
        let palette = if ripple.tint_palette.is_empty() {
            &hover.tint_palette
        } else {
            &ripple.tint_palette
        };
        Self {
            deactivate: hover.deactivate * ripple.deactivate_multiplier,
            displace: hover.displace * ripple.displace_multiplier,
            jitter: hover.jitter * ripple.jitter_multiplier,
            palette,
        }
    }
}

/// Interaction-scope eligibility.
pub fn should_affect_cell(scope: InteractionScope, target_size: f64, active_weight: f64) -> bool {
    match scope {
        InteractionScope::All => true,
        InteractionScope::ActiveOnly => target_size > ACTIVE_EPSILON,
        InteractionScope::ImageMask => active_weight > MASK_EPSILON,
    }
}

/// Apply deactivate, displace and tint to one cell for an interaction strength.
pub fn apply_to_cell(
    cell: &mut Cell,
    index: usize,
    interaction: f64,
    origin: Point,
    reactive_time: f64,
    params: &ReactiveParams<'_>,
) {
    let s = clamp_finite(interaction, 0.0, f64::MAX);
    if s <= 0.0 {
        return;
    }

    if params.deactivate > 0.0 {
        cell.target_size *= (1.0 - params.deactivate * s).max(0.0);
    }

    if params.displace > 0.0 {
        let dx = cell.x - origin.x;
        let dy = cell.y - origin.y;
        let len = dx.hypot(dy);
        let len = if len > 0.0 { len } else { 1.0 };
        let (dir_x, dir_y) = (dx / len, dy / len);

        // Keyed by cell index and elapsed time, so equal times give equal offsets.
        let noise = (((index + 1) as f64) * 12.9898 + reactive_time * 0.01).sin() * 0.5 + 0.5;
        let jitter = (noise - 0.5) * 2.0 * params.jitter * s;

        cell.offset_x += dir_x * params.displace * s + jitter;
        cell.offset_y += dir_y * params.displace * s - jitter;
    }

    if !params.palette.is_empty() {
        let n = s.clamp(0.0, 0.999);
        let idx = (n * params.palette.len() as f64).floor() as usize;
        cell.color = params.palette[idx.min(params.palette.len() - 1)];
    }
}

/// Reactive hover over every eligible cell.
pub fn apply_hover_pass(
    cells: &mut [Cell],
    pointer: &PointerState,
    hover: &HoverEffects,
    active_weights: &[f64],
    reactive_time: f64,
) {
    let Some(origin) = pointer.position() else {
        return;
    };
    let params = ReactiveParams::hover(hover);
    let (rx, ry) = (hover.radius, hover.radius_y());

    for (i, cell) in cells.iter_mut().enumerate() {
        let weight = active_weights.get(i).copied().unwrap_or(0.0);
        if !should_affect_cell(hover.interaction_scope, cell.target_size, weight) {
            continue;
        }
        let falloff = hover_falloff(cell.x - origin.x, cell.y - origin.y, rx, ry, hover.shape);
        if falloff <= 0.0 {
            continue;
        }
        apply_to_cell(cell, i, falloff * hover.strength, origin, reactive_time, &params);
    }
}

/// Reactive ripples, each restricted to its bounding rectangle.
pub fn apply_ripple_pass<'r>(
    layout: &GridLayout,
    cells: &mut [Cell],
    ripples: impl IntoIterator<Item = &'r RippleInfluence>,
    hover: &HoverEffects,
    ripple_cfg: &RippleEffects,
    active_weights: &[f64],
    reactive_time: f64,
) {
    let params = ReactiveParams::ripple(hover, ripple_cfg);

    for ripple in ripples {
        let Some((cols, rows)) = layout.cell_range(ripple.bounds()) else {
            continue;
        };
        for col in cols {
            for row in rows.clone() {
                let i = layout.index(col, row);
                let cell = &mut cells[i];
                let weight = active_weights.get(i).copied().unwrap_or(0.0);
                if !should_affect_cell(hover.interaction_scope, cell.target_size, weight) {
                    continue;
                }
                let ring = ripple.ring_factor_at(cell.x, cell.y);
                if ring <= 0.0 {
                    continue;
                }
                apply_to_cell(cell, i, ring * hover.strength, ripple.origin(), reactive_time, &params);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/reactive.rs"]
mod tests;
