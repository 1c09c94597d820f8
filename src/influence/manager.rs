use crate::{
    config::model::RuntimeTuning,
    grid::{cell::Cell, layout::GridLayout},
    influence::{FieldSource, FrameCtx, Influence, InfluenceId},
};

/// Owns the live influence set and composites it onto the grid.
///
/// Entries are kept sorted by ascending priority, so higher priorities are composited
/// last and can override. Sorting is stable and only happens after the set changes.
#[derive(Debug, Default)]
pub struct InfluenceManager {
    entries: Vec<(InfluenceId, Influence)>,
    next_id: u64,
    dirty: bool,
    scratch: Vec<f64>,
}

impl InfluenceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an influence and return its handle.
    pub fn add(&mut self, influence: impl Into<Influence>) -> InfluenceId {
        let id = InfluenceId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, influence.into()));
        self.dirty = true;
        id
    }

    /// Remove an influence, returning it if it was registered.
    pub fn remove(&mut self, id: InfluenceId) -> Option<Influence> {
        let pos = self.entries.iter().position(|(eid, _)| *eid == id)?;
        // `remove` keeps the remaining order, so no re-sort is needed.
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, id: InfluenceId) -> Option<&Influence> {
        self.entries.iter().find(|(eid, _)| *eid == id).map(|(_, i)| i)
    }

    pub fn get_mut(&mut self, id: InfluenceId) -> Option<&mut Influence> {
        self.entries
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, i)| i)
    }

    pub fn contains(&self, id: InfluenceId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered influences, in composition order as of the last composite.
    pub fn iter(&self) -> impl Iterator<Item = (InfluenceId, &Influence)> {
        self.entries.iter().map(|(id, i)| (*id, i))
    }

    /// Advance every influence, then drop the dead ones.
    pub fn update(&mut self, ctx: &FrameCtx) {
        for (_, influence) in &mut self.entries {
            influence.update(ctx);
        }
        let before = self.entries.len();
        self.entries.retain(|(_, i)| i.is_alive());
        let culled = before - self.entries.len();
        if culled > 0 {
            tracing::trace!(culled, "dropped dead influences");
        }
    }

    fn sort_if_dirty(&mut self) {
        if self.dirty {
            self.entries.sort_by_key(|(_, i)| i.priority());
            self.dirty = false;
        }
    }

    /// Blend every influence into `target_size` within its bounds. No compression.
    pub fn composite(&mut self, layout: &GridLayout, cells: &mut [Cell]) {
        assert_eq!(
            cells.len(),
            layout.cell_count(),
            "cell buffer does not match grid layout"
        );
        self.sort_if_dirty();

        for (_, influence) in &self.entries {
            let Some((cols, rows)) = layout.cell_range(influence.bounds()) else {
                continue;
            };
            let blend = influence.blend_mode();
            for col in cols {
                for row in rows.clone() {
                    let cell = &mut cells[layout.index(col, row)];
                    let value = influence.influence_at(cell.x, cell.y, cell.max_size);
                    if !(value > 0.0) || !value.is_finite() {
                        continue;
                    }
                    cell.target_size = blend.combine(cell.target_size, value);
                }
            }
        }
    }

    /// Composite, saturate, then optionally smooth.
    #[tracing::instrument(level = "trace", skip_all, fields(influences = self.entries.len()))]
    pub fn apply(&mut self, layout: &GridLayout, cells: &mut [Cell], tuning: &RuntimeTuning) {
        self.composite(layout, cells);
        compress(cells, tuning.compression_strength);
        if tuning.enable_smoothing && tuning.smoothing_radius > 0 {
            smooth(layout, cells, tuning.smoothing_radius, &mut self.scratch);
        }
    }
}

/// `max * (1 - e^(-k * t / max))`: saturates sums without reordering them.
pub(crate) fn compress(cells: &mut [Cell], strength: f64) {
    for cell in cells {
        let max = cell.max_size;
        let t = cell.target_size;
        cell.target_size = if max > 0.0 && t > 0.0 && t.is_finite() {
            (max * (1.0 - (-strength * t / max).exp())).clamp(0.0, max)
        } else if t == f64::INFINITY && max > 0.0 {
            max
        } else {
            0.0
        };
    }
}

/// Box-average `target_size` over a square neighborhood, clamped at the grid edges.
pub(crate) fn smooth(layout: &GridLayout, cells: &mut [Cell], radius: usize, scratch: &mut Vec<f64>) {
    let (columns, rows) = (layout.columns(), layout.rows());
    scratch.clear();
    scratch.resize(cells.len(), 0.0);

    for col in 0..columns {
        let c0 = col.saturating_sub(radius);
        let c1 = (col + radius).min(columns - 1);
        for row in 0..rows {
            let r0 = row.saturating_sub(radius);
            let r1 = (row + radius).min(rows - 1);
            let mut sum = 0.0;
            let mut count = 0usize;
            for c in c0..=c1 {
                for r in r0..=r1 {
                    sum += cells[layout.index(c, r)].target_size;
                    count += 1;
                }
            }
            scratch[layout.index(col, row)] = sum / count as f64;
        }
    }

    for (cell, v) in cells.iter_mut().zip(scratch.iter()) {
        cell.target_size = v.min(cell.max_size);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/influence/manager.rs"]
mod tests;
