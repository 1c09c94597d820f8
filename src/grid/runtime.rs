use std::collections::VecDeque;

use crate::{
    grid::cell::Cell,
    influence::{InfluenceId, manager::InfluenceManager, ripple::RippleInfluence},
    mask::weight_cache::MaskWeightCache,
};

/// Mutable per-effect state shared by the tick passes.
#[derive(Debug)]
pub struct RuntimeState {
    /// Accumulated tick time in milliseconds.
    pub reactive_time: f64,
    /// Live ripples, oldest first.
    ripples: VecDeque<InfluenceId>,
    pub weights: MaskWeightCache,
}

impl RuntimeState {
    pub fn new(cell_count: usize) -> Self {
        Self {
            reactive_time: 0.0,
            ripples: VecDeque::new(),
            weights: MaskWeightCache::new(cell_count),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() {
            self.reactive_time += dt;
        }
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn ripple_ids(&self) -> impl Iterator<Item = InfluenceId> + '_ {
        self.ripples.iter().copied()
    }

    pub fn push_ripple(&mut self, id: InfluenceId) {
        self.ripples.push_back(id);
    }

    pub fn pop_oldest_ripple(&mut self) -> Option<InfluenceId> {
        self.ripples.pop_front()
    }

    /// Forget ripples the manager has culled, keeping age order.
    pub fn compact_ripples(&mut self, manager: &InfluenceManager) {
        self.ripples.retain(|id| {
            manager
                .get(*id)
                .and_then(|i| i.as_ripple())
                .is_some()
        });
    }

    /// Live ripple payloads in age order.
    pub fn live_ripples<'a>(
        &'a self,
        manager: &'a InfluenceManager,
    ) -> impl Iterator<Item = &'a RippleInfluence> + 'a {
        self.ripples
            .iter()
            .filter_map(move |id| manager.get(*id)?.as_ripple())
    }
}

/// Clear per-tick cell state before composition.
pub fn reset_cells(cells: &mut [Cell]) {
    for cell in cells {
        cell.reset_transient();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/runtime.rs"]
mod tests;
