use crate::{
    config::model::{HoverMode, InteractionScope, PixelGridConfig},
    grid::cell::Cell,
    influence::{mask::MaskInfluence, morph::MorphInfluence},
};

/// Mask samplers visible to the cache on a given tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskSources<'a> {
    pub image: Option<&'a MaskInfluence>,
    pub text: Option<&'a MaskInfluence>,
    pub morph: Option<&'a MorphInfluence>,
}

impl MaskSources<'_> {
    /// No source left to sample. Failed masks count as absent.
    pub fn is_empty(&self) -> bool {
        let absent = |m: Option<&MaskInfluence>| m.is_none_or(MaskInfluence::is_failed);
        absent(self.image) && absent(self.text) && self.morph.is_none()
    }
}

/// Whether any enabled feature reads mask weights this tick.
pub fn mask_weights_needed(cfg: &PixelGridConfig, live_ripples: usize) -> bool {
    let scope_needs = cfg.hover_effects.interaction_scope == InteractionScope::ImageMask
        && ((cfg.influences.hover && cfg.hover_effects.mode == HoverMode::Reactive)
            || (cfg.influences.ripple && cfg.ripple_effects.enabled && live_ripples > 0));
    scope_needs || cfg.breathing.needs_mask_weights()
}

/// Per-cell image, text-or-morph and active mask weights, indexed like the cell buffer.
#[derive(Clone, Debug)]
pub struct MaskWeightCache {
    image: Vec<f64>,
    text: Vec<f64>,
    active: Vec<f64>,
    zeroed: bool,
}

impl MaskWeightCache {
    pub fn new(cell_count: usize) -> Self {
        Self {
            image: vec![0.0; cell_count],
            text: vec![0.0; cell_count],
            active: vec![0.0; cell_count],
            zeroed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Gate for [`Self::recompute`]. Zeroes the buffers once when every source is gone.
    pub fn should_recompute(&mut self, needed: bool, sources: &MaskSources<'_>) -> bool {
        if !needed {
            return false;
        }
        if sources.is_empty() {
            self.zero();
            return false;
        }
        true
    }

    /// Resample every cell from the current sources.
    pub fn recompute(&mut self, cells: &[Cell], sources: &MaskSources<'_>) {
        assert_eq!(cells.len(), self.len(), "weight cache does not match cell count");
        if sources.is_empty() {
            self.zero();
            return;
        }

        for (i, cell) in cells.iter().enumerate() {
            let image = sources.image.map_or(0.0, |m| m.sample(cell.x, cell.y));
            let text = sources.text.map_or(0.0, |m| m.sample(cell.x, cell.y));
            let morph = sources.morph.map_or(0.0, |m| m.sample(cell.x, cell.y));
            let text_or_morph = text.max(morph);

            self.image[i] = image;
            self.text[i] = text_or_morph;
            self.active[i] = image.max(text_or_morph);
        }
        self.zeroed = false;
    }

    fn zero(&mut self) {
        if self.zeroed {
            return;
        }
        self.image.fill(0.0);
        self.text.fill(0.0);
        self.active.fill(0.0);
        self.zeroed = true;
        tracing::debug!("mask weight cache zeroed");
    }

    pub fn is_zeroed(&self) -> bool {
        self.zeroed
    }

    pub fn image(&self) -> &[f64] {
        &self.image
    }

    /// Max of the text and morph weights.
    pub fn text(&self) -> &[f64] {
        &self.text
    }

    pub fn active(&self) -> &[f64] {
        &self.active
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/weight_cache.rs"]
mod tests;
