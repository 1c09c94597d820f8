use std::path::Path;

use crate::{
    config::model::{HoverMode, ImageMaskConfig, PixelGridConfig, TextMaskConfig},
    foundation::{
        core::{Color, PointerState},
        error::GridResult,
    },
    grid::{
        breathing::apply_breathing,
        cell::Cell,
        layout::GridLayout,
        reactive::{apply_hover_pass, apply_ripple_pass},
        runtime::{RuntimeState, reset_cells},
    },
    influence::{
        FrameCtx, InfluenceId,
        hover::HoverInfluence,
        manager::InfluenceManager,
        mask::{MaskInfluence, MaskKind},
        organic::OrganicNoiseInfluence,
        ripple::RippleInfluence,
    },
    mask::{
        handle::MaskHandle,
        raster::load_text_mask,
        state_machine::{MaskSet, MaskStateMachine},
        weight_cache::{MaskSources, mask_weights_needed},
    },
    render::{pass::render_cells, surface::Surface},
};

/// Multiple of the larger surface side at which ripples die.
const RIPPLE_REACH: f64 = 1.2;

/// Mask rasters handed to an effect at construction.
#[derive(Clone, Debug, Default)]
pub struct MaskInputs {
    pub image: Option<MaskHandle>,
    pub text: Option<MaskHandle>,
}

impl MaskInputs {
    /// Start loading the masks named in `cfg`, resolving paths against `base_dir`.
    ///
    /// The image mask decodes on a background thread; the text mask loads inline.
    #[tracing::instrument(skip(cfg))]
    pub fn from_config(cfg: &PixelGridConfig, base_dir: &Path) -> Self {
        let image = cfg
            .image_mask
            .as_ref()
            .and_then(|m| m.src.as_ref().map(|src| (m, src)))
            .map(|(m, src)| {
                crate::mask::handle::spawn_image_mask_load(base_dir.join(src), m.options.clone())
            });

        let text = cfg
            .text_mask
            .as_ref()
            .and_then(|m| m.src.as_ref().map(|src| (m, src)))
            .map(|(m, src)| {
                let (handle, loader) = MaskHandle::pending();
                loader.complete(load_text_mask(&base_dir.join(src), m.blur_radius));
                handle
            });

        Self { image, text }
    }
}

/// Interactive pixel-grid effect: owns the cells, influences and tick passes.
#[derive(Debug)]
pub struct PixelGridEffect {
    config: PixelGridConfig,
    width: u32,
    height: u32,
    layout: GridLayout,
    cells: Vec<Cell>,
    manager: InfluenceManager,
    masks: MaskStateMachine,
    runtime: RuntimeState,
    pointer: PointerState,
    background: Option<Color>,
}

impl PixelGridEffect {
    /// Build the grid and install the configured influences.
    #[tracing::instrument(skip(config, masks), fields(gap = config.gap))]
    pub fn new(
        width: u32,
        height: u32,
        config: PixelGridConfig,
        masks: MaskInputs,
    ) -> GridResult<Self> {
        config.validate()?;

        let layout = GridLayout::new(width, height, config.gap);
        let max_size = config.gap * config.max_size_factor;
        let mut cells = Vec::with_capacity(layout.cell_count());
        for col in 0..layout.columns() {
            for row in 0..layout.rows() {
                let (x, y) = layout.position(col, row);
                let index = layout.index(col, row);
                debug_assert_eq!(index, cells.len());
                cells.push(Cell::new(x, y, max_size, &config.colors, config.seed, index));
            }
        }

        let runtime = RuntimeState::new(cells.len());
        assert_eq!(
            runtime.weights.len(),
            cells.len(),
            "weight cache does not match cell count"
        );

        let (cx, cy) = (f64::from(width) * 0.5, f64::from(height) * 0.5);
        let mut manager = InfluenceManager::new();

        let image = masks.image.map(|handle| {
            let defaults = ImageMaskConfig::default();
            let m = config.image_mask.as_ref().unwrap_or(&defaults);
            MaskInfluence::new(
                MaskKind::Image,
                m.center_x.unwrap_or(cx),
                m.center_y.unwrap_or(cy),
                m.strength,
                handle,
            )
        });
        let text = masks.text.map(|handle| {
            let defaults = TextMaskConfig::default();
            let m = config.text_mask.as_ref().unwrap_or(&defaults);
            MaskInfluence::new(
                MaskKind::Text,
                m.center_x.unwrap_or(cx),
                m.center_y.unwrap_or(cy),
                m.strength,
                handle,
            )
        });
        let masks = MaskStateMachine::new(
            &mut manager,
            MaskSet::from_parts(image, text),
            config.initial_mask,
            config.auto_morph.clone(),
        );

        let hover = &config.hover_effects;
        if config.influences.hover && hover.mode == HoverMode::Classic {
            manager.add(HoverInfluence::new(
                hover.radius,
                hover.radius_y(),
                hover.shape,
                hover.strength,
            ));
        }
        if config.influences.organic {
            let o = &config.organic;
            manager.add(OrganicNoiseInfluence::new(cx, cy, o.radius, o.strength, o.speed));
        }

        tracing::debug!(
            columns = layout.columns(),
            rows = layout.rows(),
            influences = manager.len(),
            "pixel grid ready"
        );

        Ok(Self {
            background: config.canvas_background,
            config,
            width,
            height,
            layout,
            cells,
            manager,
            masks,
            runtime,
            pointer: PointerState::outside(),
        })
    }

    /// Pointer snapshot used by the next `update`.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Advance one tick of `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f64) {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.runtime.advance(dt);

        reset_cells(&mut self.cells);

        let ctx = FrameCtx {
            dt,
            pointer: self.pointer,
        };
        self.manager.update(&ctx);
        self.runtime.compact_ripples(&self.manager);
        self.masks.update(&mut self.manager, dt);

        self.manager
            .apply(&self.layout, &mut self.cells, &self.config.tuning);

        self.refresh_mask_weights();

        let cfg = &self.config;
        if cfg.influences.hover && cfg.hover_effects.mode == HoverMode::Reactive {
            apply_hover_pass(
                &mut self.cells,
                &self.pointer,
                &cfg.hover_effects,
                self.runtime.weights.active(),
                self.runtime.reactive_time,
            );
        }
        if cfg.influences.ripple && cfg.ripple_effects.enabled && self.runtime.ripple_count() > 0 {
            apply_ripple_pass(
                &self.layout,
                &mut self.cells,
                self.runtime.live_ripples(&self.manager),
                &cfg.hover_effects,
                &cfg.ripple_effects,
                self.runtime.weights.active(),
                self.runtime.reactive_time,
            );
        }

        apply_breathing(
            &mut self.cells,
            &cfg.breathing,
            &cfg.hover_effects,
            &self.pointer,
            &self.runtime.weights,
            self.runtime.reactive_time,
        );

        let ease = cfg.expand_ease;
        for cell in &mut self.cells {
            cell.ease(ease);
        }
    }

    fn refresh_mask_weights(&mut self) {
        let needed = mask_weights_needed(&self.config, self.runtime.ripple_count());
        let sources = MaskSources {
            image: self.masks.image_mask(),
            text: self.masks.text_mask(),
            morph: self.masks.morph(&self.manager),
        };
        if self.runtime.weights.should_recompute(needed, &sources) {
            self.runtime.weights.recompute(&self.cells, &sources);
        }
    }

    /// Clear with the background color, then draw the cells.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(self.background);
        render_cells(surface, &self.cells, self.layout.gap());
    }

    /// Start a ripple at `(x, y)`. Evicts the oldest ripple at the cap; no-op when disabled.
    pub fn trigger_ripple(&mut self, x: f64, y: f64) -> Option<InfluenceId> {
        let r = &self.config.ripple_effects;
        if !self.config.influences.ripple || !r.enabled {
            return None;
        }

        while self.runtime.ripple_count() >= r.max_ripples.max(1) {
            let Some(oldest) = self.runtime.pop_oldest_ripple() else {
                break;
            };
            self.manager.remove(oldest);
            tracing::debug!(id = oldest.0, "evicted oldest ripple");
        }

        let max_radius = f64::from(self.width.max(self.height)) * RIPPLE_REACH;
        let id = self.manager.add(RippleInfluence::new(
            x,
            y,
            r.speed,
            r.thickness,
            r.strength,
            max_radius,
        ));
        self.runtime.push_ripple(id);
        Some(id)
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &PixelGridConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn manager(&self) -> &InfluenceManager {
        &self.manager
    }

    pub fn mask_state(&self) -> &MaskStateMachine {
        &self.masks
    }

    /// Live ripple ids, oldest first.
    pub fn ripple_ids(&self) -> impl Iterator<Item = InfluenceId> + '_ {
        self.runtime.ripple_ids()
    }

    /// Cached active-mask weight per cell.
    pub fn active_mask_weights(&self) -> &[f64] {
        self.runtime.weights.active()
    }

    /// Accumulated tick time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.runtime.reactive_time
    }
}
