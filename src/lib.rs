//! Pixelgrid drives a dense lattice of animated cells from composed influence fields.
//!
//! Hover, click ripples, organic noise and image/text masks each contribute a size field.
//! Every tick the fields are blended per cell, saturated, optionally smoothed, then shaped by
//! reactive hover/ripple effects and opacity breathing before cells ease toward their target.
//!
//! - Build a [`PixelGridConfig`] (or parse one from JSON)
//! - Create a [`PixelGridEffect`] with optional [`MaskInputs`]
//! - Feed [`PointerState`] snapshots, call [`PixelGridEffect::update`] and render into a
//!   [`Surface`] such as [`CpuSurface`]
#![forbid(unsafe_code)]

mod effect;

pub(crate) mod config;
pub(crate) mod foundation;
pub(crate) mod grid;
pub(crate) mod influence;
pub(crate) mod mask;
pub(crate) mod render;

pub use crate::foundation::core::{Color, Point, PointerState, Rect};
pub use crate::foundation::error::{GridError, GridResult};

pub use crate::config::model::{
    AutoMorph, Breathing, HoverEffects, HoverMode, HoverShape, ImageMaskConfig,
    ImageMaskOptions, InfluenceToggles, InitialMask, InteractionScope, Organic, PixelGridConfig,
    RippleEffects, RuntimeTuning, SampleMode, TextMaskConfig,
};
pub use crate::effect::{MaskInputs, PixelGridEffect};
pub use crate::grid::{cell::Cell, layout::GridLayout};
pub use crate::influence::{
    BlendMode, FieldSource, FrameCtx, Influence, InfluenceId,
    hover::{HoverInfluence, hover_falloff},
    manager::InfluenceManager,
    mask::{MaskInfluence, MaskKind},
    morph::MorphInfluence,
    organic::OrganicNoiseInfluence,
    ripple::RippleInfluence,
};
pub use crate::mask::{
    handle::{MaskHandle, MaskLoader, MaskStatus, spawn_image_mask_load},
    raster::{MaskRaster, decode_image_mask, load_image_mask, load_text_mask},
    state_machine::{MaskSet, MaskStateMachine, MorphPhase},
    weight_cache::{MaskSources, MaskWeightCache},
};
pub use crate::render::{cpu::CpuSurface, surface::Surface};
