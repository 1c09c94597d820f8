pub(crate) mod hover;
pub(crate) mod manager;
pub(crate) mod mask;
pub(crate) mod morph;
pub(crate) mod organic;
pub(crate) mod ripple;

use crate::foundation::core::{PointerState, Rect};

use self::{
    hover::HoverInfluence, mask::MaskInfluence, morph::MorphInfluence,
    organic::OrganicNoiseInfluence, ripple::RippleInfluence,
};

/// Rule for combining a contribution with a cell's accumulated target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    /// Keep the larger value.
    #[default]
    Max,
    /// Sum contributions.
    Add,
    /// Multiply; the first positive writer seeds an empty cell.
    Multiply,
    /// Replace the accumulated value.
    Override,
}

impl BlendMode {
    /// Combine `value` into `current`.
    pub fn combine(self, current: f64, value: f64) -> f64 {
        match self {
            Self::Max => current.max(value),
            Self::Add => current + value,
            Self::Multiply => {
                if current == 0.0 {
                    value
                } else {
                    current * value
                }
            }
            Self::Override => value,
        }
    }
}

/// Stable handle for an influence registered with an [`manager::InfluenceManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InfluenceId(pub u64);

/// Per-tick inputs shared by every influence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameCtx {
    /// Elapsed time in milliseconds.
    pub dt: f64,
    /// Pointer snapshot for this tick.
    pub pointer: PointerState,
}

impl FrameCtx {
    /// Context with a delta and the pointer outside.
    pub fn with_dt(dt: f64) -> Self {
        Self {
            dt,
            pointer: PointerState::outside(),
        }
    }
}

/// A spatial field contributing size to nearby cells.
pub trait FieldSource {
    /// Advance internal state.
    fn update(&mut self, ctx: &FrameCtx);

    /// Dead influences are dropped by the manager.
    fn is_alive(&self) -> bool;

    /// Conservative grid-space bounds; contributions outside are exactly zero.
    /// An inverted rect (`x1 < x0` or `y1 < y0`) means "no cells".
    fn bounds(&self) -> Rect;

    /// Magnitude at a grid point, capped by `max_size`. Pure.
    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64;
}

/// Bounds that cover no cells.
pub(crate) fn empty_bounds() -> Rect {
    Rect::new(0.0, 0.0, -1.0, -1.0)
}

/// Square bounds around a center, empty for negative or non-finite extents.
pub(crate) fn centered_bounds(cx: f64, cy: f64, half_w: f64, half_h: f64) -> Rect {
    let ok = [cx, cy, half_w, half_h].iter().all(|v| v.is_finite()) && half_w >= 0.0 && half_h >= 0.0;
    if !ok {
        return empty_bounds();
    }
    Rect::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
}

/// Closed set of influence variants.
#[derive(Clone, Debug)]
pub enum Influence {
    /// Pointer hover field.
    Hover(HoverInfluence),
    /// Expanding click ring.
    Ripple(RippleInfluence),
    /// Time-varying noise blob.
    Organic(OrganicNoiseInfluence),
    /// Static image or text mask.
    Mask(MaskInfluence),
    /// Transient blend between two masks.
    Morph(MorphInfluence),
}

impl Influence {
    /// Composition order key; higher is composited later.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Hover(i) => i.priority,
            Self::Ripple(i) => i.priority,
            Self::Organic(i) => i.priority,
            Self::Mask(i) => i.priority,
            Self::Morph(i) => i.priority,
        }
    }

    /// Blend rule applied to this influence's contributions.
    pub fn blend_mode(&self) -> BlendMode {
        match self {
            Self::Hover(i) => i.blend,
            Self::Ripple(i) => i.blend,
            Self::Organic(i) => i.blend,
            Self::Mask(i) => i.blend,
            Self::Morph(i) => i.blend,
        }
    }

    fn source(&self) -> &dyn FieldSource {
        match self {
            Self::Hover(i) => i,
            Self::Ripple(i) => i,
            Self::Organic(i) => i,
            Self::Mask(i) => i,
            Self::Morph(i) => i,
        }
    }

    fn source_mut(&mut self) -> &mut dyn FieldSource {
        match self {
            Self::Hover(i) => i,
            Self::Ripple(i) => i,
            Self::Organic(i) => i,
            Self::Mask(i) => i,
            Self::Morph(i) => i,
        }
    }

    /// Ripple payload, if this is a ripple.
    pub fn as_ripple(&self) -> Option<&RippleInfluence> {
        match self {
            Self::Ripple(r) => Some(r),
            _ => None,
        }
    }

    /// Morph payload, if this is a morph.
    pub fn as_morph(&self) -> Option<&MorphInfluence> {
        match self {
            Self::Morph(m) => Some(m),
            _ => None,
        }
    }
}

impl FieldSource for Influence {
    fn update(&mut self, ctx: &FrameCtx) {
        self.source_mut().update(ctx);
    }

    fn is_alive(&self) -> bool {
        self.source().is_alive()
    }

    fn bounds(&self) -> Rect {
        self.source().bounds()
    }

    fn influence_at(&self, x: f64, y: f64, max_size: f64) -> f64 {
        self.source().influence_at(x, y, max_size)
    }
}

impl From<HoverInfluence> for Influence {
    fn from(v: HoverInfluence) -> Self {
        Self::Hover(v)
    }
}

impl From<RippleInfluence> for Influence {
    fn from(v: RippleInfluence) -> Self {
        Self::Ripple(v)
    }
}

impl From<OrganicNoiseInfluence> for Influence {
    fn from(v: OrganicNoiseInfluence) -> Self {
        Self::Organic(v)
    }
}

impl From<MaskInfluence> for Influence {
    fn from(v: MaskInfluence) -> Self {
        Self::Mask(v)
    }
}

impl From<MorphInfluence> for Influence {
    fn from(v: MorphInfluence) -> Self {
        Self::Morph(v)
    }
}
