use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Color,
    error::{GridError, GridResult},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Complete effect configuration.
///
/// Every nested group is optional in JSON and falls back to its documented defaults.
/// Numeric ranges beyond the structural checks in [`PixelGridConfig::validate`] are the
/// caller's responsibility; the runtime degrades gracefully on out-of-range values.
pub struct PixelGridConfig {
    /// Base palette; each cell picks one color deterministically from `seed`.
    pub colors: Vec<Color>,
    /// Cell pitch in surface pixels.
    pub gap: f64,
    /// Exponential smoothing factor applied to `size` every tick.
    #[serde(default = "default_expand_ease")]
    pub expand_ease: f64,
    /// `max_size = gap * max_size_factor`.
    #[serde(default = "default_one")]
    pub max_size_factor: f64,
    /// Seed for per-cell color choice and breath phase.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Clear color for the draw surface; `None` clears to transparent.
    #[serde(default)]
    pub canvas_background: Option<Color>,
    /// Which static mask is shown first.
    #[serde(default)]
    pub initial_mask: InitialMask,
    /// Which base influences are installed.
    #[serde(default)]
    pub influences: InfluenceToggles,
    /// Hover behavior.
    #[serde(default)]
    pub hover_effects: HoverEffects,
    /// Click ripple behavior.
    #[serde(default)]
    pub ripple_effects: RippleEffects,
    /// Opacity breathing.
    #[serde(default)]
    pub breathing: Breathing,
    /// Automatic image/text cycling.
    #[serde(default)]
    pub auto_morph: AutoMorph,
    /// Organic noise field parameters.
    #[serde(default)]
    pub organic: Organic,
    /// Image mask placement and generation options.
    #[serde(default)]
    pub image_mask: Option<ImageMaskConfig>,
    /// Text mask placement and generation options.
    #[serde(default)]
    pub text_mask: Option<TextMaskConfig>,
    /// Composition tuning.
    #[serde(default)]
    pub tuning: RuntimeTuning,
}

fn default_expand_ease() -> f64 {
    0.1
}

fn default_one() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    1
}

impl PixelGridConfig {
    /// Minimal config with a palette and gap; everything else defaulted.
    pub fn new(colors: Vec<Color>, gap: f64) -> Self {
        Self {
            colors,
            gap,
            expand_ease: default_expand_ease(),
            max_size_factor: default_one(),
            seed: default_seed(),
            canvas_background: None,
            initial_mask: InitialMask::default(),
            influences: InfluenceToggles::default(),
            hover_effects: HoverEffects::default(),
            ripple_effects: RippleEffects::default(),
            breathing: Breathing::default(),
            auto_morph: AutoMorph::default(),
            organic: Organic::default(),
            image_mask: None,
            text_mask: None,
            tuning: RuntimeTuning::default(),
        }
    }

    /// Parse from JSON text.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        Ok(cfg)
    }

    /// Structural validation; does not clamp.
    pub fn validate(&self) -> GridResult<()> {
        if self.colors.is_empty() {
            return Err(GridError::validation("colors must contain at least one entry"));
        }
        if !self.gap.is_finite() || self.gap <= 0.0 {
            return Err(GridError::validation("gap must be finite and > 0"));
        }
        if !self.expand_ease.is_finite() || self.expand_ease <= 0.0 || self.expand_ease > 1.0 {
            return Err(GridError::validation("expand_ease must be in (0, 1]"));
        }
        if !self.max_size_factor.is_finite() || self.max_size_factor <= 0.0 {
            return Err(GridError::validation("max_size_factor must be finite and > 0"));
        }

        let h = &self.hover_effects;
        for (name, v) in [
            ("hover_effects.radius", h.radius),
            ("hover_effects.strength", h.strength),
            ("hover_effects.deactivate", h.deactivate),
            ("hover_effects.displace", h.displace),
            ("hover_effects.jitter", h.jitter),
        ] {
            ensure_finite(name, v)?;
        }
        if let Some(ry) = h.radius_y {
            ensure_finite("hover_effects.radius_y", ry)?;
        }

        let r = &self.ripple_effects;
        for (name, v) in [
            ("ripple_effects.speed", r.speed),
            ("ripple_effects.thickness", r.thickness),
            ("ripple_effects.strength", r.strength),
        ] {
            ensure_finite(name, v)?;
        }
        if r.max_ripples == 0 {
            return Err(GridError::validation("ripple_effects.max_ripples must be >= 1"));
        }

        let b = &self.breathing;
        ensure_finite("breathing.min_opacity", b.min_opacity)?;
        ensure_finite("breathing.max_opacity", b.max_opacity)?;
        if b.min_opacity > b.max_opacity {
            return Err(GridError::validation(
                "breathing.min_opacity must be <= breathing.max_opacity",
            ));
        }

        let m = &self.auto_morph;
        if !m.morph_duration_ms.is_finite() || m.morph_duration_ms < 0.0 {
            return Err(GridError::validation(
                "auto_morph.morph_duration_ms must be finite and >= 0",
            ));
        }

        let t = &self.tuning;
        if !t.compression_strength.is_finite() || t.compression_strength <= 0.0 {
            return Err(GridError::validation(
                "tuning.compression_strength must be finite and > 0",
            ));
        }

        Ok(())
    }
}

fn ensure_finite(name: &str, v: f64) -> GridResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(GridError::validation(format!("{name} must be finite")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Initial static mask selection.
pub enum InitialMask {
    /// Start on the image mask (falls back to text if absent).
    #[default]
    Image,
    /// Start on the text mask (falls back to image if absent).
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Switches for the base influences installed at construction.
pub struct InfluenceToggles {
    /// Hover (classic influence or reactive pass).
    pub hover: bool,
    /// Click ripples.
    pub ripple: bool,
    /// Organic noise field.
    pub organic: bool,
}

impl Default for InfluenceToggles {
    fn default() -> Self {
        Self {
            hover: true,
            ripple: true,
            organic: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How the pointer interacts with the grid.
pub enum HoverMode {
    /// Hover feeds size composition as a regular influence.
    #[default]
    Classic,
    /// Hover deactivates, displaces and tints cells after composition.
    Reactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Falloff shape around the pointer.
pub enum HoverShape {
    /// Normalized Euclidean distance.
    #[default]
    Circle,
    /// Max of per-axis normalized distance.
    Vignette,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Eligibility policy for reactive effects.
pub enum InteractionScope {
    /// Every cell.
    All,
    /// Cells whose composed target size is above a small epsilon.
    ActiveOnly,
    /// Cells covered by the active mask.
    #[default]
    ImageMask,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Hover parameters shared by the classic influence and the reactive pass.
pub struct HoverEffects {
    /// Interaction style.
    pub mode: HoverMode,
    /// Horizontal radius.
    pub radius: f64,
    /// Vertical radius; defaults to `radius`.
    pub radius_y: Option<f64>,
    /// Falloff shape.
    pub shape: HoverShape,
    /// Strength multiplier.
    pub strength: f64,
    /// Reactive eligibility policy.
    pub interaction_scope: InteractionScope,
    /// Reactive size reduction factor.
    pub deactivate: f64,
    /// Reactive push distance in pixels.
    pub displace: f64,
    /// Reactive jitter amplitude in pixels.
    pub jitter: f64,
    /// Reactive tint palette, indexed by interaction strength.
    pub tint_palette: Vec<Color>,
}

impl Default for HoverEffects {
    fn default() -> Self {
        Self {
            mode: HoverMode::Classic,
            radius: 120.0,
            radius_y: None,
            shape: HoverShape::Circle,
            strength: 1.0,
            interaction_scope: InteractionScope::ImageMask,
            deactivate: 0.8,
            displace: 3.0,
            jitter: 1.25,
            tint_palette: Vec::new(),
        }
    }
}

impl HoverEffects {
    /// Effective vertical radius.
    pub fn radius_y(&self) -> f64 {
        self.radius_y.unwrap_or(self.radius)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Click ripple parameters.
pub struct RippleEffects {
    /// Master switch for ripple creation and the reactive ripple pass.
    pub enabled: bool,
    /// Ring growth in pixels per millisecond.
    pub speed: f64,
    /// Half-width of the traveling ring.
    pub thickness: f64,
    /// Size contribution multiplier.
    pub strength: f64,
    /// Live ripple cap; the oldest is evicted beyond it.
    pub max_ripples: usize,
    /// Scales hover's `deactivate` for ripple interaction.
    pub deactivate_multiplier: f64,
    /// Scales hover's `displace` for ripple interaction.
    pub displace_multiplier: f64,
    /// Scales hover's `jitter` for ripple interaction.
    pub jitter_multiplier: f64,
    /// Ripple tint palette; falls back to hover's when empty.
    pub tint_palette: Vec<Color>,
}

impl Default for RippleEffects {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.5,
            thickness: 50.0,
            strength: 30.0,
            max_ripples: 20,
            deactivate_multiplier: 1.0,
            displace_multiplier: 1.0,
            jitter_multiplier: 1.0,
            tint_palette: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Opacity breathing parameters.
pub struct Breathing {
    /// Master switch.
    pub enabled: bool,
    /// Oscillation speed.
    pub speed: f64,
    /// Hover weight radius; defaults to hover's.
    pub radius: Option<f64>,
    /// Hover weight vertical radius; defaults to `radius`, then hover's.
    pub radius_y: Option<f64>,
    /// Hover weight shape; defaults to hover's.
    pub shape: Option<HoverShape>,
    /// Mix strength toward the breath opacity.
    pub strength: f64,
    /// Lowest breath opacity.
    pub min_opacity: f64,
    /// Highest breath opacity.
    pub max_opacity: f64,
    /// Breathe cells near the pointer.
    pub affect_hover: bool,
    /// Breathe cells covered by the image mask.
    pub affect_image: bool,
    /// Breathe cells covered by the text mask or morph.
    pub affect_text: bool,
}

impl Default for Breathing {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 1.0,
            radius: None,
            radius_y: None,
            shape: None,
            strength: 0.9,
            min_opacity: 0.55,
            max_opacity: 1.0,
            affect_hover: true,
            affect_image: true,
            affect_text: true,
        }
    }
}

impl Breathing {
    /// Radii and shape resolved against the hover group.
    pub fn hover_params(&self, hover: &HoverEffects) -> (f64, f64, HoverShape) {
        let rx = self.radius.unwrap_or(hover.radius);
        let ry = self
            .radius_y
            .or(self.radius)
            .unwrap_or_else(|| hover.radius_y());
        (rx, ry, self.shape.unwrap_or(hover.shape))
    }

    /// Whether any mask-derived weight feeds breathing.
    pub fn needs_mask_weights(&self) -> bool {
        self.enabled && (self.affect_image || self.affect_text)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Automatic image/text morph cycling.
pub struct AutoMorph {
    /// Master switch; also requires both masks.
    pub enabled: bool,
    /// Hold on the image; defaults to `interval_ms` when set, else 2500.
    pub hold_image_ms: Option<f64>,
    /// Hold on the text; defaults to `interval_ms` when set, else 2500.
    pub hold_text_ms: Option<f64>,
    /// Morph duration.
    pub morph_duration_ms: f64,
    /// Extra wait added to both holds.
    pub interval_ms: Option<f64>,
}

impl Default for AutoMorph {
    fn default() -> Self {
        Self {
            enabled: false,
            hold_image_ms: None,
            hold_text_ms: None,
            morph_duration_ms: 1200.0,
            interval_ms: None,
        }
    }
}

impl AutoMorph {
    const DEFAULT_HOLD_MS: f64 = 2500.0;

    /// Total wait in the `image` state before morphing to text.
    pub fn image_wait_ms(&self) -> f64 {
        let hold = self
            .hold_image_ms
            .or(self.interval_ms)
            .unwrap_or(Self::DEFAULT_HOLD_MS);
        hold + self.interval_ms.unwrap_or(0.0)
    }

    /// Total wait in the `text` state before morphing to image.
    pub fn text_wait_ms(&self) -> f64 {
        let hold = self
            .hold_text_ms
            .or(self.interval_ms)
            .unwrap_or(Self::DEFAULT_HOLD_MS);
        hold + self.interval_ms.unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Organic noise field, centered on the surface.
pub struct Organic {
    /// Field radius.
    pub radius: f64,
    /// Size contribution multiplier.
    pub strength: f64,
    /// Time scale applied to the tick delta.
    pub speed: f64,
}

impl Default for Organic {
    fn default() -> Self {
        Self {
            radius: 150.0,
            strength: 0.4,
            speed: 0.002,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How image pixels map to mask weight.
pub enum SampleMode {
    /// Alpha channel.
    Alpha,
    /// Rec. 601 luma.
    Luminance,
    /// Luma above `threshold` is 1, else 0.
    Threshold,
    /// `1 - luma`.
    #[default]
    Invert,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Image mask generation options.
pub struct ImageMaskOptions {
    /// Raster scale relative to the source image.
    pub scale: f64,
    /// Pixel-to-weight mapping.
    pub sample_mode: SampleMode,
    /// Cut-off used by [`SampleMode::Threshold`].
    pub threshold: f64,
    /// Box blur radius in mask pixels.
    pub blur_radius: u32,
    /// Add deterministic ±0.025 noise before clamping.
    pub dithering: bool,
}

impl Default for ImageMaskOptions {
    fn default() -> Self {
        Self {
            scale: 3.0,
            sample_mode: SampleMode::Invert,
            threshold: 0.5,
            blur_radius: 0,
            dithering: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Image mask placement.
pub struct ImageMaskConfig {
    /// Source path, used by hosts that load masks from disk.
    pub src: Option<String>,
    /// Mask center; defaults to the surface center.
    pub center_x: Option<f64>,
    /// Mask center; defaults to the surface center.
    pub center_y: Option<f64>,
    /// Size contribution multiplier.
    pub strength: f64,
    /// Generation options.
    pub options: ImageMaskOptions,
}

impl Default for ImageMaskConfig {
    fn default() -> Self {
        Self {
            src: None,
            center_x: None,
            center_y: None,
            strength: 1.5,
            options: ImageMaskOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Text mask placement. The raster itself comes from a pre-rendered text image.
pub struct TextMaskConfig {
    /// Path to a rendered text image (alpha channel is used).
    pub src: Option<String>,
    /// Mask center; defaults to the surface center.
    pub center_x: Option<f64>,
    /// Mask center; defaults to the surface center.
    pub center_y: Option<f64>,
    /// Size contribution multiplier.
    pub strength: f64,
    /// Box blur radius in mask pixels.
    pub blur_radius: u32,
}

impl Default for TextMaskConfig {
    fn default() -> Self {
        Self {
            src: None,
            center_x: None,
            center_y: None,
            strength: 0.9,
            blur_radius: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Post-composition shaping of the size field.
pub struct RuntimeTuning {
    /// `k` in `max * (1 - exp(-k * t / max))`.
    pub compression_strength: f64,
    /// Box-average target sizes after compression.
    pub enable_smoothing: bool,
    /// Half-width of the smoothing window, in cells.
    pub smoothing_radius: usize,
}

impl Default for RuntimeTuning {
    fn default() -> Self {
        Self {
            compression_strength: 2.5,
            enable_smoothing: true,
            smoothing_radius: 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
