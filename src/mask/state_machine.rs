use crate::{
    config::model::{AutoMorph, InitialMask},
    influence::{
        FieldSource, InfluenceId,
        manager::InfluenceManager,
        mask::{MaskInfluence, MaskKind},
        morph::MorphInfluence,
    },
};

/// Which static masks an effect was built with.
#[derive(Clone, Debug, Default)]
pub enum MaskSet {
    #[default]
    None,
    Image(MaskInfluence),
    Text(MaskInfluence),
    Both {
        image: MaskInfluence,
        text: MaskInfluence,
    },
}

impl MaskSet {
    pub fn from_parts(image: Option<MaskInfluence>, text: Option<MaskInfluence>) -> Self {
        match (image, text) {
            (None, None) => Self::None,
            (Some(image), None) => Self::Image(image),
            (None, Some(text)) => Self::Text(text),
            (Some(image), Some(text)) => Self::Both { image, text },
        }
    }

    pub fn image(&self) -> Option<&MaskInfluence> {
        match self {
            Self::Image(m) | Self::Both { image: m, .. } => Some(m),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&MaskInfluence> {
        match self {
            Self::Text(m) | Self::Both { text: m, .. } => Some(m),
            _ => None,
        }
    }

    /// Image mask unless it failed.
    pub fn usable_image(&self) -> Option<&MaskInfluence> {
        self.image().filter(|m| !m.is_failed())
    }

    /// Text mask unless it failed.
    pub fn usable_text(&self) -> Option<&MaskInfluence> {
        self.text().filter(|m| !m.is_failed())
    }
}

/// Position in the image/text cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphPhase {
    /// Image mask registered.
    Image,
    /// Morph toward text registered.
    ToText,
    /// Text mask registered.
    Text,
    /// Morph toward image registered.
    ToImage,
}

/// Drives automatic image/text cycling through the influence manager.
///
/// At most one of {static mask, morph} is registered at any time. Transitions swap them
/// within a single `update` call.
#[derive(Debug)]
pub struct MaskStateMachine {
    masks: MaskSet,
    auto: AutoMorph,
    phase: MorphPhase,
    timer_ms: f64,
    static_id: Option<InfluenceId>,
    morph_id: Option<InfluenceId>,
}

impl MaskStateMachine {
    /// Register the initial static mask and return the machine.
    ///
    /// Falls back to whichever mask exists when the preferred one is absent or failed.
    pub fn new(
        manager: &mut InfluenceManager,
        masks: MaskSet,
        initial: InitialMask,
        auto: AutoMorph,
    ) -> Self {
        let first = match initial {
            InitialMask::Image => masks.usable_image().or_else(|| masks.usable_text()),
            InitialMask::Text => masks.usable_text().or_else(|| masks.usable_image()),
        };
        let phase = match first.map(MaskInfluence::kind) {
            Some(MaskKind::Text) => MorphPhase::Text,
            _ => MorphPhase::Image,
        };
        let static_id = first.cloned().map(|m| manager.add(m));

        Self {
            masks,
            auto,
            phase,
            timer_ms: 0.0,
            static_id,
            morph_id: None,
        }
    }

    /// Cycling runs only with auto-morph on and both masks present and not failed.
    pub fn is_enabled(&self) -> bool {
        self.auto.enabled
            && self.masks.usable_image().is_some()
            && self.masks.usable_text().is_some()
    }

    pub fn phase(&self) -> MorphPhase {
        self.phase
    }

    pub fn image_mask(&self) -> Option<&MaskInfluence> {
        self.masks.image()
    }

    pub fn text_mask(&self) -> Option<&MaskInfluence> {
        self.masks.text()
    }

    pub fn morph_id(&self) -> Option<InfluenceId> {
        self.morph_id
    }

    /// Live morph, if one is registered.
    pub fn morph<'a>(&self, manager: &'a InfluenceManager) -> Option<&'a MorphInfluence> {
        manager.get(self.morph_id?)?.as_morph()
    }

    /// Advance the cycle. Call after the manager has updated and culled.
    pub fn update(&mut self, manager: &mut InfluenceManager, dt: f64) {
        self.fall_back_from_failed(manager);
        if !self.is_enabled() {
            return;
        }

        if let Some(id) = self.morph_id {
            let finished = manager.get(id).is_none_or(|m| !m.is_alive());
            if finished {
                manager.remove(id);
                self.morph_id = None;
                let dest = match self.phase {
                    MorphPhase::ToText => MorphPhase::Text,
                    MorphPhase::ToImage => MorphPhase::Image,
                    settled => settled,
                };
                self.settle(manager, dest);
                tracing::debug!(phase = ?dest, "mask morph finished");
            }
            return;
        }

        if dt.is_finite() && dt > 0.0 {
            self.timer_ms += dt;
        }
        match self.phase {
            MorphPhase::Image if self.timer_ms >= self.auto.image_wait_ms() => {
                let carry = self.timer_ms - self.auto.image_wait_ms();
                self.start_morph(manager, MorphPhase::ToText, carry);
            }
            MorphPhase::Text if self.timer_ms >= self.auto.text_wait_ms() => {
                let carry = self.timer_ms - self.auto.text_wait_ms();
                self.start_morph(manager, MorphPhase::ToImage, carry);
            }
            _ => {}
        }
    }

    fn start_morph(&mut self, manager: &mut InfluenceManager, next: MorphPhase, carry_ms: f64) {
        let MaskSet::Both { image, text } = &self.masks else {
            return;
        };
        let (from, to, dest) = match next {
            MorphPhase::ToText => (image, text, MorphPhase::Text),
            _ => (text, image, MorphPhase::Image),
        };
        let morph = MorphInfluence::with_elapsed(
            from.clone(),
            to.clone(),
            self.auto.morph_duration_ms,
            carry_ms,
        );

        if let Some(id) = self.static_id.take() {
            manager.remove(id);
        }
        if !morph.is_alive() {
            // Overshot the whole morph within one tick.
            self.settle(manager, dest);
            tracing::debug!(phase = ?dest, carry_ms, "mask morph skipped");
            return;
        }

        self.morph_id = Some(manager.add(morph));
        self.phase = next;
        self.timer_ms = 0.0;
        tracing::debug!(phase = ?next, carry_ms, "mask morph started");
    }

    fn settle(&mut self, manager: &mut InfluenceManager, dest: MorphPhase) {
        let mask = match dest {
            MorphPhase::Text => self.masks.text(),
            _ => self.masks.image(),
        };
        if let Some(id) = self.static_id.take() {
            manager.remove(id);
        }
        self.static_id = mask.cloned().map(|m| manager.add(m));
        self.phase = dest;
        self.timer_ms = 0.0;
    }

    /// Move onto the surviving mask once the one on screen, or a morph endpoint, has failed.
    fn fall_back_from_failed(&mut self, manager: &mut InfluenceManager) {
        let image_ok = self.masks.usable_image().is_some();
        let text_ok = self.masks.usable_text().is_some();
        let shown_ok = match self.phase {
            MorphPhase::Image => image_ok,
            MorphPhase::Text => text_ok,
            MorphPhase::ToText | MorphPhase::ToImage => image_ok && text_ok,
        };
        if shown_ok {
            return;
        }

        if let Some(id) = self.morph_id.take() {
            manager.remove(id);
        }
        let dest = match (image_ok, text_ok) {
            (true, _) => MorphPhase::Image,
            (false, true) => MorphPhase::Text,
            (false, false) => {
                if let Some(id) = self.static_id.take() {
                    manager.remove(id);
                }
                return;
            }
        };
        self.settle(manager, dest);
        tracing::debug!(phase = ?dest, "mask failed, showing the other one");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/state_machine.rs"]
mod tests;
