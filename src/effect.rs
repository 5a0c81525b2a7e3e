use std::time::Duration;

use crate::config::SPEED_EFFECT_FACTOR;
use crate::food::FoodKind;

/// The single food effect currently in force.
///
/// `FoodKind::Default` means no effect. Everything the effect changes is
/// derived from the kind, so starting a new effect replaces the old one
/// wholesale.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EffectState {
    active: FoodKind,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            active: FoodKind::Default,
        }
    }
}

impl EffectState {
    #[must_use]
    pub fn active(self) -> FoodKind {
        self.active
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.active != FoodKind::Default
    }

    /// Starts `kind`'s window, replacing any running effect.
    pub fn begin(&mut self, kind: FoodKind) {
        if kind == FoodKind::Default {
            return;
        }
        if self.is_active() && self.active != kind {
            log::debug!("effect {:?} replaced by {:?}", self.active, kind);
        }
        self.active = kind;
    }

    pub fn clear(&mut self) {
        self.active = FoodKind::Default;
    }

    /// Direction keys map to their opposites.
    #[must_use]
    pub fn reverse_controls(self) -> bool {
        self.active == FoodKind::Reverse
    }

    /// Segments leaving the board re-enter on the opposite edge.
    #[must_use]
    pub fn wraps(self) -> bool {
        matches!(self.active, FoodKind::Star | FoodKind::Reverse)
    }

    /// Tail cells become slime as the snake moves.
    #[must_use]
    pub fn leaves_slime(self) -> bool {
        self.active == FoodKind::Slimer
    }

    /// Returns the tick interval under this effect.
    #[must_use]
    pub fn tick_interval(self, base: Duration) -> Duration {
        match self.active {
            FoodKind::Fast => base / SPEED_EFFECT_FACTOR,
            FoodKind::Slow => base * SPEED_EFFECT_FACTOR,
            _ => base,
        }
    }
}
