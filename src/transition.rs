//! Fade-out / swap / fade-in state machine for style switches.

use std::time::Duration;

use crate::params::TransitionParams;
use crate::styles::Style;

/// Where a transition currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    /// Fading toward black; `target` becomes active at zero opacity
    FadingOut { target: Style },
    FadingIn,
}

/// Notable step of a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    /// Opacity reached zero and the pending style should become active
    Swapped(Style),
    /// Opacity is back at one
    Finished,
}

/// Serializes style switches: at most one transition in flight
///
/// Opacity is tracked as a whole number of steps so a fade always takes
/// exactly [`TransitionParams::ticks_per_fade`] ticks.
pub struct TransitionController {
    params: TransitionParams,
    state: TransitionState,
    level: u32,
    accumulated: Duration,
}

impl TransitionController {
    pub fn new(params: TransitionParams) -> Self {
        let level = params.ticks_per_fade();
        Self {
            params,
            state: TransitionState::Idle,
            level,
            accumulated: Duration::ZERO,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// Style waiting for the fade-out to finish
    pub fn pending(&self) -> Option<Style> {
        match self.state {
            TransitionState::FadingOut { target } => Some(target),
            _ => None,
        }
    }

    /// Current presentation opacity in [0, 1]
    pub fn opacity(&self) -> f32 {
        (self.level as f32 / self.params.ticks_per_fade() as f32).clamp(0.0, 1.0)
    }

    /// Start a transition to `style`
    ///
    /// Returns `false` without side effects while another transition runs.
    pub fn request(&mut self, style: Style) -> bool {
        if !self.is_idle() {
            tracing::debug!(requested = %style, "transition in progress, request rejected");
            return false;
        }
        tracing::debug!(style = %style, "transition started");
        self.state = TransitionState::FadingOut { target: style };
        self.accumulated = Duration::ZERO;
        true
    }

    /// Advance one tick
    pub fn tick(&mut self) -> Option<TransitionEvent> {
        match self.state {
            TransitionState::Idle => None,
            TransitionState::FadingOut { target } => {
                self.level = self.level.saturating_sub(1);
                if self.level > 0 {
                    return None;
                }
                self.state = TransitionState::FadingIn;
                Some(TransitionEvent::Swapped(target))
            }
            TransitionState::FadingIn => {
                self.level += 1;
                if self.level < self.params.ticks_per_fade() {
                    return None;
                }
                self.state = TransitionState::Idle;
                tracing::debug!("transition finished");
                Some(TransitionEvent::Finished)
            }
        }
    }

    /// Convert elapsed wall-clock time into whole ticks
    ///
    /// Returns the style swapped in during this interval, if any.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Style> {
        if self.is_idle() {
            self.accumulated = Duration::ZERO;
            return None;
        }
        self.accumulated += elapsed;
        let mut swapped = None;
        while self.accumulated >= self.params.tick && !self.is_idle() {
            self.accumulated -= self.params.tick;
            if let Some(TransitionEvent::Swapped(style)) = self.tick() {
                swapped = Some(style);
            }
        }
        swapped
    }
}
