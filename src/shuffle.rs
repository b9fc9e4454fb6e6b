//! Timed random style changes.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::ShuffleParams;
use crate::styles::Style;
use crate::transition::TransitionController;

/// Requests a random different style every interval while enabled
pub struct ShuffleTimer {
    params: ShuffleParams,
    enabled: bool,
    elapsed: Duration,
    rng: StdRng,
}

impl ShuffleTimer {
    pub fn new(params: ShuffleParams, seed: u64) -> Self {
        Self {
            params,
            enabled: false,
            elapsed: Duration::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable; the interval restarts either way
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.elapsed = Duration::ZERO;
        tracing::info!(enabled, "auto-shuffle");
    }

    /// Flip the enabled state, returning the new one
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Uniform pick among every style except `active`
    pub fn pick(&mut self, active: Style) -> Style {
        let others: Vec<Style> = Style::ALL.into_iter().filter(|&s| s != active).collect();
        others[self.rng.random_range(0..others.len())]
    }

    /// Advance the timer; on each elapsed interval request a new style
    ///
    /// Returns the style whose transition was started. A firing that lands
    /// during a transition is dropped, not queued.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        active: Style,
        transition: &mut TransitionController,
    ) -> Option<Style> {
        if !self.enabled {
            return None;
        }
        self.elapsed += elapsed;
        let mut requested = None;
        while self.elapsed >= self.params.interval {
            self.elapsed -= self.params.interval;
            if !transition.is_idle() {
                tracing::trace!("shuffle dropped during transition");
                continue;
            }
            let next = self.pick(active);
            if transition.request(next) {
                tracing::debug!(style = %next, "shuffle");
                requested = Some(next);
            }
        }
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TransitionParams;

    fn timer() -> ShuffleTimer {
        ShuffleTimer::new(ShuffleParams::default(), 99)
    }

    #[test]
    fn test_pick_never_repeats_active() {
        let mut shuffle = timer();
        for active in Style::ALL {
            for _ in 0..50 {
                assert_ne!(shuffle.pick(active), active);
            }
        }
    }

    #[test]
    fn test_pick_reaches_every_other_style() {
        let mut shuffle = timer();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(shuffle.pick(Style::Bars));
        }
        assert_eq!(seen.len(), Style::ALL.len() - 1);
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut shuffle = timer();
        let mut transition = TransitionController::new(TransitionParams::default());
        assert_eq!(
            shuffle.advance(Duration::from_secs(60), Style::Waveform, &mut transition),
            None
        );
        assert!(transition.is_idle());
    }

    #[test]
    fn test_fires_every_interval() {
        let mut shuffle = timer();
        let mut transition = TransitionController::new(TransitionParams::default());
        assert!(shuffle.toggle());

        assert_eq!(
            shuffle.advance(Duration::from_millis(7999), Style::Waveform, &mut transition),
            None
        );
        let next = shuffle.advance(Duration::from_millis(1), Style::Waveform, &mut transition);
        assert!(next.is_some_and(|s| s != Style::Waveform));
        assert_eq!(transition.pending(), next);
    }

    #[test]
    fn test_dropped_while_transitioning() {
        let mut shuffle = timer();
        let mut transition = TransitionController::new(TransitionParams::default());
        shuffle.set_enabled(true);
        transition.request(Style::Orbs);

        assert_eq!(
            shuffle.advance(Duration::from_secs(8), Style::Waveform, &mut transition),
            None
        );
        assert_eq!(transition.pending(), Some(Style::Orbs));

        // The dropped firing is not retried early
        transition.advance(Duration::from_secs(1));
        assert_eq!(
            shuffle.advance(Duration::from_secs(1), Style::Orbs, &mut transition),
            None
        );
    }
}
