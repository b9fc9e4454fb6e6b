//! Style transition and auto-shuffle timing.

use std::time::Duration;

/// Cross-fade timing
#[derive(Debug, Clone)]
pub struct TransitionParams {
    /// Opacity change per tick
    pub step: f32,

    /// Wall-clock length of one tick
    pub tick: Duration,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            step: 0.05,
            tick: Duration::from_millis(20),
        }
    }
}

impl TransitionParams {
    /// Ticks needed for one fade direction
    pub fn ticks_per_fade(&self) -> u32 {
        (1.0 / self.step).ceil() as u32
    }

    /// Full fade-out plus fade-in duration
    pub fn round_trip(&self) -> Duration {
        self.tick * (self.ticks_per_fade() * 2)
    }
}

/// Auto-shuffle timing
#[derive(Debug, Clone)]
pub struct ShuffleParams {
    /// Interval between shuffle attempts
    pub interval: Duration,
}

impl Default for ShuffleParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let params = TransitionParams::default();
        assert_eq!(params.ticks_per_fade(), 20);
        assert_eq!(params.round_trip(), Duration::from_millis(800));
    }
}
