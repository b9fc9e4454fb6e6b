//! Signal smoothing and band partition parameters.

/// Two-stage smoothing constants
#[derive(Debug, Clone)]
pub struct SmoothingParams {
    /// Samples closer than this to the midpoint are snapped to it
    pub noise_threshold: f32,

    /// Lag filter rate per frame (fraction of the remaining distance)
    pub transition_speed: f32,

    /// Weight of the previous smoothed value in the second stage
    pub smoothing_factor: f32,

    /// Neutral value (waveform midpoint)
    pub center: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            noise_threshold: 2.0,
            transition_speed: 0.4,
            smoothing_factor: 0.6,
            center: 128.0,
        }
    }
}

/// Fixed bin partition for bass/mid/treble bands
#[derive(Debug, Clone)]
pub struct BandLayout {
    /// First bin past the bass band
    pub bass_end: usize,

    /// First bin past the mid band (treble runs to the end)
    pub mid_end: usize,
}

impl Default for BandLayout {
    fn default() -> Self {
        Self {
            bass_end: 10,
            mid_end: 100,
        }
    }
}
