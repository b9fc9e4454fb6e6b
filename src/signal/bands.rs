//! Bass/mid/treble reduction of a sample array.

use std::ops::Range;

use crate::params::BandLayout;

/// Normalized band loudness, each in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandIntensities {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

/// Fixed-partition band analyzer (stateless)
#[derive(Debug, Clone, Default)]
pub struct BandAnalyzer {
    layout: BandLayout,
}

impl BandAnalyzer {
    pub fn new(layout: BandLayout) -> Self {
        Self { layout }
    }

    /// Bin ranges for (bass, mid, treble), clamped to `len`
    ///
    /// The ranges are contiguous and together cover `0..len`.
    pub fn partition(&self, len: usize) -> (Range<usize>, Range<usize>, Range<usize>) {
        let bass_end = self.layout.bass_end.min(len);
        let mid_end = self.layout.mid_end.max(bass_end).min(len);
        (0..bass_end, bass_end..mid_end, mid_end..len)
    }

    /// Reduce one frame of samples (0-255 scale) to band intensities
    pub fn analyze(&self, samples: &[f32]) -> BandIntensities {
        let (bass, mid, treble) = self.partition(samples.len());
        BandIntensities {
            bass: mean(&samples[bass]) / 255.0,
            mid: mean(&samples[mid]) / 255.0,
            treble: mean(&samples[treble]) / 255.0,
        }
    }
}

/// Mean of a slice, 0 when empty
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Whole-buffer average normalized to [0, 1]
pub fn mean_level(samples: &[f32]) -> f32 {
    mean(samples) / 255.0
}
