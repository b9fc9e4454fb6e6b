//! Per-frame signal conditioning: sample buffers, smoothing, band reduction.

mod bands;
mod smoother;

pub use bands::{mean, mean_level, BandAnalyzer, BandIntensities};
pub use smoother::SignalSmoother;

/// Which analysis a sample buffer holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDomain {
    /// Per-bin loudness, bin 0 = lowest frequency
    Frequency,
    /// Waveform amplitude centered at 128
    TimeDomain,
}

/// One frame of 8-bit magnitudes, refilled in place by a [`SampleSource`]
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    domain: SampleDomain,
    data: Vec<u8>,
}

impl SampleBuffer {
    /// Create a zeroed buffer of `len` bins
    pub fn new(len: usize) -> Self {
        Self {
            domain: SampleDomain::Frequency,
            data: vec![0; len],
        }
    }

    pub fn domain(&self) -> SampleDomain {
        self.domain
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mutable access for sources; sets the domain and resizes if needed
    pub fn prepare(&mut self, domain: SampleDomain, len: usize) -> &mut [u8] {
        self.domain = domain;
        self.data.resize(len, 0);
        &mut self.data
    }
}

/// Provider of fresh sample buffers, one call per rendered frame
pub trait SampleSource {
    /// Fill `buffer` with the latest samples of `domain`
    ///
    /// Returns `false` when no analysis is available yet; the caller
    /// skips the frame instead of drawing stale data.
    fn fill(&mut self, domain: SampleDomain, buffer: &mut SampleBuffer) -> bool;
}
