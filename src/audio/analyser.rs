//! Spectrum analyser producing 8-bit frequency and waveform buffers.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::{Result, VisualizerError};
use crate::params::AnalyserConfig;

/// FFT analyser with Blackman windowing, temporal smoothing and a decibel
/// to byte mapping
pub struct Analyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    /// Smoothed linear magnitude per bin
    magnitudes: Vec<f32>,
}

impl Analyser {
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate().map_err(VisualizerError::InvalidConfig)?;

        let size = config.fft_size;
        let fft = FftPlanner::new().plan_fft_forward(size);
        Ok(Self {
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            spectrum: vec![Complex::new(0.0, 0.0); size],
            magnitudes: vec![0.0; config.bin_count()],
            fft,
            config,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.config.bin_count()
    }

    /// Analyse the most recent `fft_size` samples into `out` (one byte per bin)
    ///
    /// Missing history is treated as silence.
    pub fn frequency_bytes(&mut self, input: &[f32], out: &mut [u8]) {
        let size = self.config.fft_size;
        let history = &input[input.len().saturating_sub(size)..];
        let pad = size - history.len();

        for (i, slot) in self.spectrum.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { history[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let tau = self.config.smoothing_time_constant;
        let scale = 255.0 / (self.config.max_db - self.config.min_db);
        let min_db = self.config.min_db;
        for ((magnitude, bin), byte) in self
            .magnitudes
            .iter_mut()
            .zip(&self.spectrum)
            .zip(out.iter_mut())
        {
            let current = bin.norm() / size as f32;
            *magnitude = tau * *magnitude + (1.0 - tau) * current;
            let db = 20.0 * magnitude.log10();
            *byte = (scale * (db - min_db)).floor().clamp(0.0, 255.0) as u8;
        }
    }

    /// Copy the most recent `out.len()` samples as bytes centered at 128
    pub fn time_domain_bytes(input: &[f32], out: &mut [u8]) {
        let history = &input[input.len().saturating_sub(out.len())..];
        let pad = out.len() - history.len();
        for (i, byte) in out.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { history[i - pad] };
            *byte = (128.0 * (1.0 + sample)).floor().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Blackman window (alpha 0.16)
fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
