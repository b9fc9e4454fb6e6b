//! Audio analysis configuration.

/// Spectrum analyser configuration (mirrors a browser analyser node)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2)
    /// Produces `fft_size / 2` bins per sample buffer
    pub fft_size: usize,

    /// Temporal smoothing of bin magnitudes between analyses, in [0, 1)
    pub smoothing_time_constant: f32,

    /// Magnitude mapped to byte 0 (decibels)
    pub min_db: f32,

    /// Magnitude mapped to byte 255 (decibels)
    pub max_db: f32,

    /// Render frames per second assumed when stepping through file input
    pub frame_rate: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing_time_constant: 0.85,
            min_db: -100.0,
            max_db: -30.0,
            frame_rate: 60.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of bins in each sample buffer
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(format!(
                "FFT size must be a power of 2 and at least 32, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "smoothing time constant must be in [0, 1), got {}",
                self.smoothing_time_constant
            ));
        }
        if self.min_db >= self.max_db {
            return Err(format!(
                "min_db ({}) must be below max_db ({})",
                self.min_db, self.max_db
            ));
        }
        if self.frame_rate <= 0.0 {
            return Err("frame rate must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalyserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 1024);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = AnalyserConfig {
            fft_size: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyserConfig {
            smoothing_time_constant: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyserConfig {
            min_db: -20.0,
            max_db: -30.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
