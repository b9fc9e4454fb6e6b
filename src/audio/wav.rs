//! WAV file playback as a sample source.

use std::path::Path;

use super::{analyse_into, Analyser};
use crate::error::{Result, VisualizerError};
use crate::params::AnalyserConfig;
use crate::signal::{SampleBuffer, SampleDomain, SampleSource};

/// Loops a decoded WAV file, advancing one frame's worth of audio per fill
pub struct WavSource {
    samples: Vec<f32>,
    sample_rate: u32,
    /// Samples consumed per rendered frame
    hop: usize,
    /// Index one past the newest sample in the analysis window
    cursor: usize,
    analyser: Analyser,
    window: Vec<f32>,
}

impl WavSource {
    /// Decode `path`, downmixing to mono
    pub fn open(path: impl AsRef<Path>, config: AnalyserConfig) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };
        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        tracing::info!(
            path = %path.display(),
            sample_rate = spec.sample_rate,
            channels,
            seconds = samples.len() as f32 / spec.sample_rate.max(1) as f32,
            "loaded WAV input"
        );
        Self::from_samples(samples, spec.sample_rate, config)
    }

    /// Wrap already-decoded mono samples
    pub fn from_samples(
        samples: Vec<f32>,
        sample_rate: u32,
        config: AnalyserConfig,
    ) -> Result<Self> {
        if sample_rate == 0 {
            return Err(VisualizerError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        let hop = ((sample_rate as f32 / config.frame_rate).round() as usize).max(1);
        let analyser = Analyser::new(config)?;
        Ok(Self {
            window: Vec::with_capacity(analyser.fft_size()),
            samples,
            sample_rate,
            hop,
            cursor: 0,
            analyser,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples advanced per fill
    pub fn hop(&self) -> usize {
        self.hop
    }
}

impl SampleSource for WavSource {
    fn fill(&mut self, domain: SampleDomain, buffer: &mut SampleBuffer) -> bool {
        if self.samples.is_empty() {
            return false;
        }
        let len = self.samples.len();
        self.cursor = (self.cursor + self.hop) % len;

        // Window ending at the cursor, wrapping around the loop point
        let size = self.analyser.fft_size();
        let start = (self.cursor + len * size.div_ceil(len) - size) % len;
        self.window.clear();
        self.window
            .extend((0..size).map(|i| self.samples[(start + i) % len]));

        analyse_into(&mut self.analyser, &self.window, domain, buffer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_has_no_samples() {
        let mut source = WavSource::from_samples(Vec::new(), 44100, AnalyserConfig::default())
            .unwrap();
        let mut buffer = SampleBuffer::new(1024);
        assert!(!source.fill(SampleDomain::Frequency, &mut buffer));
    }

    #[test]
    fn test_hop_follows_frame_rate() {
        let source = WavSource::from_samples(vec![0.0; 10], 48000, AnalyserConfig::default())
            .unwrap();
        assert_eq!(source.hop(), 800);
        assert!(WavSource::from_samples(vec![0.0], 0, AnalyserConfig::default()).is_err());
    }

    #[test]
    fn test_silence_fills_neutral_buffers() {
        let mut source = WavSource::from_samples(vec![0.0; 4096], 44100, AnalyserConfig::default())
            .unwrap();
        let mut buffer = SampleBuffer::new(0);

        assert!(source.fill(SampleDomain::TimeDomain, &mut buffer));
        assert_eq!(buffer.domain(), SampleDomain::TimeDomain);
        assert_eq!(buffer.len(), 1024);
        assert!(buffer.data().iter().all(|&b| b == 128));

        assert!(source.fill(SampleDomain::Frequency, &mut buffer));
        assert!(buffer.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_short_clip_loops() {
        // Shorter than one FFT window: the window wraps around the clip
        let mut source =
            WavSource::from_samples(vec![0.5; 100], 6000, AnalyserConfig::default()).unwrap();
        let mut buffer = SampleBuffer::new(1024);
        for _ in 0..5 {
            assert!(source.fill(SampleDomain::TimeDomain, &mut buffer));
            assert!(buffer.data().iter().all(|&b| b == 192));
        }
    }

    #[test]
    fn test_reads_int_wav() {
        let path = std::env::temp_dir().join(format!("vibescope_{}.wav", std::process::id()));
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..3000 {
            writer.write_sample(i16::MAX).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let mut source = WavSource::open(&path, AnalyserConfig::default()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(source.sample_rate(), 8000);

        let mut buffer = SampleBuffer::new(1024);
        assert!(source.fill(SampleDomain::TimeDomain, &mut buffer));
        // Left full scale, right silent: mono ~0.5
        assert!(buffer.data().iter().all(|&b| b == 191 || b == 192));
    }
}
