//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{AnalyserConfig, RecordingConfig, RenderConfig};
use crate::styles::Style;
use crate::visualizer::VisualizerConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "vibescope")]
#[command(about = "Audio-reactive visualizer", long_about = None)]
pub struct Args {
    /// Initial style (waveform, bars, circular, arctic, aurora, orbs, dna,
    /// particles, dna-helix, spectrum, fractal-tree)
    #[arg(long, value_name = "STYLE", default_value = "waveform")]
    pub style: String,

    /// Switch to a random style every 8 seconds
    #[arg(long)]
    pub shuffle: bool,

    /// FFT window size (power of 2); half of it is the bin count
    #[arg(long, value_name = "SIZE", default_value_t = 2048)]
    pub fft_size: usize,

    /// Analyse a WAV file instead of the default input device
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Record frames to PNG (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Seed for orb placement, sparkles and shuffle picks
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Log filter when RUST_LOG is unset (e.g. "info", "vibescope=debug")
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log: String,
}

impl Args {
    /// Build the visualizer configuration from command-line arguments
    ///
    /// Unknown style names fall back to the waveform.
    pub fn visualizer_config(&self) -> VisualizerConfig {
        VisualizerConfig {
            analyser: AnalyserConfig {
                fft_size: self.fft_size,
                ..AnalyserConfig::default()
            },
            initial_style: Style::from_id(&self.style),
            shuffle_enabled: self.shuffle,
            seed: self.seed,
            ..VisualizerConfig::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(RecordingConfig::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["vibescope"]);
        let config = args.visualizer_config();
        assert_eq!(config.initial_style, Style::Waveform);
        assert_eq!(config.analyser.fft_size, 2048);
        assert!(!config.shuffle_enabled);
        assert!(args.recording_config().is_none());
        assert_eq!(args.render_config().window_width, 1280);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "vibescope",
            "--style",
            "dna-helix",
            "--shuffle",
            "--fft-size",
            "1024",
            "--record",
            "2",
            "--seed",
            "7",
        ]);
        let config = args.visualizer_config();
        assert_eq!(config.initial_style, Style::DnaHelix);
        assert!(config.shuffle_enabled);
        assert_eq!(config.analyser.bin_count(), 512);
        assert_eq!(config.seed, 7);
        assert_eq!(args.recording_config().map(|r| r.total_frames()), Some(120));
    }

    #[test]
    fn test_unknown_style_falls_back() {
        let args = Args::parse_from(["vibescope", "--style", "lava-lamp"]);
        assert_eq!(args.visualizer_config().initial_style, Style::Waveform);
    }
}
