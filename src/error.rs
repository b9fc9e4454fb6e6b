//! Error types for the outer shell (audio devices, GPU, files).
//!
//! Per-frame conditions inside the core (no samples yet, zero-sized canvas,
//! rejected style switch) are not errors; see [`crate::scheduler::SkipReason`].

use thiserror::Error;

/// Fatal visualizer errors
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// No audio input device available
    #[error("no audio input device found")]
    NoInputDevice,

    /// Input device refused to report a usable configuration
    #[error("audio config error: {0}")]
    AudioConfig(#[from] cpal::DefaultStreamConfigError),

    /// Input stream could not be built
    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// Input stream could not be started or paused
    #[error("failed to control input stream: {0}")]
    PlayStream(String),

    /// Input device uses a sample format we do not decode
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Configuration value out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// WAV input could not be read
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// GPU setup or presentation failure
    #[error("GPU error: {0}")]
    Gpu(String),

    /// Frame recording failure
    #[error("recording error: {0}")]
    Recording(String),
}

impl From<cpal::PlayStreamError> for VisualizerError {
    fn from(err: cpal::PlayStreamError) -> Self {
        Self::PlayStream(err.to_string())
    }
}

impl From<cpal::PauseStreamError> for VisualizerError {
    fn from(err: cpal::PauseStreamError) -> Self {
        Self::PlayStream(err.to_string())
    }
}

/// Result type for visualizer setup operations
pub type Result<T> = std::result::Result<T, VisualizerError>;
