//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here with:
//! - Units (pixels, frames, decibels, milliseconds)
//! - Documented ranges and meanings
//! - Defaults matching the reference look

mod audio;
mod orbs;
mod render;
mod signal;
mod transition;

// Re-export all types
pub use audio::AnalyserConfig;
pub use orbs::OrbPhysics;
pub use render::{RecordingConfig, RenderConfig};
pub use signal::{BandLayout, SmoothingParams};
pub use transition::{ShuffleParams, TransitionParams};
