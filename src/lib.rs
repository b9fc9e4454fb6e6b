//! vibescope library - audio-reactive visualization core
//!
//! The frame pipeline is: [`signal::SampleSource`] -> [`signal::SignalSmoother`]
//! -> [`styles::StyleRenderer`] -> [`canvas::Canvas`], driven by
//! [`scheduler::FrameScheduler`] and owned by [`visualizer::Visualizer`].

pub mod audio;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod error;
pub mod orbs;
pub mod params;
pub mod raster;
pub mod recording;
pub mod rendering;
pub mod scheduler;
pub mod shuffle;
pub mod signal;
pub mod styles;
pub mod transition;
pub mod visualizer;

pub use error::{Result, VisualizerError};
pub use styles::Style;
pub use visualizer::{Visualizer, VisualizerConfig};
