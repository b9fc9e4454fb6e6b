//! The owning context for every piece of mutable visualizer state.

use std::time::Duration;

use glam::Vec2;

use crate::canvas::Canvas;
use crate::params::{
    AnalyserConfig, BandLayout, OrbPhysics, ShuffleParams, SmoothingParams, TransitionParams,
};
use crate::scheduler::{FrameOutcome, FrameScheduler, FrameStages};
use crate::shuffle::ShuffleTimer;
use crate::signal::SampleSource;
use crate::styles::{Style, StyleRenderer};
use crate::transition::TransitionController;

/// Everything needed to build a [`Visualizer`]
#[derive(Debug, Clone, Default)]
pub struct VisualizerConfig {
    pub analyser: AnalyserConfig,
    pub smoothing: SmoothingParams,
    pub bands: BandLayout,
    pub orbs: OrbPhysics,
    pub transition: TransitionParams,
    pub shuffle: ShuffleParams,
    pub initial_style: Style,
    pub shuffle_enabled: bool,
    /// Seed for orb placement, sparkles and shuffle picks
    pub seed: u64,
}

/// Audio-reactive visualizer: frame loop, style switching and timers
pub struct Visualizer {
    scheduler: FrameScheduler,
    stages: FrameStages,
    transition: TransitionController,
    shuffle: ShuffleTimer,
    pointer: Option<Vec2>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let mut shuffle = ShuffleTimer::new(config.shuffle, config.seed.wrapping_add(2));
        if config.shuffle_enabled {
            shuffle.set_enabled(true);
        }
        Self {
            scheduler: FrameScheduler::new(config.initial_style),
            stages: FrameStages::new(
                config.analyser.bin_count(),
                config.smoothing,
                config.bands,
                config.orbs,
                config.seed,
            ),
            transition: TransitionController::new(config.transition),
            shuffle,
            pointer: None,
        }
    }

    /// Begin drawing once audio is available
    pub fn start(&mut self) {
        self.scheduler.set_audio_ready(true);
        self.scheduler.start();
    }

    /// Cancel drawing; subsequent frames are skipped until [`Visualizer::start`]
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Mark the audio source as torn down or re-established
    pub fn set_audio_ready(&mut self, ready: bool) {
        self.scheduler.set_audio_ready(ready);
    }

    /// Ask for a cross-fade to `style`; `false` while one is in flight
    pub fn request_style_switch(&mut self, style: Style) -> bool {
        self.transition.request(style)
    }

    pub fn available_styles(&self) -> &'static [Style] {
        &Style::ALL
    }

    pub fn active_style(&self) -> Style {
        self.scheduler.active()
    }

    /// Style a running transition will swap in
    pub fn pending_style(&self) -> Option<Style> {
        self.transition.pending()
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Flip auto-shuffle, returning the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle.toggle()
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle.enabled()
    }

    /// Advance the transition and shuffle clocks by wall-clock time
    pub fn advance_timers(&mut self, elapsed: Duration) {
        if let Some(style) = self.transition.advance(elapsed) {
            self.scheduler.set_active(style);
        }
        let active = self.scheduler.active();
        self.shuffle.advance(elapsed, active, &mut self.transition);
    }

    /// Draw one frame of the active style
    pub fn render_frame(
        &mut self,
        source: &mut dyn SampleSource,
        canvas: &mut dyn Canvas,
    ) -> FrameOutcome {
        self.scheduler
            .run_frame(source, &mut self.stages, canvas, self.pointer)
    }

    /// Presentation opacity from the current transition
    pub fn opacity(&self) -> f32 {
        self.transition.opacity()
    }

    pub fn phase(&self) -> f32 {
        self.stages.renderer.phase()
    }

    pub fn frames(&self) -> u64 {
        self.scheduler.frames()
    }

    pub fn renderer(&self) -> &StyleRenderer {
        &self.stages.renderer
    }
}
