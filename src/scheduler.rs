//! Per-frame driver: pull samples, condition them, dispatch the active style.

use glam::Vec2;

use crate::canvas::Canvas;
use crate::params::{BandLayout, OrbPhysics, SmoothingParams};
use crate::signal::{SampleBuffer, SampleSource, SignalSmoother};
use crate::styles::{Style, StyleRenderer};

/// Why a frame was not drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The loop is stopped
    Stopped,
    /// Audio analysis has not been set up yet
    AudioNotReady,
    /// The source had no fresh samples
    SampleUnavailable,
    /// The canvas has no area
    DimensionInvalid,
}

/// Result of one scheduler iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Drawn; carries the phase after advancing
    Rendered { phase: f32 },
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FrameOutcome::Rendered { .. })
    }
}

/// Buffers and stateful stages a frame flows through
pub struct FrameStages {
    pub buffer: SampleBuffer,
    pub smoother: SignalSmoother,
    pub renderer: StyleRenderer,
    /// Unsmoothed samples widened to f32
    raw: Vec<f32>,
}

impl FrameStages {
    pub fn new(
        bins: usize,
        smoothing: SmoothingParams,
        bands: BandLayout,
        orbs: OrbPhysics,
        seed: u64,
    ) -> Self {
        Self {
            buffer: SampleBuffer::new(bins),
            smoother: SignalSmoother::new(bins, smoothing),
            renderer: StyleRenderer::new(bands, orbs, seed),
            raw: Vec::with_capacity(bins),
        }
    }
}

/// Frame loop gate: running flag, audio readiness and the active style
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    running: bool,
    audio_ready: bool,
    active: Style,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(active: Style) -> Self {
        Self {
            running: false,
            audio_ready: false,
            active,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            tracing::info!(style = %self.active, "visualization started");
        }
        self.running = true;
    }

    /// Stop drawing; the next frame is skipped
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(frames = self.frames, "visualization stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_audio_ready(&mut self, ready: bool) {
        self.audio_ready = ready;
    }

    pub fn audio_ready(&self) -> bool {
        self.audio_ready
    }

    pub fn active(&self) -> Style {
        self.active
    }

    pub fn set_active(&mut self, style: Style) {
        tracing::debug!(from = %self.active, to = %style, "active style changed");
        self.active = style;
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one iteration of the frame loop
    ///
    /// The phase advances only when the frame is actually drawn.
    pub fn run_frame(
        &mut self,
        source: &mut dyn SampleSource,
        stages: &mut FrameStages,
        canvas: &mut dyn Canvas,
        pointer: Option<Vec2>,
    ) -> FrameOutcome {
        let outcome = self.try_frame(source, stages, canvas, pointer);
        match outcome {
            FrameOutcome::Rendered { .. } => self.frames += 1,
            FrameOutcome::Skipped(reason) => tracing::trace!(?reason, "frame skipped"),
        }
        outcome
    }

    fn try_frame(
        &mut self,
        source: &mut dyn SampleSource,
        stages: &mut FrameStages,
        canvas: &mut dyn Canvas,
        pointer: Option<Vec2>,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Skipped(SkipReason::Stopped);
        }
        if !self.audio_ready {
            return FrameOutcome::Skipped(SkipReason::AudioNotReady);
        }
        if !(canvas.width() > 0.0 && canvas.height() > 0.0) {
            return FrameOutcome::Skipped(SkipReason::DimensionInvalid);
        }

        let spec = self.active.spec();
        if !source.fill(spec.domain, &mut stages.buffer) {
            return FrameOutcome::Skipped(SkipReason::SampleUnavailable);
        }

        let samples: &[f32] = if spec.smoothed {
            stages.smoother.smooth(stages.buffer.data())
        } else {
            stages.raw.clear();
            stages
                .raw
                .extend(stages.buffer.data().iter().map(|&v| f32::from(v)));
            stages.raw.as_slice()
        };

        match stages
            .renderer
            .render(self.active, samples, canvas, pointer)
        {
            Some(_) => FrameOutcome::Rendered {
                phase: stages.renderer.phase(),
            },
            None => FrameOutcome::Skipped(SkipReason::DimensionInvalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DisplayList;
    use crate::signal::SampleDomain;
    use approx::assert_relative_eq;

    /// Constant-level source that records requested domains
    struct Constant {
        level: u8,
        ready: bool,
        requests: Vec<SampleDomain>,
    }

    impl SampleSource for Constant {
        fn fill(&mut self, domain: SampleDomain, buffer: &mut SampleBuffer) -> bool {
            self.requests.push(domain);
            if !self.ready {
                return false;
            }
            buffer.prepare(domain, 1024).fill(self.level);
            true
        }
    }

    fn setup(style: Style) -> (FrameScheduler, FrameStages, Constant) {
        let mut scheduler = FrameScheduler::new(style);
        scheduler.start();
        scheduler.set_audio_ready(true);
        let stages = FrameStages::new(
            1024,
            SmoothingParams::default(),
            BandLayout::default(),
            OrbPhysics::default(),
            1,
        );
        let source = Constant {
            level: 128,
            ready: true,
            requests: Vec::new(),
        };
        (scheduler, stages, source)
    }

    #[test]
    fn test_skip_reasons_in_order() {
        let (mut scheduler, mut stages, mut source) = setup(Style::Bars);
        let mut canvas = DisplayList::new(200.0, 100.0);

        scheduler.stop();
        assert_eq!(
            scheduler.run_frame(&mut source, &mut stages, &mut canvas, None),
            FrameOutcome::Skipped(SkipReason::Stopped)
        );
        scheduler.start();
        scheduler.set_audio_ready(false);
        assert_eq!(
            scheduler.run_frame(&mut source, &mut stages, &mut canvas, None),
            FrameOutcome::Skipped(SkipReason::AudioNotReady)
        );
        scheduler.set_audio_ready(true);
        canvas.resize(0.0, 100.0);
        assert_eq!(
            scheduler.run_frame(&mut source, &mut stages, &mut canvas, None),
            FrameOutcome::Skipped(SkipReason::DimensionInvalid)
        );
        canvas.resize(200.0, 100.0);
        source.ready = false;
        assert_eq!(
            scheduler.run_frame(&mut source, &mut stages, &mut canvas, None),
            FrameOutcome::Skipped(SkipReason::SampleUnavailable)
        );

        assert!(canvas.commands().is_empty());
        assert_eq!(stages.renderer.phase(), 0.0);
        assert_eq!(scheduler.frames(), 0);
    }

    #[test]
    fn test_requests_domain_of_active_style() {
        let (mut scheduler, mut stages, mut source) = setup(Style::Waveform);
        let mut canvas = DisplayList::new(200.0, 100.0);
        scheduler.run_frame(&mut source, &mut stages, &mut canvas, None);
        scheduler.set_active(Style::Spectrum);
        scheduler.run_frame(&mut source, &mut stages, &mut canvas, None);
        assert_eq!(
            source.requests,
            vec![SampleDomain::TimeDomain, SampleDomain::Frequency]
        );
    }

    #[test]
    fn test_rendered_frames_advance_phase() {
        let (mut scheduler, mut stages, mut source) = setup(Style::FractalTree);
        let mut canvas = DisplayList::new(200.0, 100.0);
        let mut last = 0.0;
        for _ in 0..25 {
            let FrameOutcome::Rendered { phase } =
                scheduler.run_frame(&mut source, &mut stages, &mut canvas, None)
            else {
                panic!("frame should render");
            };
            assert!(phase > last);
            last = phase;
        }
        assert_relative_eq!(last, 0.5, epsilon = 1e-5);
        assert_eq!(scheduler.frames(), 25);
    }

    #[test]
    fn test_smoothed_styles_use_smoother() {
        let (mut scheduler, mut stages, mut source) = setup(Style::DnaHelix);
        source.level = 200;
        let mut canvas = DisplayList::new(200.0, 100.0);
        scheduler.run_frame(&mut source, &mut stages, &mut canvas, None);
        // One frame in, the smoother is still near neutral
        let smoothed = stages.smoother.smoothed()[0];
        assert!(smoothed > 128.0 && smoothed < 200.0);
    }
}
