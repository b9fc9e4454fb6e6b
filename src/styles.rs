//! Visual styles and the renderer that dispatches between them.
//!
//! Each style is a draw function over a [`Canvas`]; the per-style constants
//! (input domain, smoothing, clear mode, phase rate) live in [`StyleSpec`].

mod arctic;
mod aurora;
mod bars;
mod circular;
mod fractal;
mod helix;
mod spectrum;
mod waveform;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::orbs::ParticleField;
use crate::params::{BandLayout, OrbPhysics};
use crate::signal::{mean, BandAnalyzer, BandIntensities, SampleDomain};

pub use aurora::AuroraVariant;
pub use bars::{bar_height, bar_hue, bar_layout, BarLayout, BAR_COUNT};
pub use helix::HelixVariant;

/// Selectable visual style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    AuroraWaves,
    #[default]
    Waveform,
    Bars,
    Circular,
    Arctic,
    Particles,
    Spectrum,
    Dna,
    Orbs,
    DnaHelix,
    FractalTree,
}

impl Style {
    /// Every style, in menu order
    pub const ALL: [Style; 11] = [
        Style::AuroraWaves,
        Style::Waveform,
        Style::Bars,
        Style::Circular,
        Style::Arctic,
        Style::Particles,
        Style::Spectrum,
        Style::Dna,
        Style::Orbs,
        Style::DnaHelix,
        Style::FractalTree,
    ];

    /// Stable kebab-case identifier
    pub fn id(self) -> &'static str {
        match self {
            Style::AuroraWaves => "aurora-waves",
            Style::Waveform => "waveform",
            Style::Bars => "bars",
            Style::Circular => "circular",
            Style::Arctic => "arctic",
            Style::Particles => "particles",
            Style::Spectrum => "spectrum",
            Style::Dna => "dna",
            Style::Orbs => "orbs",
            Style::DnaHelix => "dna-helix",
            Style::FractalTree => "fractal-tree",
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Style::AuroraWaves => "Aurora Waves",
            Style::Waveform => "Waveform",
            Style::Bars => "Bars",
            Style::Circular => "Circular",
            Style::Arctic => "Arctic Waves",
            Style::Particles => "Particles",
            Style::Spectrum => "Circular Spectrum",
            Style::Dna => "DNA",
            Style::Orbs => "Floating Orbs",
            Style::DnaHelix => "DNA Helix",
            Style::FractalTree => "Fractal Tree",
        }
    }

    /// Position in [`Style::ALL`]
    pub fn index(self) -> usize {
        Style::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Next style in menu order, wrapping
    pub fn next(self) -> Style {
        Style::ALL[(self.index() + 1) % Style::ALL.len()]
    }

    /// Previous style in menu order, wrapping
    pub fn prev(self) -> Style {
        Style::ALL[(self.index() + Style::ALL.len() - 1) % Style::ALL.len()]
    }

    /// Resolve an identifier, falling back to [`Style::Waveform`]
    pub fn from_id(id: &str) -> Style {
        id.parse().unwrap_or_else(|err: UnknownStyle| {
            tracing::warn!("{err}, falling back to {}", Style::Waveform.id());
            Style::Waveform
        })
    }

    /// Per-style constants
    pub fn spec(self) -> StyleSpec {
        use SampleDomain::{Frequency, TimeDomain};
        let (domain, smoothed, clear, phase) = match self {
            Style::AuroraWaves => (Frequency, false, ClearMode::Opaque, PhaseRate::boosted(0.01)),
            Style::Waveform => (TimeDomain, true, ClearMode::Opaque, PhaseRate::fixed(0.05)),
            Style::Bars => (Frequency, false, ClearMode::Opaque, PhaseRate::fixed(0.03)),
            Style::Circular => (Frequency, false, ClearMode::Opaque, PhaseRate::fixed(0.025)),
            Style::Arctic => (TimeDomain, false, ClearMode::Opaque, PhaseRate::fixed(0.02)),
            Style::Particles => (Frequency, false, ClearMode::Opaque, PhaseRate::boosted(0.01)),
            Style::Spectrum => (Frequency, false, ClearMode::Opaque, PhaseRate::fixed(0.02)),
            Style::Dna => (Frequency, false, ClearMode::Trail(0.1), PhaseRate::fixed(0.05)),
            Style::Orbs => (Frequency, false, ClearMode::Opaque, PhaseRate::boosted(0.02)),
            Style::DnaHelix => (Frequency, true, ClearMode::Trail(0.1), PhaseRate::fixed(0.05)),
            Style::FractalTree => (Frequency, false, ClearMode::Opaque, PhaseRate::fixed(0.02)),
        };
        StyleSpec {
            domain,
            smoothed,
            clear,
            phase,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Identifier that names no style
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style '{0}'")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    /// Accepts kebab-case ids and their camelCase spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_', ' '], "").to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.id().replace('-', "") == normalized)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// How the canvas is cleared before a style draws
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
    /// Erase to opaque black
    Opaque,
    /// Black at the given alpha, leaving motion trails
    Trail(f32),
}

impl ClearMode {
    pub fn alpha(self) -> f32 {
        match self {
            ClearMode::Opaque => 1.0,
            ClearMode::Trail(alpha) => alpha,
        }
    }
}

/// Per-frame phase increment: `base * (1 + bass_boost * bass)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseRate {
    pub base: f32,
    pub bass_boost: f32,
}

impl PhaseRate {
    const fn fixed(base: f32) -> Self {
        Self {
            base,
            bass_boost: 0.0,
        }
    }

    const fn boosted(base: f32) -> Self {
        Self {
            base,
            bass_boost: 0.5,
        }
    }

    pub fn increment(self, bass: f32) -> f32 {
        self.base * (1.0 + self.bass_boost * bass)
    }
}

/// Constants of one style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleSpec {
    /// Which analysis the style reads
    pub domain: SampleDomain,
    /// Whether samples go through the signal smoother first
    pub smoothed: bool,
    pub clear: ClearMode,
    pub phase: PhaseRate,
}

/// Inputs shared by every draw function for one frame
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Samples on the 0-255 scale
    pub samples: &'a [f32],
    pub bands: BandIntensities,
    /// Mean of `samples` (0-255 scale)
    pub average: f32,
    pub phase: f32,
    pub width: f32,
    pub height: f32,
    pub pointer: Option<Vec2>,
}

impl<'a> Frame<'a> {
    pub fn new(
        samples: &'a [f32],
        bands: BandIntensities,
        phase: f32,
        size: Vec2,
        pointer: Option<Vec2>,
    ) -> Self {
        Self {
            samples,
            bands,
            average: mean(samples),
            phase,
            width: size.x,
            height: size.y,
            pointer,
        }
    }

    /// Mean level normalized to [0, 1]
    pub fn intensity(&self) -> f32 {
        self.average / 255.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Sample at `floor(progress * len)`, clamped into the buffer
    pub fn sample_at(&self, progress: f32) -> f32 {
        let len = self.samples.len();
        if len == 0 {
            return 0.0;
        }
        let index = (progress.max(0.0) * len as f32).floor() as usize;
        self.samples[index.min(len - 1)]
    }
}

/// Owns all animated state the styles carry between frames
pub struct StyleRenderer {
    phase: f32,
    analyzer: BandAnalyzer,
    bar_levels: Vec<f32>,
    orbs: ParticleField,
    rng: StdRng,
    size: Vec2,
}

impl StyleRenderer {
    pub fn new(layout: BandLayout, orbs: OrbPhysics, seed: u64) -> Self {
        Self {
            phase: 0.0,
            analyzer: BandAnalyzer::new(layout),
            bar_levels: vec![0.0; BAR_COUNT],
            orbs: ParticleField::new(orbs, Vec2::ZERO, seed),
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
            size: Vec2::ZERO,
        }
    }

    /// Accumulated animation phase
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn particles(&self) -> &ParticleField {
        &self.orbs
    }

    /// Lagged per-bar levels of the bars style (0-255 scale)
    pub fn bar_levels(&self) -> &[f32] {
        &self.bar_levels
    }

    /// Draw one frame of `style` and advance the phase
    ///
    /// Returns the phase increment, or `None` when the canvas has no area
    /// and nothing was drawn. A canvas size change re-randomizes the orbs.
    pub fn render(
        &mut self,
        style: Style,
        samples: &[f32],
        canvas: &mut dyn Canvas,
        pointer: Option<Vec2>,
    ) -> Option<f32> {
        let size = Vec2::new(canvas.width(), canvas.height());
        if !(size.x > 0.0 && size.y > 0.0) {
            return None;
        }
        if size != self.size {
            tracing::debug!(width = size.x, height = size.y, "canvas resized");
            self.size = size;
            self.orbs.reinitialize(size);
        }

        let spec = style.spec();
        let bands = self.analyzer.analyze(samples);
        let frame = Frame::new(samples, bands, self.phase, size, pointer);

        canvas.clear(spec.clear.alpha());
        match style {
            Style::AuroraWaves => aurora::draw(canvas, &frame, AuroraVariant::Vivid),
            Style::Waveform => waveform::draw(canvas, &frame),
            Style::Bars => bars::draw(canvas, &frame, &mut self.bar_levels),
            Style::Circular => circular::draw(canvas, &frame),
            Style::Arctic => arctic::draw(canvas, &frame, &mut self.rng),
            Style::Particles => aurora::draw(canvas, &frame, AuroraVariant::Muted),
            Style::Spectrum => spectrum::draw(canvas, &frame),
            Style::Dna => helix::draw(canvas, &frame, HelixVariant::Dna),
            Style::Orbs => {
                self.orbs.advance(samples, bands, pointer, self.phase);
                self.orbs.render(canvas, bands, self.phase);
            }
            Style::DnaHelix => helix::draw(canvas, &frame, HelixVariant::DnaHelix),
            Style::FractalTree => fractal::draw(canvas, &frame),
        }

        let increment = spec.phase.increment(bands.bass);
        self.phase += increment;
        Some(increment)
    }
}
