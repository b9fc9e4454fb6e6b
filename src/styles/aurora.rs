//! Layered aurora curtains with drifting particles and a pointer ripple.
//!
//! The aurora-waves and particles styles share this renderer; they differ
//! only in palette and gain constants.

use glam::Vec2;

use super::Frame;
use crate::canvas::{Canvas, GradientStop, Paint, Path};
use crate::color::Hsla;
use crate::signal::BandIntensities;

const LAYERS: usize = 5;
const STEP: usize = 2;

/// Fixed (hue, saturation, lightness) per layer of the vivid palette
const VIVID_PALETTE: [(f32, f32, f32); LAYERS] = [
    (280.0, 90.0, 60.0),
    (180.0, 95.0, 55.0),
    (320.0, 85.0, 65.0),
    (140.0, 90.0, 50.0),
    (200.0, 95.0, 60.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuroraVariant {
    /// Saturated palette, strong glow, more particles
    Vivid,
    /// Phase-cycled hues, softer curtains
    Muted,
}

struct Tuning {
    /// Alpha of the five curtain gradient stops
    curtain_alpha: [f32; 5],
    bass_gain: f32,
    mid_gain: f32,
    hue_shift: f32,
    glow_blur: f32,
    glow_alpha: (f32, f32),
    particles: usize,
    particle_size: (f32, f32),
    particle_alpha: (f32, f32),
    particle_hue_rate: f32,
    particle_saturation: f32,
    ripple_radius: (f32, f32),
}

const VIVID: Tuning = Tuning {
    curtain_alpha: [0.0, 0.3, 0.7, 0.3, 0.0],
    bass_gain: 0.5,
    mid_gain: 0.3,
    hue_shift: 30.0,
    glow_blur: 30.0,
    glow_alpha: (0.5, 0.5),
    particles: 30,
    particle_size: (3.0, 5.0),
    particle_alpha: (0.2, 0.6),
    particle_hue_rate: 30.0,
    particle_saturation: 100.0,
    ripple_radius: (120.0, 80.0),
};

const MUTED: Tuning = Tuning {
    curtain_alpha: [0.0, 0.1, 0.3, 0.1, 0.0],
    bass_gain: 0.3,
    mid_gain: 0.2,
    hue_shift: 20.0,
    glow_blur: 20.0,
    glow_alpha: (0.3, 0.2),
    particles: 20,
    particle_size: (2.0, 3.0),
    particle_alpha: (0.1, 0.3),
    particle_hue_rate: 20.0,
    particle_saturation: 80.0,
    ripple_radius: (100.0, 50.0),
};

impl AuroraVariant {
    fn tuning(self) -> &'static Tuning {
        match self {
            AuroraVariant::Vivid => &VIVID,
            AuroraVariant::Muted => &MUTED,
        }
    }

    /// Base (hue, saturation, lightness) of a curtain layer
    fn layer_color(self, layer: usize, phase: f32, bands: BandIntensities) -> (f32, f32, f32) {
        match self {
            AuroraVariant::Vivid => {
                let (hue, sat, light) = VIVID_PALETTE[layer % LAYERS];
                (
                    hue + phase * 20.0,
                    sat + bands.treble * 10.0,
                    light + bands.mid * 40.0,
                )
            }
            AuroraVariant::Muted => (
                phase * 10.0 + layer as f32 * 30.0,
                70.0 + bands.treble * 30.0,
                40.0 + bands.mid * 30.0,
            ),
        }
    }

    fn ripple_stops(self, phase: f32, mid: f32) -> Vec<GradientStop> {
        match self {
            AuroraVariant::Vivid => {
                let hue = phase * 30.0;
                vec![
                    GradientStop::new(0.0, Hsla::new(hue, 100.0, 70.0, 0.3 + mid * 0.3)),
                    GradientStop::new(0.5, Hsla::new(hue + 30.0, 100.0, 60.0, 0.2 + mid * 0.2)),
                    GradientStop::new(1.0, Hsla::TRANSPARENT),
                ]
            }
            AuroraVariant::Muted => vec![
                GradientStop::new(0.0, Hsla::new(phase * 20.0, 70.0, 60.0, 0.1 + mid * 0.1)),
                GradientStop::new(1.0, Hsla::TRANSPARENT),
            ],
        }
    }
}

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame, variant: AuroraVariant) {
    let tuning = variant.tuning();
    let (width, height) = (frame.width, frame.height);
    let BandIntensities { bass, mid, .. } = frame.bands;
    let phase = frame.phase;
    let amplitude = height * 0.15;

    for layer in 0..LAYERS {
        let offset = height / (LAYERS + 1) as f32 * (layer + 1) as f32;
        let time = phase * (0.001 + layer as f32 * 0.0005);
        let freq = 0.002 - layer as f32 * 0.0002;
        let drive = bass * tuning.bass_gain + mid * tuning.mid_gain;
        let gain = amplitude * (1.0 + drive * (1.0 - layer as f32 * 0.15));

        let mut path = Path::new();
        for x in (0..=width.floor() as usize).step_by(STEP) {
            let x = x as f32;
            let swell = (x * freq + time).sin()
                + (x * freq * 1.5 + time * 1.1).sin() * 0.5
                + (x * freq * 2.0 + time * 0.9).sin() * 0.25;
            let point = Vec2::new(x, offset + swell * gain);
            if path.is_empty() {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        path.line_to(Vec2::new(width, height))
            .line_to(Vec2::new(0.0, height))
            .close();

        let (hue, sat, light) = variant.layer_color(layer, phase, frame.bands);
        let curtain = hue + bass * tuning.hue_shift;
        let stops = [0.0, 0.2, 0.5, 0.8, 1.0]
            .into_iter()
            .zip(tuning.curtain_alpha)
            .map(|(offset, alpha)| GradientStop::new(offset, Hsla::new(curtain, sat, light, alpha)))
            .collect();
        let (glow_base, glow_mid) = tuning.glow_alpha;
        let paint = Paint::linear(
            Vec2::new(0.0, offset - amplitude),
            Vec2::new(0.0, offset + amplitude),
            stops,
        )
        .glow(
            Hsla::new(hue, sat, light, glow_base + mid * glow_mid),
            tuning.glow_blur * (1.0 + bass),
        );
        canvas.fill(&path, &paint);
    }

    let (size_base, size_bass) = tuning.particle_size;
    let (alpha_base, alpha_mid) = tuning.particle_alpha;
    let radius = size_base + bass * size_bass;
    let alpha = alpha_base + mid * alpha_mid;
    for i in 0..tuning.particles {
        let x = (width * i as f32 / tuning.particles as f32 + phase * 50.0) % width;
        let base_y = height * 0.3 + (x * 0.01 + phase).sin() * height * 0.1;
        let y = base_y + (phase * 2.0 + i as f32).sin() * height * 0.05;
        let hue = phase * tuning.particle_hue_rate + i as f32 * 20.0;
        canvas.fill(
            &Path::circle(Vec2::new(x, y), radius),
            &Paint::solid(Hsla::new(hue, tuning.particle_saturation, 70.0, alpha)),
        );
    }

    if let Some(pointer) = frame.pointer {
        let (ripple_base, ripple_bass) = tuning.ripple_radius;
        let radius = ripple_base + bass * ripple_bass;
        canvas.fill(
            &Path::circle(pointer, radius),
            &Paint::radial(pointer, radius, variant.ripple_stops(phase, mid)),
        );
    }
}
