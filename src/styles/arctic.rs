//! Layered blue waves over the raw time-domain signal, with sparkles.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::Frame;
use crate::canvas::{Blend, Canvas, GradientStop, Paint, Path, StrokeStyle};
use crate::color::Hsla;

const WAVES: usize = 4;
const STEP: usize = 2;

/// Sparkles appear above this mean level
const SPARKLE_THRESHOLD: f32 = 0.5;

/// Points of one wave, one every [`STEP`] pixels
fn wave_points(frame: &Frame, wave: usize, amplitude: f32) -> Vec<Vec2> {
    let (width, height) = (frame.width, frame.height);
    let intensity = frame.intensity();
    let base_y = height * 0.7 - wave as f32 * height * 0.15;
    let freq = 2.0 + wave as f32 * 0.5;

    (0..=width.floor() as usize)
        .step_by(STEP)
        .map(|x| {
            let x = x as f32;
            let progress = x / width;
            let value = frame.sample_at(progress) / 128.0 - 1.0;
            let primary = (progress * freq * PI + frame.phase).sin() * amplitude;
            let secondary =
                (progress * (freq / 2.0) * PI - frame.phase * 0.5).cos() * amplitude * 0.5;
            Vec2::new(x, base_y + primary + secondary + value * amplitude * intensity)
        })
        .collect()
}

/// Quadratic curve through the midpoints of `points`, closed along the bottom
fn wave_path(points: &[Vec2], width: f32, height: f32) -> Path {
    let mut path = Path::with_capacity(points.len() + 3);
    if let Some(&first) = points.first() {
        path.move_to(first);
    }
    for pair in points[1.min(points.len())..].windows(2).take(points.len().saturating_sub(3)) {
        path.quad_to(pair[0], (pair[0] + pair[1]) / 2.0);
    }
    path.line_to(Vec2::new(width, height))
        .line_to(Vec2::new(0.0, height))
        .close();
    path
}

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame, rng: &mut impl Rng) {
    let (width, height) = (frame.width, frame.height);
    let intensity = frame.intensity();
    let amplitude = height * 0.12;

    for wave in (0..WAVES).rev() {
        let points = wave_points(frame, wave, amplitude);
        let path = wave_path(&points, width, height);
        let base_y = height * 0.7 - wave as f32 * height * 0.15;
        let hue = 200.0 + wave as f32 * 15.0;
        let lightness = 60.0 + wave as f32 * 5.0;
        let glow = Hsla::new(hue, 100.0, 70.0, 0.5 + intensity * 0.5);

        let fill = Paint::linear(
            Vec2::new(0.0, base_y - amplitude),
            Vec2::new(0.0, height),
            vec![
                GradientStop::new(0.0, Hsla::new(hue, 100.0, lightness, 0.0)),
                GradientStop::new(0.5, Hsla::new(hue, 90.0, lightness, 0.3 + intensity * 0.2)),
                GradientStop::new(
                    1.0,
                    Hsla::new(hue, 80.0, lightness - 10.0, 0.1 + intensity * 0.1),
                ),
            ],
        )
        .blend(Blend::Lighter)
        .glow(glow, 15.0);
        canvas.fill(&path, &fill);

        let edge = Paint::solid(Hsla::new(hue, 100.0, lightness + 10.0, 0.6 + intensity * 0.4))
            .blend(Blend::Lighter)
            .glow(glow, 15.0);
        canvas.stroke(&path, &edge, StrokeStyle::new(2.0));

        if intensity > SPARKLE_THRESHOLD && !points.is_empty() {
            let sparkle = Paint::solid(Hsla::new(hue, 100.0, 90.0, intensity * 0.7))
                .blend(Blend::Lighter);
            let count = (intensity * 15.0).floor() as usize;
            for _ in 0..count {
                let x = rng.random::<f32>() * width;
                let crest = points[((x / STEP as f32) as usize).min(points.len() - 1)].y;
                let y = crest - rng.random::<f32>() * amplitude * 0.5;
                let radius = rng.random::<f32>() * 2.0;
                canvas.fill(&Path::circle(Vec2::new(x, y), radius), &sparkle);
            }
        }
    }
}
