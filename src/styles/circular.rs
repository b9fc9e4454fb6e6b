//! Three rippling rings around a pulsing core.

use std::f32::consts::TAU;

use glam::Vec2;

use super::Frame;
use crate::canvas::{Blend, Canvas, GradientStop, Paint, Path, StrokeStyle};
use crate::color::Hsla;

const LAYERS: usize = 3;
const LAYER_SPACING: f32 = 20.0;
const WAVE_FREQ: f32 = 6.0;

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame) {
    let center = frame.center();
    let average = frame.average;
    let radius = center.x.min(center.y) * 0.8 + average * 0.3;
    let intensity = (average / 128.0).min(1.0);
    let glow = intensity.max(0.5);
    let base_hue = frame.phase * 50.0;
    let len = frame.samples.len();

    for layer in 0..LAYERS {
        let layer_radius = radius - layer as f32 * LAYER_SPACING;
        let amplitude = 35.0 * (LAYERS - layer) as f32;

        let mut path = Path::with_capacity(len + 1);
        for (i, &sample) in frame.samples.iter().enumerate() {
            let angle = i as f32 * TAU / len as f32;
            let wave =
                (angle * WAVE_FREQ + frame.phase * 2.0).sin() * amplitude * (sample / 128.0 - 1.0);
            let point = center + Vec2::from_angle(angle) * (layer_radius + wave);
            if i == 0 {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        path.close();

        let hue = base_hue + layer as f32 * 120.0;
        let paint = Paint::radial(
            center,
            layer_radius,
            vec![
                GradientStop::new(0.0, Hsla::new(hue, 100.0, 60.0, 0.8)),
                GradientStop::new(0.5, Hsla::new(hue + 30.0, 100.0, 70.0, 0.6)),
                GradientStop::new(1.0, Hsla::new(hue + 60.0, 100.0, 80.0, 0.4)),
            ],
        )
        .blend(Blend::Lighter)
        .glow(Hsla::new(hue, 100.0, 70.0, glow), 25.0 * glow);
        canvas.stroke(&path, &paint, StrokeStyle::new(3.0));
    }

    let core_radius = 25.0 + average * 0.3;
    let hue = 180.0 + frame.phase * 50.0;
    let paint = Paint::radial(
        center,
        core_radius,
        vec![
            GradientStop::new(0.0, Hsla::new(hue, 100.0, 80.0, 1.0)),
            GradientStop::new(0.5, Hsla::new(hue + 30.0, 100.0, 70.0, 0.8)),
            GradientStop::new(1.0, Hsla::new(hue + 60.0, 100.0, 60.0, 0.6)),
        ],
    )
    .blend(Blend::Lighter)
    .glow(Hsla::new(hue, 100.0, 70.0, 0.8), 30.0);
    canvas.fill(&Path::circle(center, core_radius), &paint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand, PathVerb};
    use crate::signal::BandIntensities;
    use approx::assert_relative_eq;

    #[test]
    fn test_rings_and_core() {
        // Centered samples leave the rings perfectly round
        let samples = vec![128.0; 256];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.3,
            Vec2::new(400.0, 300.0),
            None,
        );
        let mut canvas = DisplayList::new(400.0, 300.0);
        draw(&mut canvas, &frame);
        assert_eq!(canvas.commands().len(), LAYERS + 1);

        let expected = 150.0 * 0.8 + 128.0 * 0.3;
        let DrawCommand::Stroke { path, .. } = &canvas.commands()[0] else {
            panic!("expected ring stroke");
        };
        let PathVerb::MoveTo(first) = path.verbs()[0] else {
            panic!("ring starts with move");
        };
        assert_relative_eq!(first.distance(Vec2::new(200.0, 150.0)), expected, epsilon = 1e-3);

        let DrawCommand::Fill { path, .. } = &canvas.commands()[LAYERS] else {
            panic!("expected core fill");
        };
        assert_eq!(
            path.verbs()[0],
            PathVerb::Circle {
                center: Vec2::new(200.0, 150.0),
                radius: 25.0 + 128.0 * 0.3
            }
        );
    }
}
