//! Radial spectrum: three rings of outward bars.

use std::f32::consts::TAU;

use glam::Vec2;

use super::Frame;
use crate::canvas::{Blend, Canvas, GradientStop, Paint, Path, StrokeStyle};
use crate::color::Hsla;

const LAYERS: usize = 3;
const BARS: usize = 180;

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame) {
    let center = frame.center();
    let intensity = frame.intensity();
    let short_side = frame.width.min(frame.height);
    let base_radius = short_side * 0.2;
    let max_bar = short_side * 0.15;

    for layer in 0..LAYERS {
        let ring = base_radius + layer as f32 * 20.0;
        let opacity = 1.0 - layer as f32 * 0.2;

        for i in 0..BARS {
            let progress = i as f32 / BARS as f32;
            let direction = Vec2::from_angle(progress * TAU);
            let bar = frame.sample_at(progress) / 255.0 * max_bar * (1.0 + intensity * 0.3);
            let start = center + direction * ring;
            let end = center + direction * (ring + bar);
            let hue = progress * 360.0 + frame.phase * 30.0;

            let paint = Paint::linear(
                start,
                end,
                vec![
                    GradientStop::new(0.0, Hsla::new(hue, 100.0, 50.0, 0.1 * opacity)),
                    GradientStop::new(0.5, Hsla::new(hue, 100.0, 70.0, 0.8 * opacity)),
                    GradientStop::new(1.0, Hsla::new(hue, 100.0, 50.0, 0.1 * opacity)),
                ],
            )
            .blend(Blend::Lighter)
            .glow(
                Hsla::new(hue, 100.0, 50.0, intensity * opacity),
                10.0 * intensity,
            );
            canvas.stroke(&Path::line(start, end), &paint, StrokeStyle::new(2.0));
        }

        canvas.stroke(
            &Path::circle(center, ring),
            &Paint::solid(Hsla::new(0.0, 0.0, 100.0, 0.2 * opacity)).blend(Blend::Lighter),
            StrokeStyle::new(1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand, PathVerb};
    use crate::signal::BandIntensities;
    use approx::assert_relative_eq;

    #[test]
    fn test_bar_and_ring_counts() {
        let samples = vec![255.0; 1024];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.0,
            Vec2::new(400.0, 200.0),
            None,
        );
        let mut canvas = DisplayList::new(400.0, 200.0);
        draw(&mut canvas, &frame);
        assert_eq!(canvas.commands().len(), LAYERS * (BARS + 1));

        // First bar points right from the innermost ring
        let DrawCommand::Stroke { path, .. } = &canvas.commands()[0] else {
            panic!("expected bar");
        };
        let PathVerb::LineTo(end) = path.verbs()[1] else {
            panic!("bar is a line");
        };
        assert_relative_eq!(end.x, 200.0 + 40.0 + 30.0 * 1.3, epsilon = 1e-3);
        assert_relative_eq!(end.y, 100.0, epsilon = 1e-3);

        let DrawCommand::Stroke { path, .. } = &canvas.commands()[BARS] else {
            panic!("expected ring");
        };
        assert_eq!(
            path.verbs()[0],
            PathVerb::Circle {
                center: Vec2::new(200.0, 100.0),
                radius: 40.0
            }
        );
    }
}
