//! Oscilloscope line over the smoothed time-domain signal.

use glam::Vec2;

use super::Frame;
use crate::canvas::{Canvas, GradientStop, Paint, Path, StrokeStyle};
use crate::color::Hsla;

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame) {
    let (width, height) = (frame.width, frame.height);
    let center_y = height / 2.0;
    let intensity = frame.intensity();
    let columns = width.floor() as usize;

    let mut path = Path::with_capacity(columns);
    for i in 0..columns {
        let progress = i as f32 / width;
        let value = frame.sample_at(progress) / 128.0;
        let y = center_y
            + (value - 1.0) * height * 0.4
            + (progress * 5.0 + frame.phase).sin() * 20.0;
        let point = Vec2::new(i as f32, y);
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }

    let cyan = |alpha: f32| Hsla::from_rgb(0, 255, 255, alpha);
    let paint = Paint::linear(
        Vec2::ZERO,
        Vec2::new(0.0, height),
        vec![
            GradientStop::new(0.0, cyan(0.2 + intensity * 0.3)),
            GradientStop::new(0.5, cyan(0.8 + intensity * 0.2)),
            GradientStop::new(1.0, cyan(0.2 + intensity * 0.3)),
        ],
    )
    .glow(cyan(0.5), 10.0);
    canvas.stroke(&path, &paint, StrokeStyle::round(4.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand, PathVerb};
    use crate::signal::BandIntensities;

    #[test]
    fn test_silence_draws_sine_around_center() {
        let samples = vec![128.0; 1024];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.0,
            Vec2::new(200.0, 100.0),
            None,
        );
        let mut canvas = DisplayList::new(200.0, 100.0);
        draw(&mut canvas, &frame);

        let DrawCommand::Stroke { path, stroke, .. } = &canvas.commands()[0] else {
            panic!("expected a stroke");
        };
        assert_eq!(path.verbs().len(), 200);
        assert_eq!(path.verbs()[0], PathVerb::MoveTo(Vec2::new(0.0, 50.0)));
        assert!(stroke.round);
        let (lo, hi) = path.bounds().unwrap();
        assert!(lo.y >= 30.0 - 1e-3 && hi.y <= 70.0 + 1e-3);
    }

    #[test]
    fn test_peak_sample_offsets_trace() {
        let samples = vec![255.0; 16];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.0,
            Vec2::new(10.0, 100.0),
            None,
        );
        let mut canvas = DisplayList::new(10.0, 100.0);
        draw(&mut canvas, &frame);
        let DrawCommand::Stroke { path, .. } = &canvas.commands()[0] else {
            panic!("expected a stroke");
        };
        let (_, hi) = path.bounds().unwrap();
        // value ~2 pushes the trace to the lower half of the canvas
        assert!(hi.y > 80.0);
    }
}
