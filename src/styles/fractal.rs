//! Eight rotating spokes, each tied back to the hub by three chords.

use std::f32::consts::TAU;

use glam::Vec2;

use super::Frame;
use crate::canvas::{Canvas, Paint, Path, StrokeStyle};
use crate::color::Hsla;

const SPOKES: usize = 8;
const CHORDS: usize = 3;

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame) {
    let center = frame.center();
    let intensity = frame.intensity();
    let radius = frame.width.min(frame.height) * 0.4 * (1.0 + intensity * 0.3);
    let stroke = StrokeStyle::new(2.0 + intensity * 4.0);

    for i in 0..SPOKES {
        let angle = i as f32 / SPOKES as f32 * TAU;
        let tip = center + Vec2::from_angle(angle + frame.phase) * radius;
        let hue = frame.phase * 50.0 + i as f32 * 45.0;

        canvas.stroke(
            &Path::line(center, tip),
            &Paint::solid(Hsla::new(hue, 80.0, 50.0, 0.6)),
            stroke,
        );

        let inner = Vec2::from_angle(angle + frame.phase * 1.5);
        for j in 1..=CHORDS {
            let anchor = center + inner * radius * (j as f32 / (CHORDS + 1) as f32);
            canvas.stroke(
                &Path::line(tip, anchor),
                &Paint::solid(Hsla::new(
                    hue + j as f32 * 30.0,
                    80.0,
                    50.0,
                    0.3 + intensity * 0.4,
                )),
                stroke,
            );
        }
    }
}
