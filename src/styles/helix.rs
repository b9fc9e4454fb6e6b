//! Double helix of rungs and nucleotide dots, drawn over a fading trail.

use std::f32::consts::PI;

use glam::Vec2;

use super::Frame;
use crate::canvas::{Canvas, Paint, Path, StrokeStyle};
use crate::color::Hsla;

const POINTS: usize = 50;
const TWIST: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelixVariant {
    /// Fixed dot opacity
    Dna,
    /// Dot opacity follows the bin level
    DnaHelix,
}

impl HelixVariant {
    fn dot_alpha(self, intensity: f32) -> f32 {
        match self {
            HelixVariant::Dna => 0.8,
            HelixVariant::DnaHelix => 0.8 + intensity * 0.2,
        }
    }
}

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame, variant: HelixVariant) {
    let mid_y = frame.height / 2.0;
    let amplitude = frame.height * 0.1;
    let spacing = frame.width / POINTS as f32;

    for i in 0..POINTS {
        let x = i as f32 * spacing;
        let intensity = frame.sample_at(i as f32 / POINTS as f32) / 255.0;
        let swing = amplitude * (1.0 + intensity);
        let angle = i as f32 * TWIST + frame.phase;
        let upper = Vec2::new(x, mid_y + angle.sin() * swing);
        let lower = Vec2::new(x, mid_y + (angle + PI).sin() * swing);
        let hue = (i as f32 / POINTS as f32 * 360.0 + frame.phase * 50.0) % 360.0;

        canvas.stroke(
            &Path::line(upper, lower),
            &Paint::solid(Hsla::new(hue, 100.0, 50.0, 0.3 + intensity * 0.7)),
            StrokeStyle::new(2.0),
        );

        let radius = 5.0 * (1.0 + intensity);
        let alpha = variant.dot_alpha(intensity);
        canvas.fill(
            &Path::circle(upper, radius),
            &Paint::solid(Hsla::new(hue, 100.0, 50.0, alpha)),
        );
        canvas.fill(
            &Path::circle(lower, radius),
            &Paint::solid(Hsla::new(hue + 180.0, 100.0, 50.0, alpha)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand, PathVerb};
    use crate::signal::BandIntensities;
    use approx::assert_relative_eq;

    fn run(variant: HelixVariant, level: f32) -> DisplayList {
        let samples = vec![level; 1024];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.0,
            Vec2::new(500.0, 200.0),
            None,
        );
        let mut canvas = DisplayList::new(500.0, 200.0);
        draw(&mut canvas, &frame, variant);
        canvas
    }

    #[test]
    fn test_strands_are_mirrored() {
        let canvas = run(HelixVariant::Dna, 0.0);
        assert_eq!(canvas.commands().len(), POINTS * 3);
        for rung in canvas.commands().chunks(3) {
            let DrawCommand::Stroke { path, .. } = &rung[0] else {
                panic!("rung first");
            };
            let (PathVerb::MoveTo(a), PathVerb::LineTo(b)) = (&path.verbs()[0], &path.verbs()[1])
            else {
                panic!("rung is a line");
            };
            assert_relative_eq!(a.x, b.x);
            assert_relative_eq!(a.y + b.y, 200.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_dot_alpha_by_variant() {
        let dot_alpha = |canvas: &DisplayList| match &canvas.commands()[1] {
            DrawCommand::Fill { paint, .. } => paint.fill.stops()[0].color.a,
            other => panic!("unexpected {other:?}"),
        };
        assert_relative_eq!(dot_alpha(&run(HelixVariant::Dna, 255.0)), 0.8);
        assert_relative_eq!(dot_alpha(&run(HelixVariant::DnaHelix, 255.0)), 1.0);
        assert_relative_eq!(dot_alpha(&run(HelixVariant::DnaHelix, 0.0)), 0.8);
    }
}
