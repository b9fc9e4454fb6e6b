//! Frequency bars with power-law bin mapping and a mirrored reflection.

use glam::Vec2;

use super::Frame;
use crate::canvas::{Blend, Canvas, GradientStop, Paint, Path};
use crate::color::Hsla;

/// Number of bars drawn
pub const BAR_COUNT: usize = 64;

/// Per-bar lag toward the latest sample
const BAR_LAG: f32 = 0.2;

/// Share of the canvas height a full-scale bar reaches
const MAX_HEIGHT: f32 = 0.7;

/// Reflection height relative to the bar
const REFLECTION: f32 = 0.3;

/// Horizontal placement of the bar row
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub bar_width: f32,
    pub gap: f32,
    /// Left edge of the first bar
    pub start_x: f32,
}

impl BarLayout {
    /// Left edge of bar `i`
    pub fn x(&self, i: usize) -> f32 {
        self.start_x + i as f32 * (self.bar_width + self.gap)
    }
}

/// Centered layout of [`BAR_COUNT`] bars over `width`
pub fn bar_layout(width: f32) -> BarLayout {
    let slot = width / BAR_COUNT as f32;
    let bar_width = slot * 0.8;
    let gap = slot * 0.2;
    let total = BAR_COUNT as f32 * (bar_width + gap);
    BarLayout {
        bar_width,
        gap,
        start_x: (width - total) / 2.0,
    }
}

/// Bar height for a level on the 0-255 scale
pub fn bar_height(level: f32, canvas_height: f32) -> f32 {
    (level.max(0.0) / 255.0).powf(1.5) * canvas_height * MAX_HEIGHT
}

/// Hue of bar `i`; one full sweep across the row
pub fn bar_hue(i: usize, phase: f32) -> f32 {
    (i as f32 / BAR_COUNT as f32 * 360.0 + phase * 50.0) % 360.0
}

/// Bin read by bar `i`; bass bins get more bars
fn bin_index(i: usize, len: usize) -> usize {
    let index = ((i as f32 / BAR_COUNT as f32).powf(1.5) * len as f32).floor() as usize;
    index.min(len.saturating_sub(1))
}

pub(super) fn draw(canvas: &mut dyn Canvas, frame: &Frame, levels: &mut Vec<f32>) {
    let (width, height) = (frame.width, frame.height);
    let intensity = frame.intensity();
    let layout = bar_layout(width);
    let corner = layout.bar_width / 2.0;
    let bounce = (frame.phase * 3.0).sin() * intensity * 10.0;
    let sat = 90.0 + intensity * 10.0;
    let light = 40.0 + intensity * 30.0;

    levels.resize(BAR_COUNT, 0.0);
    for (i, level) in levels.iter_mut().enumerate() {
        let value = frame
            .samples
            .get(bin_index(i, frame.samples.len()))
            .copied()
            .unwrap_or(0.0);
        *level += (value - *level) * BAR_LAG;

        let bar_height = bar_height(*level, height);
        let x = layout.x(i);
        let top = height - bar_height + bounce;
        let hue = bar_hue(i, frame.phase);

        let mut path = Path::with_capacity(6);
        path.move_to(Vec2::new(x, height))
            .line_to(Vec2::new(x, top + corner))
            .quad_to(Vec2::new(x, top), Vec2::new(x + corner, top))
            .quad_to(
                Vec2::new(x + layout.bar_width, top),
                Vec2::new(x + layout.bar_width, top + corner),
            )
            .line_to(Vec2::new(x + layout.bar_width, height))
            .close();
        let paint = Paint::linear(
            Vec2::new(x, height),
            Vec2::new(x, height - bar_height),
            vec![
                GradientStop::new(0.0, Hsla::new(hue, sat, light, 1.0)),
                GradientStop::new(0.5, Hsla::new(hue + 30.0, sat, light + 20.0, 0.9)),
                GradientStop::new(1.0, Hsla::new(hue + 60.0, sat, light + 40.0, 0.8)),
            ],
        )
        .blend(Blend::Lighter)
        .glow(Hsla::new(hue, 100.0, 70.0, intensity), 15.0 * intensity);
        canvas.fill(&path, &paint);

        // Reflection below the baseline
        let reflection = bar_height * REFLECTION;
        let mut path = Path::with_capacity(5);
        path.move_to(Vec2::new(x, height))
            .line_to(Vec2::new(x + layout.bar_width, height))
            .line_to(Vec2::new(x + layout.bar_width, height + reflection))
            .line_to(Vec2::new(x, height + reflection))
            .close();
        let paint = Paint::linear(
            Vec2::new(x, height + reflection),
            Vec2::new(x, height),
            vec![
                GradientStop::new(0.0, Hsla::new(hue, sat, light, 0.0)),
                GradientStop::new(1.0, Hsla::new(hue, sat, light, 0.2)),
            ],
        )
        .blend(Blend::Lighter);
        canvas.fill(&path, &paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DisplayList;
    use crate::signal::BandIntensities;
    use approx::assert_relative_eq;

    #[test]
    fn test_layout_is_centered() {
        let layout = bar_layout(800.0);
        assert_relative_eq!(layout.bar_width, 10.0);
        assert_relative_eq!(layout.gap, 2.5);
        assert_relative_eq!(layout.start_x, 0.0);
        // Right edge of the last bar plus its gap reaches the canvas edge
        assert_relative_eq!(layout.x(BAR_COUNT - 1) + layout.bar_width + layout.gap, 800.0);
    }

    #[test]
    fn test_bin_mapping_favors_bass() {
        assert_eq!(bin_index(0, 1024), 0);
        assert_eq!(bin_index(16, 1024), 128);
        assert_eq!(bin_index(32, 1024), 362);
        assert!(bin_index(63, 1024) < 1024);
        assert_eq!(bin_index(40, 10), 4);
        assert_eq!(bin_index(5, 0), 0);
    }

    #[test]
    fn test_height_and_hue() {
        assert_relative_eq!(bar_height(255.0, 400.0), 280.0);
        assert_relative_eq!(bar_height(0.0, 400.0), 0.0);
        assert_relative_eq!(bar_hue(0, 0.0), 0.0);
        assert_relative_eq!(bar_hue(32, 0.0), 180.0);
        assert_relative_eq!(bar_hue(63, 0.0), 354.375);
        assert_relative_eq!(bar_hue(0, 2.0), 100.0);
    }

    #[test]
    fn test_levels_lag_toward_samples() {
        let samples = vec![200.0; 1024];
        let frame = Frame::new(
            &samples,
            BandIntensities::default(),
            0.0,
            Vec2::new(800.0, 400.0),
            None,
        );
        let mut levels = Vec::new();
        let mut canvas = DisplayList::new(800.0, 400.0);
        draw(&mut canvas, &frame, &mut levels);
        assert_eq!(levels.len(), BAR_COUNT);
        assert!(levels.iter().all(|&l| (l - 40.0).abs() < 1e-4));
        // Bar plus reflection per bar
        assert_eq!(canvas.commands().len(), BAR_COUNT * 2);

        draw(&mut canvas, &frame, &mut levels);
        assert!(levels.iter().all(|&l| (l - 72.0).abs() < 1e-3));
    }
}
