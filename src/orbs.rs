//! Floating orb field with pointer and audio reactive physics.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, GradientStop, Paint, Path, StrokeStyle};
use crate::color::Hsla;
use crate::params::OrbPhysics;
use crate::signal::{mean, BandIntensities};

/// One physics-driven orb
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    pub radius: f32,
    pub base_hue: f32,
    /// Which slice of the frequency buffer drives this orb
    pub band_index: usize,
    /// Mean of the orb's slice at the last advance, in [0, 1]
    pub intensity: f32,
}

/// Fixed-size collection of orbs inside a rectangular field
pub struct ParticleField {
    params: OrbPhysics,
    bounds: Vec2,
    orbs: Vec<Orb>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(params: OrbPhysics, bounds: Vec2, seed: u64) -> Self {
        let mut field = Self {
            orbs: Vec::with_capacity(params.count),
            params,
            bounds,
            rng: StdRng::seed_from_u64(seed),
        };
        field.reinitialize(bounds);
        field
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn params(&self) -> &OrbPhysics {
        &self.params
    }

    /// Re-randomize every orb for a new field size
    pub fn reinitialize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        let count = self.params.count;
        let (min_radius, max_radius) = self.params.radius_range;
        let speed = self.params.initial_speed;

        self.orbs.clear();
        for i in 0..count {
            let rng = &mut self.rng;
            self.orbs.push(Orb {
                position: Vec2::new(
                    rng.random::<f32>() * bounds.x.max(0.0),
                    rng.random::<f32>() * bounds.y.max(0.0),
                ),
                velocity: Vec2::new(
                    (rng.random::<f32>() - 0.5) * speed,
                    (rng.random::<f32>() - 0.5) * speed,
                ),
                radius: min_radius + rng.random::<f32>() * (max_radius - min_radius),
                base_hue: 360.0 / count as f32 * i as f32,
                band_index: i,
                intensity: 0.0,
            });
        }
        tracing::debug!(
            width = bounds.x,
            height = bounds.y,
            count,
            "orb field reinitialized"
        );
    }

    /// Advance the physics by one frame
    ///
    /// `samples` is the raw frequency buffer (0-255 scale); each orb reads
    /// its own contiguous slice of it.
    pub fn advance(
        &mut self,
        samples: &[f32],
        bands: BandIntensities,
        pointer: Option<Vec2>,
        phase: f32,
    ) {
        let p = &self.params;
        let count = self.orbs.len();
        let bass = bands.bass;
        let max_speed = p.max_speed(bass);

        for (index, orb) in self.orbs.iter_mut().enumerate() {
            let to_pointer = pointer.map(|pt| (pt - orb.position, pt.distance(orb.position)));

            // Pointer repulsion
            if let Some((delta, distance)) = to_pointer {
                if distance < p.pointer_radius {
                    let force = (1.0 - distance / p.pointer_radius) * p.max_force;
                    let direction = delta.try_normalize().unwrap_or(Vec2::X);
                    orb.velocity -= direction * force * p.force_scale;
                }
            }

            orb.intensity = slice_intensity(samples, index, count);

            let speed_multiplier = 1.0 + (bass * 2.0 + orb.intensity) * 1.5;
            orb.position += orb.velocity * speed_multiplier;

            // Idle orbit keeps untouched orbs drifting
            let far = to_pointer.map_or(true, |(_, d)| d > p.orbit_distance());
            if far {
                let angle = phase + index as f32;
                orb.velocity +=
                    Vec2::new(angle.cos(), angle.sin()) * p.orbit_force * orb.intensity;
            }

            bounce_axis(
                &mut orb.position.x,
                &mut orb.velocity.x,
                orb.radius,
                self.bounds.x,
                bass,
            );
            bounce_axis(
                &mut orb.position.y,
                &mut orb.velocity.y,
                orb.radius,
                self.bounds.y,
                bass,
            );

            orb.velocity *= p.damping;
            orb.velocity = orb.velocity.clamp_length_max(max_speed);
        }
    }

    /// Draw orbs as glowing discs with links between near neighbours
    pub fn render(&self, canvas: &mut dyn Canvas, bands: BandIntensities, phase: f32) {
        let BandIntensities { bass, mid, treble } = bands;
        let saturation = 70.0 + treble * 30.0;
        let brightness = 50.0 + mid * 30.0;
        let max_distance = self.params.link_distance * (1.0 + bass * 0.5);

        for (index, orb) in self.orbs.iter().enumerate() {
            let pulse = 1.0 + orb.intensity * 0.5 + bass * 0.3;
            let glow_size = orb.radius * pulse;
            let hue = orb.base_hue + phase * 30.0 + bass * 30.0;

            let stops = vec![
                GradientStop::new(
                    0.0,
                    Hsla::new(hue, saturation, brightness, 0.8 + orb.intensity * 0.2),
                ),
                GradientStop::new(
                    0.6,
                    Hsla::new(
                        hue + 30.0,
                        saturation - 10.0,
                        brightness - 10.0,
                        0.4 + bass * 0.3,
                    ),
                ),
                GradientStop::new(1.0, Hsla::new(hue + 60.0, saturation, brightness, 0.0)),
            ];
            let paint = Paint::radial(orb.position, glow_size, stops).glow(
                Hsla::new(hue, saturation, brightness, orb.intensity),
                15.0 * (orb.intensity + bass),
            );
            canvas.fill(&Path::circle(orb.position, glow_size), &paint);

            for other in &self.orbs[index + 1..] {
                let distance = orb.position.distance(other.position);
                if distance >= max_distance {
                    continue;
                }
                let closeness = 1.0 - distance / max_distance;
                let opacity = closeness * 0.3 * (bass + 0.2);
                let width = closeness * 2.0 * (1.0 + bass);
                canvas.stroke(
                    &Path::line(orb.position, other.position),
                    &Paint::solid(Hsla::new(hue, saturation, brightness, opacity)),
                    StrokeStyle::new(width),
                );
            }
        }
    }
}

/// Mean of orb `index`'s slice of the buffer, normalized to [0, 1]
fn slice_intensity(samples: &[f32], index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let len = samples.len();
    let start = index * len / count;
    let end = ((index + 1) * len / count).min(len);
    mean(&samples[start.min(end)..end]) / 255.0
}

/// Reflect off either edge of one axis and clamp into [radius, extent - radius]
fn bounce_axis(position: &mut f32, velocity: &mut f32, radius: f32, extent: f32, bass: f32) {
    if extent < radius * 2.0 {
        // No room to bounce; park on the center line
        *position = extent.max(0.0) / 2.0;
        return;
    }
    if *position < radius {
        *position = radius;
        *velocity = velocity.abs() * (1.0 + bass);
    } else if *position > extent - radius {
        *position = extent - radius;
        *velocity = -velocity.abs() * (1.0 + bass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand};
    use proptest::prelude::*;

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(OrbPhysics::default(), Vec2::new(800.0, 600.0), seed)
    }

    #[test]
    fn test_initial_orbs() {
        let field = field(7);
        assert_eq!(field.orbs().len(), 12);
        for (i, orb) in field.orbs().iter().enumerate() {
            assert!((10.0..=25.0).contains(&orb.radius));
            assert!(orb.velocity.x.abs() <= 0.75 && orb.velocity.y.abs() <= 0.75);
            assert_eq!(orb.base_hue, 30.0 * i as f32);
            assert_eq!(orb.band_index, i);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(field(3).orbs(), field(3).orbs());
        assert_ne!(field(3).orbs(), field(4).orbs());
    }

    #[test]
    fn test_reinitialize_rerandomizes() {
        let mut field = field(11);
        let before = field.orbs().to_vec();
        field.reinitialize(Vec2::new(200.0, 100.0));
        assert_eq!(field.bounds(), Vec2::new(200.0, 100.0));
        assert_ne!(before, field.orbs());
        for orb in field.orbs() {
            assert!(orb.position.x <= 200.0 && orb.position.y <= 100.0);
        }
    }

    #[test]
    fn test_pointer_repels() {
        let mut field = field(1);
        let orb = &mut field.orbs[0];
        orb.position = Vec2::new(400.0, 300.0);
        orb.velocity = Vec2::ZERO;

        // Pointer just left of the orb pushes it right
        field.advance(
            &[0.0; 1024],
            BandIntensities::default(),
            Some(Vec2::new(350.0, 300.0)),
            0.0,
        );
        let orb = &field.orbs()[0];
        assert!(orb.velocity.x > 0.0);
        assert!(orb.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_slice_intensity() {
        let mut samples = vec![0.0; 120];
        samples[..10].fill(255.0);
        assert_eq!(slice_intensity(&samples, 0, 12), 1.0);
        assert_eq!(slice_intensity(&samples, 1, 12), 0.0);
        // Slices shorter than one bin are empty
        assert_eq!(slice_intensity(&samples[..5], 0, 12), 0.0);
    }

    #[test]
    fn test_bounce_reverses_and_amplifies() {
        let (mut x, mut vx) = (-5.0, -2.0);
        bounce_axis(&mut x, &mut vx, 10.0, 100.0, 0.5);
        assert_eq!(x, 10.0);
        assert_eq!(vx, 3.0);

        let (mut x, mut vx) = (95.0, 1.0);
        bounce_axis(&mut x, &mut vx, 10.0, 100.0, 0.0);
        assert_eq!(x, 90.0);
        assert_eq!(vx, -1.0);
    }

    #[test]
    fn test_render_links_close_orbs() {
        let mut field = field(5);
        for (i, orb) in field.orbs.iter_mut().enumerate() {
            orb.position = Vec2::new(100.0 + i as f32 * 400.0, 100.0);
        }
        field.orbs[1].position = Vec2::new(150.0, 100.0);

        let mut canvas = DisplayList::new(800.0, 600.0);
        field.render(&mut canvas, BandIntensities::default(), 0.0);
        let strokes = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count();
        let fills = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count();
        assert_eq!(fills, 12);
        assert_eq!(strokes, 1);
    }

    proptest! {
        #[test]
        fn prop_orbs_stay_inside(
            seed in any::<u64>(),
            level in 0.0f32..=255.0,
            bass in 0.0f32..=1.0,
            pointer in proptest::option::of((0.0f32..800.0, 0.0f32..600.0)),
        ) {
            let mut field = field(seed);
            let samples = vec![level; 1024];
            let bands = BandIntensities { bass, mid: bass, treble: bass };
            let pointer = pointer.map(|(x, y)| Vec2::new(x, y));
            for frame in 0..120 {
                field.advance(&samples, bands, pointer, frame as f32 * 0.02);
                for orb in field.orbs() {
                    prop_assert!(orb.position.x >= orb.radius - 1e-3);
                    prop_assert!(orb.position.x <= 800.0 - orb.radius + 1e-3);
                    prop_assert!(orb.position.y >= orb.radius - 1e-3);
                    prop_assert!(orb.position.y <= 600.0 - orb.radius + 1e-3);
                    prop_assert!(orb.velocity.length() <= 3.0 + bass * 4.0 + 1e-3);
                }
            }
        }
    }
}
