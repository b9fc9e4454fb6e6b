//! Orb physics parameters.

/// Floating orb physics (pixels, per-frame units)
#[derive(Debug, Clone)]
pub struct OrbPhysics {
    /// Number of orbs in the field
    pub count: usize,

    /// Pointer repulsion radius (pixels)
    pub pointer_radius: f32,

    /// Peak repulsion at zero distance
    pub max_force: f32,

    /// Fraction of the repulsion applied to velocity each frame
    pub force_scale: f32,

    /// Idle orbit force when the pointer is far away
    pub orbit_force: f32,

    /// Velocity decay per frame
    pub damping: f32,

    /// Speed limit at silence (pixels per frame)
    pub base_max_speed: f32,

    /// Extra speed limit at full bass
    pub bass_speed_boost: f32,

    /// Radius range (pixels)
    pub radius_range: (f32, f32),

    /// Initial velocity magnitude per axis is within +/- half this value
    pub initial_speed: f32,

    /// Link distance between orbs at silence (pixels)
    pub link_distance: f32,
}

impl Default for OrbPhysics {
    fn default() -> Self {
        Self {
            count: 12,
            pointer_radius: 150.0,
            max_force: 5.0,
            force_scale: 0.1,
            orbit_force: 0.1,
            damping: 0.98,
            base_max_speed: 3.0,
            bass_speed_boost: 4.0,
            radius_range: (10.0, 25.0),
            initial_speed: 1.5,
            link_distance: 150.0,
        }
    }
}

impl OrbPhysics {
    /// Distance beyond which the idle orbit force applies
    pub fn orbit_distance(&self) -> f32 {
        self.pointer_radius * 2.0
    }

    /// Speed clamp for the given bass intensity
    pub fn max_speed(&self, bass: f32) -> f32 {
        self.base_max_speed + bass * self.bass_speed_boost
    }
}
