//! Two-stage temporal smoothing of per-bin sample arrays.

use crate::params::SmoothingParams;

/// Noise-gated, two-stage exponential smoother
///
/// Holds three parallel arrays (`target`, `last`, `smoothed`) that are
/// allocated once and reused every frame. `last` chases `target` at
/// `transition_speed`; `smoothed` blends toward `last` with weight
/// `1 - smoothing_factor`.
pub struct SignalSmoother {
    params: SmoothingParams,
    target: Vec<f32>,
    last: Vec<f32>,
    smoothed: Vec<f32>,
}

impl SignalSmoother {
    /// Create a smoother for `len` bins, all at the neutral value
    pub fn new(len: usize, params: SmoothingParams) -> Self {
        let center = params.center;
        Self {
            params,
            target: vec![center; len],
            last: vec![center; len],
            smoothed: vec![center; len],
        }
    }

    /// Number of bins tracked
    pub fn len(&self) -> usize {
        self.smoothed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smoothed.is_empty()
    }

    /// Resize all three arrays and reset them to neutral
    pub fn reset(&mut self, len: usize) {
        let center = self.params.center;
        for values in [&mut self.target, &mut self.last, &mut self.smoothed] {
            values.clear();
            values.resize(len, center);
        }
    }

    /// Feed one frame of samples and return the smoothed view
    ///
    /// A length change (device reconfiguration) resets the state before
    /// the frame is processed.
    pub fn smooth(&mut self, samples: &[u8]) -> &[f32] {
        if samples.len() != self.len() {
            tracing::debug!(
                from = self.len(),
                to = samples.len(),
                "sample length changed, resetting smoother"
            );
            self.reset(samples.len());
        }

        let SmoothingParams {
            noise_threshold,
            transition_speed,
            smoothing_factor,
            center,
        } = self.params;

        for (i, &sample) in samples.iter().enumerate() {
            let value = sample as f32;
            self.target[i] = if (value - center).abs() < noise_threshold {
                center
            } else {
                value
            };

            self.last[i] += (self.target[i] - self.last[i]) * transition_speed;
            self.smoothed[i] =
                self.smoothed[i] * smoothing_factor + self.last[i] * (1.0 - smoothing_factor);
        }

        &self.smoothed
    }

    /// Current smoothed values
    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    /// Noise-gated targets from the latest frame
    pub fn target(&self) -> &[f32] {
        &self.target
    }

    /// Lag-filter stage
    pub fn last(&self) -> &[f32] {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn smoother(len: usize) -> SignalSmoother {
        SignalSmoother::new(len, SmoothingParams::default())
    }

    #[test]
    fn test_starts_neutral() {
        let s = smoother(16);
        assert_eq!(s.len(), 16);
        assert!(s.smoothed().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_single_frame_step() {
        let mut s = smoother(1);
        let out = s.smooth(&[228]);
        // last = 128 + 100 * 0.4 = 168, smoothed = 128 * 0.6 + 168 * 0.4 = 144
        assert_relative_eq!(out[0], 144.0, epsilon = 1e-4);
        assert_relative_eq!(s.last()[0], 168.0, epsilon = 1e-4);
        assert_relative_eq!(s.target()[0], 228.0);
    }

    #[test]
    fn test_resize_resets_to_neutral() {
        let mut s = smoother(4);
        s.smooth(&[255, 255, 255, 255]);
        let out = s.smooth(&[128; 8]);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_smoothed_stays_between_previous_and_last() {
        let mut s = smoother(3);
        for frame in 0..20u8 {
            let before: Vec<f32> = s.smoothed().to_vec();
            let input = [frame * 12, 255 - frame * 12, 128];
            s.smooth(&input);
            for i in 0..3 {
                let lo = before[i].min(s.last()[i]);
                let hi = before[i].max(s.last()[i]);
                assert!(s.smoothed()[i] >= lo - 1e-4 && s.smoothed()[i] <= hi + 1e-4);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_noise_gate_snaps_to_center(value in 127u8..=129) {
            let mut s = smoother(1);
            s.smooth(&[value]);
            prop_assert_eq!(s.target()[0], 128.0);
        }

        #[test]
        fn prop_constant_input_converges_monotonically(k in 0u8..=255) {
            let mut s = smoother(2);
            let expected = if (k as f32 - 128.0).abs() < 2.0 { 128.0 } else { k as f32 };
            let mut prev_err = f32::INFINITY;
            for _ in 0..60 {
                s.smooth(&[k, k]);
                let err = (s.smoothed()[0] - expected).abs();
                prop_assert!(err <= prev_err + 1e-4);
                prev_err = err;
            }
            prop_assert!(prev_err < 1e-2);
        }
    }
}
