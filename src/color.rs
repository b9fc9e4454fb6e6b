//! HSL colors with the wrapping/clamping rules every style relies on.

/// Hue/saturation/lightness/alpha color
///
/// Construction normalizes the components: hue wraps into [0, 360),
/// saturation and lightness clamp to [0, 100] (percent), alpha to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self {
            h: wrap_hue(h),
            s: clamp_or(s, 0.0, 100.0, 0.0),
            l: clamp_or(l, 0.0, 100.0, 0.0),
            a: clamp_or(a, 0.0, 1.0, 0.0),
        }
    }

    /// Opaque black
    pub const BLACK: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 1.0,
    };

    /// Fully transparent black
    pub const TRANSPARENT: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 0.0,
    };

    /// Build from 8-bit RGB and an alpha
    pub fn from_rgb(r: u8, g: u8, b: u8, a: f32) -> Self {
        let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d <= f32::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0, a);
        }
        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        Self::new(h, s * 100.0, l * 100.0, a)
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.h, self.s, self.l, a)
    }

    /// Convert to straight (non-premultiplied) RGBA in [0, 1]
    pub fn to_rgba(self) -> [f32; 4] {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = self.h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        [
            (r + m).clamp(0.0, 1.0),
            (g + m).clamp(0.0, 1.0),
            (b + m).clamp(0.0, 1.0),
            self.a,
        ]
    }
}

/// Wrap a hue into [0, 360)
pub fn wrap_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp an opacity into [0, 1]
pub fn clamp_alpha(a: f32) -> f32 {
    clamp_or(a, 0.0, 1.0, 0.0)
}

fn clamp_or(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hue_wraps() {
        assert_relative_eq!(Hsla::new(370.0, 50.0, 50.0, 1.0).h, 10.0);
        assert_relative_eq!(Hsla::new(-30.0, 50.0, 50.0, 1.0).h, 330.0);
        assert_relative_eq!(Hsla::new(720.0, 50.0, 50.0, 1.0).h, 0.0);
    }

    #[test]
    fn test_components_clamp() {
        let c = Hsla::new(10.0, 120.0, 110.0, 1.4);
        assert_eq!(c.s, 100.0);
        assert_eq!(c.l, 100.0);
        assert_eq!(c.a, 1.0);
        assert_eq!(Hsla::new(0.0, 0.0, 0.0, -0.5).a, 0.0);
        assert_eq!(clamp_alpha(f32::NAN), 0.0);
    }

    #[test]
    fn test_primary_conversions() {
        let red = Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgba();
        assert_relative_eq!(red[0], 1.0);
        assert_relative_eq!(red[1], 0.0);
        assert_relative_eq!(red[2], 0.0);

        let cyan = Hsla::new(180.0, 100.0, 50.0, 0.5).to_rgba();
        assert_relative_eq!(cyan[0], 0.0);
        assert_relative_eq!(cyan[1], 1.0);
        assert_relative_eq!(cyan[2], 1.0);
        assert_relative_eq!(cyan[3], 0.5);

        let white = Hsla::new(42.0, 80.0, 100.0, 1.0).to_rgba();
        assert_relative_eq!(white[0], 1.0);
        assert_relative_eq!(white[2], 1.0);
    }

    #[test]
    fn test_from_rgb_round_trip_cyan() {
        let c = Hsla::from_rgb(0, 255, 255, 0.3);
        assert_relative_eq!(c.h, 180.0, epsilon = 1e-3);
        assert_relative_eq!(c.s, 100.0, epsilon = 1e-3);
        assert_relative_eq!(c.l, 50.0, epsilon = 1e-3);
        assert_relative_eq!(c.a, 0.3);
    }
}
