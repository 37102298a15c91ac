//! Viridis color ramp and value normalisation for chart coloring.
//!
//! The ramp is defined by evenly spaced sRGB control points taken from the
//! matplotlib original and interpolated linearly in between.

use std::fmt;

use serde::{Serialize, Serializer};

/// 8-bit sRGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A continuous color ramp over `[0, 1]`.
pub struct ColorRamp {
    points: &'static [Rgb],
}

impl ColorRamp {
    /// Sample the ramp at `t`, clamped to `[0, 1]`. NaN maps to the start.
    pub fn sample(&self, t: f64) -> Rgb {
        let n = self.points.len();
        if n == 0 {
            return Rgb(0, 0, 0);
        }
        if n == 1 || t.is_nan() {
            return self.points[0];
        }
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (n - 1) as f64;
        let lo = (scaled as usize).min(n - 2);
        let frac = scaled - lo as f64;
        let (a, b) = (self.points[lo], self.points[lo + 1]);
        let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
        Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// `count` colors evenly spaced over the whole ramp, first to last.
    /// A single color is the start of the ramp.
    pub fn sample_evenly(&self, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

// Viridis at t = 0.0, 0.1, ..., 1.0.
pub static VIRIDIS: ColorRamp = ColorRamp {
    points: &[
        Rgb(0x44, 0x01, 0x54), // dark purple
        Rgb(0x48, 0x24, 0x75),
        Rgb(0x41, 0x44, 0x87),
        Rgb(0x35, 0x5f, 0x8d),
        Rgb(0x2a, 0x78, 0x8e),
        Rgb(0x21, 0x91, 0x8c), // teal
        Rgb(0x22, 0xa8, 0x84),
        Rgb(0x44, 0xbf, 0x70),
        Rgb(0x7a, 0xd1, 0x51),
        Rgb(0xbd, 0xdf, 0x26),
        Rgb(0xfd, 0xe7, 0x25), // yellow
    ],
};

/// Linear map of `value` from `[min, max]` onto `[0, 1]`.
///
/// Returns `None` when the range is empty (`max <= min`); callers pick
/// their own constant in that case.
pub fn normalize(value: f64, min: f64, max: f64) -> Option<f64> {
    if max > min {
        Some(((value - min) / (max - min)).clamp(0.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(VIRIDIS.sample(0.0), Rgb(0x44, 0x01, 0x54));
        assert_eq!(VIRIDIS.sample(0.5), Rgb(0x21, 0x91, 0x8c));
        assert_eq!(VIRIDIS.sample(1.0), Rgb(0xfd, 0xe7, 0x25));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(VIRIDIS.sample(-3.0), VIRIDIS.sample(0.0));
        assert_eq!(VIRIDIS.sample(7.0), VIRIDIS.sample(1.0));
        assert_eq!(VIRIDIS.sample(f64::NAN), VIRIDIS.sample(0.0));
    }

    #[test]
    fn interpolates_between_control_points() {
        // halfway between 0.2 and 0.3
        assert_eq!(VIRIDIS.sample(0.25), Rgb(0x3b, 0x52, 0x8a));
    }

    #[test]
    fn even_samples_depend_only_on_count() {
        assert!(VIRIDIS.sample_evenly(0).is_empty());
        assert_eq!(VIRIDIS.sample_evenly(1), vec![VIRIDIS.sample(0.0)]);
        let five = VIRIDIS.sample_evenly(5);
        assert_eq!(five.len(), 5);
        assert_eq!(five[0], VIRIDIS.sample(0.0));
        assert_eq!(five[2], VIRIDIS.sample(0.5));
        assert_eq!(five[4], VIRIDIS.sample(1.0));
    }

    #[test]
    fn hex_display() {
        assert_eq!(Rgb(0x44, 0x01, 0x54).to_string(), "#440154");
        assert_eq!(serde_json::to_string(&Rgb(255, 0, 16)).unwrap(), "\"#ff0010\"");
    }

    #[test]
    fn normalize_guards_empty_range() {
        assert_eq!(normalize(5.0, 0.0, 10.0), Some(0.5));
        assert_eq!(normalize(5.0, 5.0, 5.0), None);
        assert_eq!(normalize(95.0, 95.0, 100.0), Some(0.0));
    }
}
