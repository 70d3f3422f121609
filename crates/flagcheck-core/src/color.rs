use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest possible Euclidean distance between two RGB triples,
/// i.e. between black and white: sqrt(3 * 255^2).
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// One RGB colour sample, each channel in [0, 255].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to `other` in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Distance to `other` as a rounded percentage of [`MAX_RGB_DISTANCE`],
    /// clamped to [0, 100]. Symmetric, and zero for identical samples.
    pub fn deviation_percent(self, other: Rgb) -> u8 {
        let pct = (self.distance(other) / MAX_RGB_DISTANCE * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Mean of the three channels, the brightness measure used when walking
    /// the spoke sampling circle.
    pub fn luminance(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
