use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// Colour class of a single pixel.
///
/// The first three are the tricolour bands, `Blue` marks emblem pixels and
/// everything else lands in `Unknown`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagColor {
    Saffron,
    White,
    Green,
    Blue,
    Unknown,
}

impl FlagColor {
    /// All classes in tally enumeration order. Scan-line voting breaks ties
    /// by the first-encountered key in this order.
    pub const ALL: [FlagColor; 5] = [
        FlagColor::Saffron,
        FlagColor::White,
        FlagColor::Green,
        FlagColor::Blue,
        FlagColor::Unknown,
    ];

    /// True for the three stripe colours.
    #[inline]
    pub fn is_stripe(self) -> bool {
        matches!(self, FlagColor::Saffron | FlagColor::White | FlagColor::Green)
    }
}

/// Classify one pixel into a [`FlagColor`].
///
/// Total function: every RGB triple maps to exactly one class. Rules are
/// checked in fixed priority order white, saffron, green, blue; the
/// threshold bands are chosen so that no triple satisfies two rules.
pub fn classify(px: Rgb) -> FlagColor {
    let (r, g, b) = (i32::from(px.r), i32::from(px.g), i32::from(px.b));

    // Near-neutral bright pixels: all channels high and close together.
    if r > 220
        && g > 220
        && b > 220
        && (r - g).abs() < 20
        && (g - b).abs() < 20
        && (r - b).abs() < 20
    {
        return FlagColor::White;
    }

    // Saffron band: strong red, mid green, low blue, strictly ordered.
    if (200..=255).contains(&r)
        && (100..=180).contains(&g)
        && (20..=80).contains(&b)
        && r > g
        && g > b
        && r - g > 50
    {
        return FlagColor::Saffron;
    }

    // Green band: green dominant over both low red and low blue.
    if (100..=200).contains(&g)
        && (10..=80).contains(&r)
        && (5..=50).contains(&b)
        && g > r
        && g > b
        && g - r > 40
    {
        return FlagColor::Green;
    }

    // Emblem blue: four disjunctive bands covering navy through lighter
    // renderings, each requiring blue dominance in some combination.
    let is_blue = (b >= 100 && b <= 180 && r <= 50 && g <= 50)
        || (b >= 120 && b <= 220 && r <= 100 && g <= 120 && b > r.max(g))
        || (b >= 150 && r >= 80 && r <= 180 && g >= 100 && g <= 200 && b > r && b > g)
        || (b >= 180 && r <= 100 && g >= 100 && g <= 200 && b > r);

    if is_blue {
        return FlagColor::Blue;
    }

    FlagColor::Unknown
}
