use flagcheck_core::Rgb;
use serde::{Deserialize, Serialize};

/// BIS reference colours for the four flag elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BisColors {
    pub saffron: Rgb,
    pub white: Rgb,
    pub green: Rgb,
    pub chakra_blue: Rgb,
}

impl Default for BisColors {
    fn default() -> Self {
        Self {
            saffron: Rgb::new(255, 153, 51),
            white: Rgb::new(255, 255, 255),
            green: Rgb::new(19, 136, 8),
            chakra_blue: Rgb::new(0, 0, 128),
        }
    }
}

/// Scan-line voting parameters for the stripe region detector.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StripeScanParams {
    /// Upper bound on evenly spaced horizontal scan lines (capped by image height).
    pub max_scan_lines: usize,
    /// Approximate number of classified samples per scan line.
    pub samples_per_line: usize,
    /// Fraction of the width skipped on each side before sampling.
    pub horizontal_margin: f64,
    /// A line's dominant colour must win at least this share of its votes.
    pub min_line_confidence: f64,
    /// Minimum share of tricolour votes for a line to count as flag-coloured.
    pub min_flag_color_ratio: f64,
    /// Minimum fraction of valid lines for the image to count as flag-like.
    pub min_flag_like_ratio: f64,
}

impl Default for StripeScanParams {
    fn default() -> Self {
        Self {
            max_scan_lines: 50,
            samples_per_line: 25,
            horizontal_margin: 0.1,
            min_line_confidence: 0.4,
            min_flag_color_ratio: 0.6,
            min_flag_like_ratio: 0.6,
        }
    }
}

/// Grid-search parameters for the emblem locator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EmblemSearchParams {
    /// Search half-extent around the expected center, as a fraction of
    /// min(width, height).
    pub search_radius_frac: f64,
    /// The candidate grid step is search radius divided by this (at least 1 px).
    pub search_steps: usize,
    /// Half-extent of the scoring window per candidate, as a fraction of
    /// min(width, height).
    pub window_radius_frac: f64,
    /// Constant added to `b - max(r, g)` for every blue pixel in the window.
    pub blue_score_offset: f64,
    /// A candidate needs more than this many blue pixels in its window.
    pub min_window_blue_pixels: usize,
    /// The emblem counts as found when the accumulated blue-pixel count
    /// exceeds this fraction of the image area.
    pub min_blue_area_frac: f64,
    /// Assumed emblem radius as a fraction of min(width, height).
    ///
    /// The radius is never searched, only derived; the spoke sampling circle
    /// depends on this assumption.
    pub emblem_radius_frac: f64,
}

impl Default for EmblemSearchParams {
    fn default() -> Self {
        Self {
            search_radius_frac: 0.15,
            search_steps: 20,
            window_radius_frac: 0.04,
            blue_score_offset: 50.0,
            min_window_blue_pixels: 5,
            min_blue_area_frac: 0.001,
            emblem_radius_frac: 0.08,
        }
    }
}

/// Parameters for the radial spoke counter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpokeCountParams {
    /// Angular step of the sampling circle, in degrees.
    pub angle_step_deg: usize,
    /// Minimum luminance delta between consecutive samples to count as a
    /// spoke-edge transition.
    pub luminance_delta: f64,
    /// Estimates above the spoke maximum are scaled down by this factor.
    pub overshoot_scale: f64,
    /// Estimates below `undershoot_below` are scaled up by this factor.
    pub undershoot_scale: f64,
    /// Threshold under which the undershoot correction applies.
    pub undershoot_below: i64,
    /// Final estimate is clamped to [`min_spokes`, `max_spokes`].
    pub min_spokes: u32,
    pub max_spokes: u32,
}

impl Default for SpokeCountParams {
    fn default() -> Self {
        Self {
            angle_step_deg: 2,
            luminance_delta: 25.0,
            overshoot_scale: 0.8,
            undershoot_scale: 1.5,
            undershoot_below: 10,
            min_spokes: 1,
            max_spokes: 24,
        }
    }
}

/// Per-criterion pass thresholds for the aggregated report.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CheckThresholds {
    /// Expected width / height ratio.
    pub aspect_expected: f64,
    /// Absolute tolerance on the aspect ratio (not relative).
    pub aspect_tolerance: f64,
    /// Maximum colour deviation percentages per element.
    pub max_saffron_deviation: u8,
    pub max_white_deviation: u8,
    pub max_green_deviation: u8,
    pub max_chakra_blue_deviation: u8,
    /// Each band's height/total-height must be within this of 1/3.
    pub proportion_tolerance: f64,
    /// Maximum Euclidean offset between located and expected center, pixels.
    pub max_center_offset_px: f64,
    /// Expected spoke count and its absolute tolerance.
    pub expected_spokes: u32,
    pub spoke_tolerance: u32,
}

impl Default for CheckThresholds {
    fn default() -> Self {
        Self {
            aspect_expected: 1.5,
            aspect_tolerance: 0.05,
            max_saffron_deviation: 20,
            max_white_deviation: 15,
            max_green_deviation: 20,
            max_chakra_blue_deviation: 25,
            proportion_tolerance: 0.08,
            max_center_offset_px: 30.0,
            expected_spokes: 24,
            spoke_tolerance: 3,
        }
    }
}

/// Full read-only configuration for one [`FlagValidator`](crate::FlagValidator).
///
/// All constants of the pipeline live here; the validator holds one immutable
/// copy and nothing is tuned at runtime.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ValidatorParams {
    #[serde(default)]
    pub reference: BisColors,
    #[serde(default)]
    pub stripes: StripeScanParams,
    #[serde(default)]
    pub emblem: EmblemSearchParams,
    #[serde(default)]
    pub spokes: SpokeCountParams,
    #[serde(default)]
    pub checks: CheckThresholds,
}
