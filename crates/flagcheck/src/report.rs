use crate::params::BisColors;
use serde::{Deserialize, Serialize};

/// Pass/fail verdict of one criterion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Pass,
    Fail,
}

impl CriterionStatus {
    #[inline]
    pub fn is_pass(self) -> bool {
        self == CriterionStatus::Pass
    }
}

impl From<bool> for CriterionStatus {
    fn from(pass: bool) -> Self {
        if pass {
            CriterionStatus::Pass
        } else {
            CriterionStatus::Fail
        }
    }
}

/// Width/height ratio check. `actual` and `expected` carry two decimals,
/// `deviation` one decimal plus a percent sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatioCheck {
    pub status: CriterionStatus,
    pub actual: String,
    pub expected: String,
    pub deviation: String,
}

/// One colour-match check; `actual`/`expected` are `rgb(r, g, b)` strings
/// and `deviation` an integer percentage of the maximum RGB distance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCheck {
    pub status: CriterionStatus,
    pub deviation: String,
    pub actual: String,
    pub expected: String,
}

/// Colour checks for all four flag elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChecks {
    pub saffron: ColorCheck,
    pub white: ColorCheck,
    pub green: ColorCheck,
    pub chakra_blue: ColorCheck,
}

/// Band height proportions, three decimals each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeProportionCheck {
    pub status: CriterionStatus,
    pub saffron: String,
    pub white: String,
    pub green: String,
    pub expected: String,
    pub deviation: String,
}

/// Emblem placement check; offsets as `<n>px`, centers as `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChakraPositionCheck {
    pub status: CriterionStatus,
    pub offset_x: String,
    pub offset_y: String,
    pub center: String,
    pub expected_center: String,
}

/// Spoke-count check with a linear confidence score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChakraSpokesCheck {
    pub status: CriterionStatus,
    pub detected: u32,
    pub expected: u32,
    pub confidence: u32,
}

/// Input image metadata echoed into the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub file_size: String,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32, file_size_bytes: u64) -> Self {
        Self {
            width,
            height,
            file_size: format_megabytes(file_size_bytes),
        }
    }
}

/// `<n.nn> MB` rendering used for the report's file size field.
pub(crate) fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Aggregated validation result: one entry per criterion plus image
/// metadata and an optional error string.
///
/// Built fresh per validation and never mutated afterwards; serializes
/// verbatim as the exported JSON report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub aspect_ratio: AspectRatioCheck,
    pub colors: ColorChecks,
    pub stripe_proportion: StripeProportionCheck,
    pub chakra_position: ChakraPositionCheck,
    pub chakra_spokes: ChakraSpokesCheck,
    pub image_info: ImageInfo,
    pub error: Option<String>,
}

impl ValidationReport {
    /// Report with every criterion at its default-fail value.
    pub fn default_fail(reference: &BisColors) -> Self {
        let color_fail = |expected: &str| ColorCheck {
            status: CriterionStatus::Fail,
            deviation: "100%".to_owned(),
            actual: "rgb(0, 0, 0)".to_owned(),
            expected: expected.to_owned(),
        };

        Self {
            aspect_ratio: AspectRatioCheck {
                status: CriterionStatus::Fail,
                actual: "0.00".to_owned(),
                expected: "1.50".to_owned(),
                deviation: "100%".to_owned(),
            },
            colors: ColorChecks {
                saffron: color_fail(&reference.saffron.to_string()),
                white: color_fail(&reference.white.to_string()),
                green: color_fail(&reference.green.to_string()),
                chakra_blue: color_fail(&reference.chakra_blue.to_string()),
            },
            stripe_proportion: StripeProportionCheck {
                status: CriterionStatus::Fail,
                saffron: "0.000".to_owned(),
                white: "0.000".to_owned(),
                green: "0.000".to_owned(),
                expected: "0.333".to_owned(),
                deviation: "0.333".to_owned(),
            },
            chakra_position: ChakraPositionCheck {
                status: CriterionStatus::Fail,
                offset_x: "0px".to_owned(),
                offset_y: "0px".to_owned(),
                center: "(0, 0)".to_owned(),
                expected_center: "(0, 0)".to_owned(),
            },
            chakra_spokes: ChakraSpokesCheck {
                status: CriterionStatus::Fail,
                detected: 0,
                expected: 24,
                confidence: 0,
            },
            image_info: ImageInfo::new(0, 0, 0),
            error: None,
        }
    }

    /// Default-fail report carrying an error message, for callers that must
    /// emit a structured report even when no analysis ran.
    pub fn failure(reference: &BisColors, message: impl Into<String>, info: ImageInfo) -> Self {
        Self {
            image_info: info,
            error: Some(message.into()),
            ..Self::default_fail(reference)
        }
    }

    /// Every criterion status in report order: aspect ratio, the four
    /// colours, stripe proportions, emblem position, spoke count.
    pub fn statuses(&self) -> [CriterionStatus; 8] {
        [
            self.aspect_ratio.status,
            self.colors.saffron.status,
            self.colors.white.status,
            self.colors.green.status,
            self.colors.chakra_blue.status,
            self.stripe_proportion.status,
            self.chakra_position.status,
            self.chakra_spokes.status,
        ]
    }

    /// Number of passing criteria (out of [`Self::criteria_total`]).
    pub fn passed_criteria(&self) -> usize {
        self.statuses().iter().filter(|s| s.is_pass()).count()
    }

    /// Total number of criterion statuses in the report.
    pub const fn criteria_total() -> usize {
        8
    }

    /// True when every criterion passes and no error was recorded.
    pub fn is_fully_compliant(&self) -> bool {
        self.error.is_none() && self.statuses().iter().all(|s| s.is_pass())
    }
}
