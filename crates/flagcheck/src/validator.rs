use crate::emblem::locate_emblem;
use crate::params::ValidatorParams;
use crate::report::{
    AspectRatioCheck, ChakraPositionCheck, ChakraSpokesCheck, ColorCheck, ColorChecks, ImageInfo,
    StripeProportionCheck, ValidationReport,
};
use crate::sample::sample_region_color;
use crate::spokes::count_spokes;
use crate::stripes::{detect_stripe_regions, Region, StripeLayout};
use flagcheck_core::{Rgb, RgbaImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Single-image flag validator.
///
/// Holds one immutable parameter set and runs the full pipeline per call:
/// stripe segmentation, band colour sampling, emblem localisation, spoke
/// counting, then threshold checks into a [`ValidationReport`]. `validate`
/// is total: every input yields a structurally complete report.
pub struct FlagValidator {
    params: ValidatorParams,
}

impl FlagValidator {
    pub fn new(params: ValidatorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ValidatorParams {
        &self.params
    }

    /// Run the full analysis over a decoded RGBA view.
    ///
    /// `file_size_bytes` is echoed into the report's image metadata; pass 0
    /// when the source size is unknown.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, view), fields(width = view.width, height = view.height))
    )]
    pub fn validate(&self, view: &RgbaImageView<'_>, file_size_bytes: u64) -> ValidationReport {
        let p = &self.params;
        let mut report = ValidationReport::default_fail(&p.reference);
        report.image_info = ImageInfo::new(view.width as u32, view.height as u32, file_size_bytes);

        report.aspect_ratio = self.check_aspect_ratio(view);

        let layout = detect_stripe_regions(view, &p.stripes);

        let saffron = sample_region_color(view, &layout.saffron);
        let white = sample_region_color(view, &layout.white);
        let green = sample_region_color(view, &layout.green);

        let emblem = locate_emblem(view, &layout.white, layout.is_valid_flag, &p.emblem);

        report.colors = ColorChecks {
            saffron: self.check_color(saffron, p.reference.saffron, p.checks.max_saffron_deviation),
            white: self.check_color(white, p.reference.white, p.checks.max_white_deviation),
            green: self.check_color(green, p.reference.green, p.checks.max_green_deviation),
            chakra_blue: self.check_color(
                emblem.color,
                p.reference.chakra_blue,
                p.checks.max_chakra_blue_deviation,
            ),
        };

        report.stripe_proportion = self.check_proportions(&layout, view.height);
        report.chakra_position = ChakraPositionCheck {
            status: (emblem.center_offset() < p.checks.max_center_offset_px).into(),
            offset_x: format!("{}px", emblem.center.x - emblem.expected_center.x),
            offset_y: format!("{}px", emblem.center.y - emblem.expected_center.y),
            center: format!("({}, {})", emblem.center.x, emblem.center.y),
            expected_center: format!(
                "({}, {})",
                emblem.expected_center.x, emblem.expected_center.y
            ),
        };

        let detected = count_spokes(view, emblem.center, emblem.radius, &p.spokes);
        let spoke_error = detected.abs_diff(p.checks.expected_spokes);
        report.chakra_spokes = ChakraSpokesCheck {
            status: (spoke_error <= p.checks.spoke_tolerance).into(),
            detected,
            expected: p.checks.expected_spokes,
            confidence: 100u32.saturating_sub(4 * spoke_error),
        };

        log::info!(
            "validated {}x{} image: {} of {} criteria passed",
            view.width,
            view.height,
            report.passed_criteria(),
            ValidationReport::criteria_total()
        );

        report
    }

    fn check_aspect_ratio(&self, view: &RgbaImageView<'_>) -> AspectRatioCheck {
        let checks = &self.params.checks;
        if view.height == 0 {
            // Degenerate input keeps the default-fail entry.
            return AspectRatioCheck {
                status: false.into(),
                actual: "0.00".to_owned(),
                expected: format!("{:.2}", checks.aspect_expected),
                deviation: "100%".to_owned(),
            };
        }

        let ratio = view.width as f64 / view.height as f64;
        let pass = (ratio - checks.aspect_expected).abs() <= checks.aspect_tolerance;
        let relative = ((ratio - checks.aspect_expected) / checks.aspect_expected * 100.0).abs();
        AspectRatioCheck {
            status: pass.into(),
            actual: format!("{ratio:.2}"),
            expected: format!("{:.2}", checks.aspect_expected),
            deviation: format!("{relative:.1}%"),
        }
    }

    fn check_color(&self, actual: Rgb, expected: Rgb, max_deviation: u8) -> ColorCheck {
        let deviation = actual.deviation_percent(expected);
        ColorCheck {
            status: (deviation <= max_deviation).into(),
            deviation: format!("{deviation}%"),
            actual: actual.to_string(),
            expected: expected.to_string(),
        }
    }

    fn check_proportions(&self, layout: &StripeLayout, height: usize) -> StripeProportionCheck {
        let tolerance = self.params.checks.proportion_tolerance;
        let proportion = |region: &Region| {
            if height > 0 {
                region.len() as f64 / height as f64
            } else {
                0.0
            }
        };

        let saffron = proportion(&layout.saffron);
        let white = proportion(&layout.white);
        let green = proportion(&layout.green);

        let third = 1.0 / 3.0;
        let worst = (saffron - third)
            .abs()
            .max((white - third).abs())
            .max((green - third).abs());
        let pass = (saffron - third).abs() < tolerance
            && (white - third).abs() < tolerance
            && (green - third).abs() < tolerance;

        StripeProportionCheck {
            status: pass.into(),
            saffron: format!("{saffron:.3}"),
            white: format!("{white:.3}"),
            green: format!("{green:.3}"),
            expected: format!("{third:.3}"),
            deviation: format!("{worst:.3}"),
        }
    }
}
