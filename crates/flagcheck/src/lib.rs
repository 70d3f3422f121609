//! Heuristic single-pass validator for raster images of the flag of India.
//!
//! The pipeline is strictly sequential: decode an image into an RGBA buffer,
//! segment it into the three horizontal bands with colour-voting scan lines,
//! sample a robust colour per band, locate the Ashoka Chakra by searching
//! for the strongest blue disc on the white band, count its spokes on a
//! sampling circle, and fold everything into a [`ValidationReport`] with one
//! pass/fail entry per criterion.
//!
//! Every detector is a total function: malformed input (empty buffers, zero
//! dimensions, degenerate regions) degrades to a documented default value
//! instead of failing. Only the decode stage can reject an input outright.
//!
//! ## Quickstart
//!
//! ```no_run
//! use flagcheck::{FlagValidator, ValidatorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = FlagValidator::new(ValidatorParams::default());
//! let report = flagcheck::decode::validate_image_file("flag.png", &validator)?;
//! println!(
//!     "{} of {} criteria passed",
//!     report.passed_criteria(),
//!     flagcheck::ValidationReport::criteria_total()
//! );
//! # Ok(())
//! # }
//! ```

mod emblem;
mod error;
mod io;
mod params;
mod report;
mod sample;
mod spokes;
mod stripes;
mod validator;

#[cfg(feature = "image")]
pub mod decode;

pub use emblem::{locate_emblem, EmblemLocation};
pub use error::{DecodeError, MIN_DIMENSION};
pub use io::{ReportIoError, ValidateConfig};
pub use params::{
    BisColors, CheckThresholds, EmblemSearchParams, SpokeCountParams, StripeScanParams,
    ValidatorParams,
};
pub use report::{
    AspectRatioCheck, ChakraPositionCheck, ChakraSpokesCheck, ColorCheck, ColorChecks,
    CriterionStatus, ImageInfo, StripeProportionCheck, ValidationReport,
};
pub use sample::sample_region_color;
pub use spokes::count_spokes;
pub use stripes::{detect_stripe_regions, Region, StripeLayout};
pub use validator::FlagValidator;

pub use flagcheck_core::{classify, FlagColor, Rgb, RgbaImageView};
