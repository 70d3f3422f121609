use crate::params::EmblemSearchParams;
use crate::stripes::Region;
use flagcheck_core::{classify, FlagColor, Rgb, RgbaImageView};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Located (or assumed) emblem disc.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EmblemLocation {
    /// Chosen center in pixel coordinates.
    pub center: Point2<i64>,
    /// Colour sampled at the chosen center pixel.
    pub color: Rgb,
    /// Assumed radius (a fixed fraction of the smaller image dimension).
    pub radius: f64,
    /// Where the center should be: horizontal middle of the image, vertical
    /// midpoint of the white band.
    pub expected_center: Point2<i64>,
    /// True when enough blue pixels were seen across the search.
    pub found: bool,
    /// Accumulated blue-pixel count over all candidate windows; raw
    /// confidence signal behind `found`.
    pub blue_pixel_count: usize,
}

impl EmblemLocation {
    /// Euclidean offset between the located and expected centers.
    pub fn center_offset(&self) -> f64 {
        let dx = (self.center.x - self.expected_center.x) as f64;
        let dy = (self.center.y - self.expected_center.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    fn not_found(view: &RgbaImageView<'_>, params: &EmblemSearchParams) -> Self {
        let center = Point2::new(view.width as i64 / 2, view.height as i64 / 2);
        Self {
            center,
            color: Rgb::new(0, 0, 128),
            radius: view.width.min(view.height) as f64 * params.emblem_radius_frac,
            expected_center: center,
            found: false,
            blue_pixel_count: 0,
        }
    }
}

/// Locate the emblem disc on the white band.
///
/// Grid search over candidate centers within a fraction of the smaller image
/// dimension around the expected position. Each candidate is scored by the
/// average blueness of a small window: `b - max(r, g)` plus a constant
/// offset, summed over blue-classified pixels and divided by all window
/// samples. The candidate with the highest average that also holds more
/// than a handful of blue pixels wins; the initial expected center stands
/// when nothing beats it.
///
/// Returns the image-center default flagged not-found when the stripe gate
/// failed or the view/band is degenerate. The radius is always the fixed
/// fraction of the image, never measured.
pub fn locate_emblem(
    view: &RgbaImageView<'_>,
    white_region: &Region,
    is_valid_flag: bool,
    params: &EmblemSearchParams,
) -> EmblemLocation {
    if !view.is_complete() || !is_valid_flag || white_region.is_empty() {
        return EmblemLocation::not_found(view, params);
    }

    let width = view.width as i64;
    let height = view.height as i64;
    let min_dim = view.width.min(view.height) as f64;

    let expected = Point2::new(width / 2, white_region.mid() as i64);
    let search_radius = min_dim * params.search_radius_frac;
    let step = ((search_radius / params.search_steps as f64).floor() as i64).max(1);
    let window_radius = (min_dim * params.window_radius_frac).floor() as i64;

    let mut best_center = expected;
    let mut best_score = 0.0f64;
    let mut total_blue = 0usize;

    let cy_lo = (expected.y as f64 - search_radius).max(0.0) as i64;
    let cy_hi = ((expected.y as f64 + search_radius) as i64).min(height - 1);
    let cx_lo = (expected.x as f64 - search_radius).max(0.0) as i64;
    let cx_hi = ((expected.x as f64 + search_radius) as i64).min(width - 1);

    let mut cy = cy_lo;
    while cy <= cy_hi {
        let mut cx = cx_lo;
        while cx <= cx_hi {
            let mut blue_score = 0.0f64;
            let mut local_blue = 0usize;
            let mut samples = 0usize;

            for ty in (cy - window_radius).max(0)..=(cy + window_radius).min(height - 1) {
                for tx in (cx - window_radius).max(0)..=(cx + window_radius).min(width - 1) {
                    let px = view.rgb_at(tx, ty);
                    if classify(px) == FlagColor::Blue {
                        blue_score +=
                            f64::from(px.b) - f64::from(px.r.max(px.g)) + params.blue_score_offset;
                        local_blue += 1;
                    }
                    samples += 1;
                }
            }

            total_blue += local_blue;

            if samples > 0 && local_blue > params.min_window_blue_pixels {
                let avg = blue_score / samples as f64;
                if avg > best_score {
                    best_score = avg;
                    best_center = Point2::new(cx, cy);
                }
            }

            cx += step;
        }
        cy += step;
    }

    let found = total_blue as f64 > (view.width * view.height) as f64 * params.min_blue_area_frac;

    log::debug!(
        "emblem search: best=({}, {}) score={:.2} blue_pixels={} found={}",
        best_center.x,
        best_center.y,
        best_score,
        total_blue,
        found
    );

    EmblemLocation {
        center: best_center,
        color: view.rgb_at(best_center.x, best_center.y),
        radius: min_dim * params.emblem_radius_frac,
        expected_center: expected,
        found,
        blue_pixel_count: total_blue,
    }
}
