use crate::stripes::Region;
use flagcheck_core::{Rgb, RgbaImageView};

/// Neutral fallback colour for degenerate input.
const FALLBACK: Rgb = Rgb::new(128, 128, 128);

/// Sample a robust colour from a band.
///
/// Draws a grid of samples from the region's middle 50% vertically and the
/// central 60% of the width, then takes the per-channel median. The median
/// keeps localized artifacts (for example the emblem bleeding into the white
/// band) from skewing the estimate. Degenerate regions and malformed views
/// yield neutral gray.
pub fn sample_region_color(view: &RgbaImageView<'_>, region: &Region) -> Rgb {
    if !view.is_complete() {
        return FALLBACK;
    }
    if region.is_empty() || region.end > view.height {
        return FALLBACK;
    }

    let width = view.width;
    let height = view.height;
    let region_height = region.len();

    let quarter = region_height as f64 * 0.25;
    let mut start_y = (region.start as f64 + quarter).floor() as usize;
    let mut end_y = (region.end as f64 - quarter).floor() as usize;
    let mut start_x = (width as f64 * 0.2).floor() as usize;
    let mut end_x = (width as f64 * 0.8).floor() as usize;

    start_y = start_y.min(height - 1);
    end_y = end_y.min(height - 1);
    start_x = start_x.min(width - 1);
    end_x = end_x.min(width - 1);

    if start_y >= end_y || start_x >= end_x {
        return FALLBACK;
    }

    let step_y = (region_height / 10).max(1);
    let step_x = (width / 15).max(1);

    let mut reds = Vec::new();
    let mut greens = Vec::new();
    let mut blues = Vec::new();

    let mut y = start_y;
    while y < end_y {
        let mut x = start_x;
        while x < end_x {
            let px = view.rgb_at(x as i64, y as i64);
            reds.push(px.r);
            greens.push(px.g);
            blues.push(px.b);
            x += step_x;
        }
        y += step_y;
    }

    if reds.is_empty() {
        return FALLBACK;
    }

    Rgb::new(median(&mut reds), median(&mut greens), median(&mut blues))
}

/// Middle value of the sorted samples (upper median for even counts).
fn median(values: &mut [u8]) -> u8 {
    values.sort_unstable();
    values[values.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, color: Rgb) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        data
    }

    #[test]
    fn uniform_region_returns_its_colour() {
        let color = Rgb::new(255, 153, 51);
        let data = solid(60, 60, color);
        let view = RgbaImageView {
            width: 60,
            height: 60,
            data: &data,
        };
        assert_eq!(sample_region_color(&view, &Region::new(0, 60)), color);
    }

    #[test]
    fn median_shrugs_off_a_contaminated_center() {
        // White band with a navy blob in the middle rows.
        let width = 90;
        let height = 60;
        let mut data = solid(width, height, Rgb::new(255, 255, 255));
        for y in 25..35 {
            for x in 35..55 {
                let idx = (y * width + x) * 4;
                data[idx] = 0;
                data[idx + 1] = 0;
                data[idx + 2] = 128;
            }
        }
        let view = RgbaImageView {
            width,
            height,
            data: &data,
        };
        assert_eq!(
            sample_region_color(&view, &Region::new(0, 60)),
            Rgb::new(255, 255, 255)
        );
    }

    #[test]
    fn degenerate_region_falls_back_to_gray() {
        let data = solid(40, 40, Rgb::new(19, 136, 8));
        let view = RgbaImageView {
            width: 40,
            height: 40,
            data: &data,
        };
        assert_eq!(sample_region_color(&view, &Region::new(30, 30)), FALLBACK);
        assert_eq!(sample_region_color(&view, &Region::new(20, 10)), FALLBACK);
        assert_eq!(sample_region_color(&view, &Region::new(0, 80)), FALLBACK);
    }

    #[test]
    fn malformed_view_falls_back_to_gray() {
        let view = RgbaImageView {
            width: 0,
            height: 0,
            data: &[],
        };
        assert_eq!(sample_region_color(&view, &Region::new(0, 10)), FALLBACK);
    }
}
