use crate::params::StripeScanParams;
use flagcheck_core::{classify, FlagColor, RgbaImageView};
use serde::{Deserialize, Serialize};

/// Half-open vertical interval of pixel rows, `[start, end)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Row span of the region; zero when degenerate.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Row midpoint of the region.
    #[inline]
    pub fn mid(&self) -> usize {
        (self.start + self.end) / 2
    }

    /// The `idx`-th of three equal slices of `height` (floor division),
    /// used as the fallback layout.
    fn third_of(height: usize, idx: usize) -> Self {
        match idx {
            0 => Self::new(0, height / 3),
            1 => Self::new(height / 3, height * 2 / 3),
            _ => Self::new(height * 2 / 3, height),
        }
    }
}

/// Result of segmenting an image into the three horizontal bands.
///
/// When `is_valid_flag` is false the regions are the default equal thirds
/// and only `flag_like_ratio` carries information.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StripeLayout {
    pub saffron: Region,
    pub white: Region,
    pub green: Region,
    pub is_valid_flag: bool,
    /// Fraction of scan lines that voted confidently for a stripe colour.
    pub flag_like_ratio: f64,
}

impl StripeLayout {
    /// Default layout: equal thirds, tagged invalid.
    pub fn equal_thirds(height: usize) -> Self {
        Self {
            saffron: Region::third_of(height, 0),
            white: Region::third_of(height, 1),
            green: Region::third_of(height, 2),
            is_valid_flag: false,
            flag_like_ratio: 0.0,
        }
    }

    fn invalid_with_ratio(height: usize, flag_like_ratio: f64) -> Self {
        Self {
            flag_like_ratio,
            ..Self::equal_thirds(height)
        }
    }
}

/// One horizontal voting pass.
#[derive(Clone, Copy, Debug)]
struct ScanLine {
    y: usize,
    dominant: FlagColor,
    confidence: f64,
    flag_color_ratio: f64,
}

impl ScanLine {
    fn is_valid(&self, params: &StripeScanParams) -> bool {
        self.dominant.is_stripe()
            && self.confidence > params.min_line_confidence
            && self.flag_color_ratio > params.min_flag_color_ratio
    }
}

/// Segment the image into the three horizontal bands by scan-line voting.
///
/// Total function: an empty or truncated buffer yields the equal-thirds
/// layout tagged invalid, never an error. Region boundaries are taken from
/// the nearest *valid* scan-line transitions; invalid lines are skipped
/// silently, so boundaries are not pixel-exact. This feeds the
/// flag-likelihood gate and is intentional.
pub fn detect_stripe_regions(view: &RgbaImageView<'_>, params: &StripeScanParams) -> StripeLayout {
    if !view.is_complete() {
        return StripeLayout::equal_thirds(view.height);
    }

    let width = view.width;
    let height = view.height;
    let scan_count = params.max_scan_lines.min(height);

    let mut scans: Vec<ScanLine> = Vec::with_capacity(scan_count);
    for line in 0..scan_count {
        let y = line * height / scan_count;
        if let Some(scan) = vote_scan_line(view, y, width, params) {
            scans.push(scan);
        }
    }

    if scans.is_empty() {
        return StripeLayout::equal_thirds(height);
    }

    let valid: Vec<ScanLine> = scans
        .iter()
        .copied()
        .filter(|s| s.is_valid(params))
        .collect();
    let flag_like_ratio = valid.len() as f64 / scans.len() as f64;

    log::debug!(
        "stripe scan: {} lines, {} valid, flag-like ratio {:.2}",
        scans.len(),
        valid.len(),
        flag_like_ratio
    );

    if flag_like_ratio <= params.min_flag_like_ratio {
        return StripeLayout::invalid_with_ratio(height, flag_like_ratio);
    }

    // Coalesce consecutive same-colour runs over the valid lines only.
    let mut runs: [Vec<Region>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    let mut current: Option<FlagColor> = None;
    let mut run_start = 0usize;

    for scan in &valid {
        if current != Some(scan.dominant) {
            if let Some(color) = current {
                if let Some(slot) = stripe_slot(color) {
                    runs[slot].push(Region::new(run_start, scan.y));
                }
            }
            current = Some(scan.dominant);
            run_start = scan.y;
        }
    }
    if let Some(color) = current {
        if let Some(slot) = stripe_slot(color) {
            runs[slot].push(Region::new(run_start, height));
        }
    }

    if runs.iter().any(|r| r.is_empty()) {
        return StripeLayout::invalid_with_ratio(height, flag_like_ratio);
    }

    // Keep the single largest run per colour; a missing colour (cannot
    // happen past the check above) would fall back to its equal third.
    let pick = |slot: usize| {
        runs[slot]
            .iter()
            .copied()
            .reduce(|largest, current| {
                if current.len() > largest.len() {
                    current
                } else {
                    largest
                }
            })
            .unwrap_or_else(|| Region::third_of(height, slot))
    };

    StripeLayout {
        saffron: pick(0),
        white: pick(1),
        green: pick(2),
        is_valid_flag: true,
        flag_like_ratio,
    }
}

/// Classify ~`samples_per_line` points across the central width of row `y`
/// and vote a dominant colour. Returns `None` when no point was sampled.
fn vote_scan_line(
    view: &RgbaImageView<'_>,
    y: usize,
    width: usize,
    params: &StripeScanParams,
) -> Option<ScanLine> {
    let sample_width = (width as f64 * (1.0 - 2.0 * params.horizontal_margin)).floor() as usize;
    let start_x = (width as f64 * params.horizontal_margin).floor() as usize;
    let step = (sample_width / params.samples_per_line).max(1);

    let mut counts = [0usize; 5];
    let mut x = start_x;
    while x < start_x + sample_width {
        let label = classify(view.rgb_at(x as i64, y as i64));
        counts[label as usize] += 1;
        x += step;
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return None;
    }

    // Argmax with ties broken by the first-encountered key in enumeration
    // order (saffron, white, green, blue, unknown).
    let dominant = FlagColor::ALL
        .into_iter()
        .reduce(|best, cand| {
            if counts[cand as usize] > counts[best as usize] {
                cand
            } else {
                best
            }
        })
        .unwrap_or(FlagColor::Unknown);

    let stripe_votes = counts[FlagColor::Saffron as usize]
        + counts[FlagColor::White as usize]
        + counts[FlagColor::Green as usize];

    Some(ScanLine {
        y,
        dominant,
        confidence: counts[dominant as usize] as f64 / total as f64,
        flag_color_ratio: stripe_votes as f64 / total as f64,
    })
}

#[inline]
fn stripe_slot(color: FlagColor) -> Option<usize> {
    match color {
        FlagColor::Saffron => Some(0),
        FlagColor::White => Some(1),
        FlagColor::Green => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagcheck_core::Rgb;

    fn solid_rows(width: usize, bands: &[(usize, Rgb)]) -> Vec<u8> {
        let mut data = Vec::new();
        for &(rows, color) in bands {
            for _ in 0..rows {
                for _ in 0..width {
                    data.extend_from_slice(&[color.r, color.g, color.b, 255]);
                }
            }
        }
        data
    }

    fn tricolor(width: usize, band_height: usize) -> Vec<u8> {
        solid_rows(
            width,
            &[
                (band_height, Rgb::new(255, 153, 51)),
                (band_height, Rgb::new(255, 255, 255)),
                (band_height, Rgb::new(19, 136, 8)),
            ],
        )
    }

    #[test]
    fn empty_buffer_yields_invalid_equal_thirds() {
        let view = RgbaImageView {
            width: 0,
            height: 0,
            data: &[],
        };
        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(!layout.is_valid_flag);
        assert_eq!(layout.flag_like_ratio, 0.0);
    }

    #[test]
    fn truncated_buffer_yields_invalid_equal_thirds() {
        let data = tricolor(30, 10);
        let view = RgbaImageView {
            width: 30,
            height: 60, // claims twice the rows the buffer holds
            data: &data,
        };
        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(!layout.is_valid_flag);
        assert_eq!(layout.saffron, Region::new(0, 20));
        assert_eq!(layout.white, Region::new(20, 40));
        assert_eq!(layout.green, Region::new(40, 60));
    }

    #[test]
    fn exact_thirds_tricolor_is_valid_with_third_regions() {
        let width = 150;
        let band = 50;
        let height = 3 * band;
        let data = tricolor(width, band);
        let view = RgbaImageView {
            width,
            height,
            data: &data,
        };

        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(layout.is_valid_flag);
        assert!(layout.flag_like_ratio > 0.99);

        // One scan line covers height / 50 = 3 rows; allow one line of slack.
        let granularity = height / 50 + 1;
        for region in [layout.saffron, layout.white, layout.green] {
            let diff = region.len().abs_diff(band);
            assert!(
                diff <= granularity,
                "band span {} deviates from {band} by more than {granularity}",
                region.len()
            );
        }
        assert_eq!(layout.saffron.start, 0);
        assert_eq!(layout.green.end, height);
        assert!(layout.saffron.end <= layout.white.start + granularity);
        assert!(layout.white.end <= layout.green.start + granularity);
    }

    #[test]
    fn uniform_noise_image_is_not_flag_like() {
        // Magenta classifies as unknown on every line.
        let data = solid_rows(60, &[(60, Rgb::new(200, 30, 180))]);
        let view = RgbaImageView {
            width: 60,
            height: 60,
            data: &data,
        };
        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(!layout.is_valid_flag);
        assert_eq!(layout.flag_like_ratio, 0.0);
        assert_eq!(layout.saffron, Region::new(0, 20));
    }

    #[test]
    fn two_band_image_misses_a_colour_and_stays_invalid() {
        let data = solid_rows(
            90,
            &[
                (45, Rgb::new(255, 153, 51)),
                (45, Rgb::new(255, 255, 255)),
            ],
        );
        let view = RgbaImageView {
            width: 90,
            height: 90,
            data: &data,
        };
        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(!layout.is_valid_flag);
        assert!(layout.flag_like_ratio > 0.9);
    }

    #[test]
    fn interleaved_invalid_lines_extend_runs_to_next_valid_transition() {
        // Saffron, then a black (unknown) gap, then white, then green. The
        // white run must start at the first valid white line, swallowing the
        // gap rows up to it.
        let width = 120;
        let data = solid_rows(
            width,
            &[
                (40, Rgb::new(255, 153, 51)),
                (8, Rgb::new(0, 0, 0)),
                (36, Rgb::new(255, 255, 255)),
                (36, Rgb::new(19, 136, 8)),
            ],
        );
        let view = RgbaImageView {
            width,
            height: 120,
            data: &data,
        };
        let layout = detect_stripe_regions(&view, &StripeScanParams::default());
        assert!(layout.is_valid_flag);
        assert!(layout.flag_like_ratio < 1.0);
        // Boundary lands on a valid white line at or after row 48.
        assert!(layout.white.start >= 48);
        assert_eq!(layout.saffron.end, layout.white.start);
    }
}
