use crate::params::SpokeCountParams;
use flagcheck_core::RgbaImageView;
use nalgebra::Point2;

/// Count emblem spokes by walking a sampling circle.
///
/// Samples the circle at a fixed angular step, reads the luminance (channel
/// mean) at each in-bounds point and counts transitions where consecutive
/// samples differ by more than the threshold. A spoke crosses the circle
/// twice, so the raw estimate is transitions / 2; a bias correction scales
/// overshoot down and undershoot up before clamping to the valid range.
///
/// Total function: a malformed view or degenerate radius yields the minimum
/// spoke count.
pub fn count_spokes(
    view: &RgbaImageView<'_>,
    center: Point2<i64>,
    radius: f64,
    params: &SpokeCountParams,
) -> u32 {
    if !view.is_complete() || radius <= 0.0 || params.angle_step_deg == 0 {
        return params.min_spokes;
    }

    let width = view.width as i64;
    let height = view.height as i64;

    let mut transitions = 0u32;
    let mut prev: Option<f64> = None;

    for angle in (0..360).step_by(params.angle_step_deg) {
        let radians = (angle as f64).to_radians();
        let x = (center.x as f64 + radians.cos() * radius).round() as i64;
        let y = (center.y as f64 + radians.sin() * radius).round() as i64;

        if x < 0 || x >= width || y < 0 || y >= height {
            continue;
        }

        let luminance = view.rgb_at(x, y).luminance();
        if let Some(prev) = prev {
            if (luminance - prev).abs() > params.luminance_delta {
                transitions += 1;
            }
        }
        prev = Some(luminance);
    }

    let mut estimated = (f64::from(transitions) / 2.0).round() as i64;
    if estimated > i64::from(params.max_spokes) {
        estimated = (estimated as f64 * params.overshoot_scale).round() as i64;
    }
    if estimated < params.undershoot_below {
        estimated = (estimated as f64 * params.undershoot_scale).round() as i64;
    }

    estimated.clamp(i64::from(params.min_spokes), i64::from(params.max_spokes)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const NAVY: [u8; 4] = [0, 0, 128, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn solid(width: usize, height: usize, px: [u8; 4]) -> Vec<u8> {
        px.repeat(width * height)
    }

    /// White field with `sectors` alternating navy/white wedges around the
    /// center, hard-edged (every pixel is fully one colour).
    fn sector_wheel(width: usize, height: usize, sectors: usize, disc_r: f64) -> Vec<u8> {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let inside = dx * dx + dy * dy <= disc_r * disc_r;
                let angle = dy.atan2(dx).rem_euclid(TAU);
                let sector = (angle / (TAU / sectors as f64)).floor() as usize % sectors;
                if inside && sector % 2 == 0 {
                    data.extend_from_slice(&NAVY);
                } else {
                    data.extend_from_slice(&WHITE);
                }
            }
        }
        data
    }

    #[test]
    fn malformed_input_returns_minimum() {
        let params = SpokeCountParams::default();
        let empty = RgbaImageView {
            width: 0,
            height: 0,
            data: &[],
        };
        assert_eq!(count_spokes(&empty, Point2::new(0, 0), 20.0, &params), 1);

        let data = solid(40, 40, WHITE);
        let view = RgbaImageView {
            width: 40,
            height: 40,
            data: &data,
        };
        assert_eq!(count_spokes(&view, Point2::new(20, 20), 0.0, &params), 1);
    }

    #[test]
    fn uniform_disc_yields_minimum_not_twenty_four() {
        // A plain disc has no spokes: zero transitions, undershoot
        // correction leaves zero, clamp raises it to one.
        let data = solid(120, 80, NAVY);
        let view = RgbaImageView {
            width: 120,
            height: 80,
            data: &data,
        };
        let spokes = count_spokes(
            &view,
            Point2::new(60, 40),
            10.0,
            &SpokeCountParams::default(),
        );
        assert_eq!(spokes, 1);
    }

    #[test]
    fn result_is_always_in_range() {
        let params = SpokeCountParams::default();
        // Checkerboard-ish worst case: maximal transitions everywhere.
        let width = 64;
        let height = 64;
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                if (x + y) % 2 == 0 {
                    data.extend_from_slice(&WHITE);
                } else {
                    data.extend_from_slice(&[0, 0, 0, 255]);
                }
            }
        }
        let view = RgbaImageView {
            width,
            height,
            data: &data,
        };
        for radius in [1.0, 5.0, 20.0, 100.0] {
            let spokes = count_spokes(&view, Point2::new(32, 32), radius, &params);
            assert!((1..=24).contains(&spokes), "out of range: {spokes}");
        }
    }

    #[test]
    fn twenty_four_spoke_wheel_counts_close_to_twenty_four() {
        // 48 alternating sectors = 24 spokes. Sampling circle well inside
        // the wheel.
        let data = sector_wheel(300, 300, 48, 120.0);
        let view = RgbaImageView {
            width: 300,
            height: 300,
            data: &data,
        };
        let spokes = count_spokes(
            &view,
            Point2::new(150, 150),
            60.0,
            &SpokeCountParams::default(),
        );
        assert!(
            (21..=24).contains(&spokes),
            "expected near 24 spokes, got {spokes}"
        );
    }

    #[test]
    fn circle_outside_the_image_sees_nothing() {
        let data = solid(40, 40, WHITE);
        let view = RgbaImageView {
            width: 40,
            height: 40,
            data: &data,
        };
        let spokes = count_spokes(
            &view,
            Point2::new(500, 500),
            10.0,
            &SpokeCountParams::default(),
        );
        assert_eq!(spokes, 1);
    }
}
