//! Synthetic flag renderer shared by the integration tests.
//!
//! Draws hard-edged images (no anti-aliasing) so every sampled pixel is
//! fully one colour and the tests stay deterministic.

use std::f64::consts::TAU;

pub const SAFFRON: [u8; 3] = [255, 153, 51];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const GREEN: [u8; 3] = [19, 136, 8];
pub const NAVY: [u8; 3] = [0, 0, 128];

/// How to draw the Ashoka Chakra on the white band.
pub enum Chakra {
    /// No emblem at all.
    None,
    /// A solid navy disc with the given radius.
    PlainDisc { radius: f64 },
    /// A wheel of alternating navy/white sectors (2 sectors per spoke)
    /// around a solid navy hub.
    SpokeWheel { spokes: usize },
}

/// Render an RGBA tricolour flag: three equal bands plus the requested
/// chakra centred on the image.
pub fn render_flag(width: usize, height: usize, chakra: Chakra) -> Vec<u8> {
    let band = height / 3;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    // Real proportions: the chakra diameter is 3/4 of the band height.
    let disc_r = band as f64 * 3.0 / 8.0;
    let hub_r = (height / 50).max(4) as f64;

    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let base = if y < band {
            SAFFRON
        } else if y < 2 * band {
            WHITE
        } else {
            GREEN
        };
        for x in 0..width {
            let mut color = base;
            if y >= band && y < 2 * band {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let dist2 = dx * dx + dy * dy;
                match chakra {
                    Chakra::None => {}
                    Chakra::PlainDisc { radius } => {
                        if dist2 <= radius * radius {
                            color = NAVY;
                        }
                    }
                    Chakra::SpokeWheel { spokes } => {
                        let sectors = spokes * 2;
                        if dist2 <= hub_r * hub_r {
                            color = NAVY;
                        } else if dist2 <= disc_r * disc_r {
                            let angle = dy.atan2(dx).rem_euclid(TAU);
                            let sector = (angle / (TAU / sectors as f64)).floor() as usize;
                            if sector % 2 == 0 {
                                color = NAVY;
                            }
                        }
                    }
                }
            }
            data.extend_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }
    data
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(width: usize, height: usize, rgba: &[u8]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba.to_vec())
        .expect("buffer matches dimensions");
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .expect("png encoding");
    bytes
}
