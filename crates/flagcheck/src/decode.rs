//! End-to-end helpers from encoded image bytes to a [`ValidationReport`].
//!
//! Only this module touches the `image` crate; the rest of the pipeline
//! works on borrowed [`RgbaImageView`]s.

use crate::error::{DecodeError, MIN_DIMENSION};
use crate::report::ValidationReport;
use crate::validator::FlagValidator;
use flagcheck_core::RgbaImageView;
use std::fs;
use std::path::Path;

/// Convert a decoded `image::RgbaImage` into the borrowed view type.
pub fn rgba_view(img: &image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build a view over a raw RGBA buffer, checking dimensions and length.
pub fn rgba_view_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<RgbaImageView<'_>, DecodeError> {
    check_dimensions(width, height)?;
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(DecodeError::InvalidBufferLength {
            expected,
            got: pixels.len(),
        });
    }
    Ok(RgbaImageView {
        width: width as usize,
        height: height as usize,
        data: pixels,
    })
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA buffer.
pub fn decode_rgba(bytes: &[u8]) -> Result<image::RgbaImage, DecodeError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    check_dimensions(img.width(), img.height())?;
    Ok(img)
}

/// Decode and validate in one step, reporting the byte count as file size.
pub fn validate_image_bytes(
    bytes: &[u8],
    validator: &FlagValidator,
) -> Result<ValidationReport, DecodeError> {
    let img = decode_rgba(bytes)?;
    Ok(validator.validate(&rgba_view(&img), bytes.len() as u64))
}

/// Read, decode and validate an image file.
pub fn validate_image_file(
    path: impl AsRef<Path>,
    validator: &FlagValidator,
) -> Result<ValidationReport, DecodeError> {
    let bytes = fs::read(path)?;
    validate_image_bytes(&bytes, validator)
}

fn check_dimensions(width: u32, height: u32) -> Result<(), DecodeError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    Ok(())
}
