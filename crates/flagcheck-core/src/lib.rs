//! Core pixel-level types for flag image validation.
//!
//! This crate is intentionally small and purely per-pixel. It does *not*
//! depend on the detection pipeline or any concrete image decoder: it only
//! knows how to read RGBA buffers, measure colours and classify single
//! pixels into flag colour classes.

mod classify;
mod color;
mod image;
mod logger;

pub use classify::{classify, FlagColor};
pub use color::{Rgb, MAX_RGB_DISTANCE};
pub use image::RgbaImageView;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
