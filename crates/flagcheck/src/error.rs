/// Smallest accepted image side, in pixels.
pub const MIN_DIMENSION: u32 = 10;

/// Pre-analysis failures: the input never became a usable pixel buffer, so
/// no report exists. Anything past decoding degrades inside the pipeline
/// instead of erroring.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid image dimensions (width={width}, height={height}); need at least {MIN_DIMENSION}x{MIN_DIMENSION}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },

    #[error("input of {got} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { got: u64, limit: u64 },

    #[cfg(feature = "image")]
    #[error("failed to read image file")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
