//! Error types for the compositing pipeline.

/// Result type alias for compositing operations.
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Errors that can occur while building compositing inputs.
///
/// The compositing entry points themselves never fail: invalid inputs
/// degrade to no-ops so a broken icon can never keep the home screen
/// from rendering. Errors only surface when constructing inputs from
/// raw data.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// Raw pixel data does not match the declared dimensions.
    #[error("pixel data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    PixelDataMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl ComposeError {
    /// Create a pixel-data mismatch error.
    pub fn pixel_data_mismatch(width: u32, height: u32, actual: usize) -> Self {
        Self::PixelDataMismatch {
            width,
            height,
            expected: width as usize * height as usize * 4,
            actual,
        }
    }
}
