//! Raster icon sources for compositing.

use std::sync::Arc;

use image::RgbaImage;

use crate::error::{ComposeError, ComposeResult};

/// A cheaply clonable raster icon source.
///
/// A drawable wraps a shared RGBA pixel buffer together with an
/// optional intrinsic size. Most icon art reports its pixel dimensions
/// as the intrinsic size; a drawable without one (see
/// [`Drawable::stretchable`]) is stretched to fill whatever box it is
/// drawn into, which is how solid fills and procedural plates behave.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    image: Arc<RgbaImage>,
    intrinsic: Option<(u32, u32)>,
}

impl Drawable {
    /// Create a drawable whose intrinsic size is the image's pixel size.
    pub fn from_image(image: RgbaImage) -> Self {
        let intrinsic = Some(image.dimensions());
        Self {
            image: Arc::new(image),
            intrinsic,
        }
    }

    /// Create a drawable with no intrinsic size.
    ///
    /// It will be stretched to fill the target box when composed.
    pub fn stretchable(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
            intrinsic: None,
        }
    }

    /// Create a drawable from raw RGBA bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, data: &[u8]) -> ComposeResult<Self> {
        let image = RgbaImage::from_raw(width, height, data.to_vec())
            .ok_or_else(|| ComposeError::pixel_data_mismatch(width, height, data.len()))?;
        Ok(Self::from_image(image))
    }

    /// The backing pixel buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The intrinsic size, if the source reports one.
    pub fn intrinsic_size(&self) -> Option<(u32, u32)> {
        self.intrinsic
    }

    /// Whether the backing buffer has zero area.
    pub fn is_empty(&self) -> bool {
        let (w, h) = self.image.dimensions();
        w == 0 || h == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_image_reports_intrinsic_size() {
        let drawable = Drawable::from_image(RgbaImage::new(32, 24));
        assert_eq!(drawable.intrinsic_size(), Some((32, 24)));
        assert!(!drawable.is_empty());
    }

    #[test]
    fn test_stretchable_has_no_intrinsic_size() {
        let drawable = Drawable::stretchable(RgbaImage::new(4, 4));
        assert_eq!(drawable.intrinsic_size(), None);
    }

    #[test]
    fn test_from_rgba_bytes_validates_length() {
        let data = vec![0u8; 2 * 2 * 4];
        assert!(Drawable::from_rgba_bytes(2, 2, &data).is_ok());
        assert!(Drawable::from_rgba_bytes(3, 2, &data).is_err());
    }
}
