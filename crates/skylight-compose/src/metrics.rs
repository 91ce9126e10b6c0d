//! Canonical icon sizing derived from display density.

/// Canonical icon sizing parameters, computed once per theme.
///
/// The canonical texture size is the fixed square dimension every icon
/// bitmap is normalized to. When the active theme supplies background
/// plates the texture grows by a 5/4 ratio, since the plate frames a
/// smaller foreground icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconMetrics {
    base_icon_size: u32,
    density: f32,
    has_background: bool,
}

impl IconMetrics {
    /// Ratio applied to the base icon size when a background plate set
    /// exists.
    pub const BACKGROUND_SCALE: f32 = 5.0 / 4.0;

    /// Create metrics from the base icon size (in pixels), the display
    /// density, and whether the active theme configures background
    /// plates.
    pub fn new(base_icon_size: u32, density: f32, has_background: bool) -> Self {
        Self {
            base_icon_size,
            density,
            has_background,
        }
    }

    /// The unscaled icon size in pixels.
    pub fn base_icon_size(&self) -> u32 {
        self.base_icon_size
    }

    /// The display density factor.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Whether a themed background plate set is configured.
    pub fn has_background(&self) -> bool {
        self.has_background
    }

    /// The canonical square texture size all icons are normalized to.
    pub fn texture_size(&self) -> u32 {
        if self.has_background {
            (self.base_icon_size as f32 * Self::BACKGROUND_SCALE).round() as u32
        } else {
            self.base_icon_size
        }
    }

    /// Blur radius for selection glow masks, scaled by density.
    pub fn blur_radius(&self) -> f32 {
        5.0 * self.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size_without_background() {
        let metrics = IconMetrics::new(48, 1.0, false);
        assert_eq!(metrics.texture_size(), 48);
    }

    #[test]
    fn test_texture_size_with_background() {
        let metrics = IconMetrics::new(48, 1.0, true);
        assert_eq!(metrics.texture_size(), 60);
    }

    #[test]
    fn test_texture_size_rounds() {
        // 38 * 5/4 = 47.5, rounds to 48
        let metrics = IconMetrics::new(38, 1.0, true);
        assert_eq!(metrics.texture_size(), 48);
    }

    #[test]
    fn test_blur_radius_scales_with_density() {
        let metrics = IconMetrics::new(48, 1.5, false);
        assert!((metrics.blur_radius() - 7.5).abs() < f32::EPSILON);
    }
}
