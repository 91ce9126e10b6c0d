//! Icon bitmap generation.
//!
//! [`IconCompositor`] produces the canonical fixed-size icon bitmaps
//! the shell renders, plus the derived disabled/glow variants. The
//! plate set and the RNG that picks from it are shared mutable state;
//! a single mutex serializes compositions so at most one runs at a
//! time, matching the shared-scratch-canvas model the pipeline was
//! designed around.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::drawable::Drawable;
use crate::metrics::IconMetrics;

/// Glow tint when the icon is pressed (ARGB).
const GLOW_COLOR_PRESSED: u32 = 0xFFFF_C300;
/// Glow tint when the icon is focused (ARGB).
const GLOW_COLOR_FOCUSED: u32 = 0xFFFF_8E00;
/// Upper bound of the alpha clip ramp applied to blurred glow masks.
const GLOW_CLIP_CEILING: u32 = 30;

/// Saturation factor for disabled icons.
const DISABLED_SATURATION: f32 = 0.2;
/// Alpha multiplier for disabled icons.
const DISABLED_ALPHA: u32 = 0x88;

/// Alpha at the reflection seam, fading to zero at the bottom edge.
const REFLECTION_SEAM_ALPHA: f32 = 0x70 as f32 / 255.0;

/// A blurred, tinted alpha silhouette used as a selection underlay.
#[derive(Debug, Clone)]
pub struct GlowMask {
    /// The tinted mask bitmap, expanded past the source by the blur
    /// padding on every side.
    pub mask: RgbaImage,
    /// Placement offset of the mask's top-left corner in destination
    /// coordinates.
    pub offset: (i32, i32),
}

struct Scratch {
    plates: Vec<Drawable>,
    rng: StdRng,
}

impl Scratch {
    fn pick_plate(&mut self) -> Option<Drawable> {
        if self.plates.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.plates.len());
        Some(self.plates[index].clone())
    }
}

/// Produces canonical fixed-size icon bitmaps.
///
/// Constructed once per active theme from [`IconMetrics`] and the
/// theme's background plate set; rebuilt when the theme changes.
pub struct IconCompositor {
    metrics: IconMetrics,
    scratch: Mutex<Scratch>,
}

impl IconCompositor {
    /// Create a compositor with the given metrics and background
    /// plates. An empty plate set disables background framing.
    pub fn new(metrics: IconMetrics, plates: Vec<Drawable>) -> Self {
        Self {
            metrics,
            scratch: Mutex::new(Scratch {
                plates,
                rng: StdRng::from_entropy(),
            }),
        }
    }

    /// Create a compositor with a deterministic plate-selection RNG.
    pub fn with_rng_seed(metrics: IconMetrics, plates: Vec<Drawable>, seed: u64) -> Self {
        Self {
            metrics,
            scratch: Mutex::new(Scratch {
                plates,
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    /// The sizing parameters this compositor was built with.
    pub fn metrics(&self) -> IconMetrics {
        self.metrics
    }

    /// Whether any background plates are configured.
    pub fn has_plates(&self) -> bool {
        !self.scratch.lock().plates.is_empty()
    }

    /// Normalize an arbitrary icon bitmap to the canonical texture size.
    ///
    /// Already-canonical bitmaps pass through unchanged; sources larger
    /// than canonical in both dimensions are center-cropped (oversized
    /// legacy art); everything else goes through the general compose
    /// path. Idempotent: canonicalizing a canonical bitmap is the
    /// identity.
    pub fn canonicalize(&self, icon: &RgbaImage) -> RgbaImage {
        let texture = self.metrics.texture_size();
        let (source_w, source_h) = icon.dimensions();

        if source_w == texture && source_h == texture {
            return icon.clone();
        }
        if source_w > texture && source_h > texture {
            return imageops::crop_imm(
                icon,
                (source_w - texture) / 2,
                (source_h - texture) / 2,
                texture,
                texture,
            )
            .to_image();
        }
        if source_w == 0 || source_h == 0 {
            // Nothing to render from; pass through.
            return icon.clone();
        }
        self.compose(&Drawable::from_image(icon.clone()))
    }

    /// Render an icon onto the canonical canvas, optionally over a
    /// randomly chosen background plate.
    ///
    /// The foreground is shrunk to fit when larger than the canvas
    /// (long axis drives the scale factor) and drawn at native size
    /// when smaller; it is never upscaled. When a plate is in use,
    /// foregrounds at or above canonical size are first shrunk to 4/5
    /// of it so they never fully occlude the frame.
    pub fn compose(&self, icon: &Drawable) -> RgbaImage {
        let texture = self.metrics.texture_size();
        let mut scratch = self.scratch.lock();
        let plate = scratch.pick_plate();

        let mut width = texture;
        let mut height = texture;
        let (mut source_w, mut source_h) = icon.intrinsic_size().unwrap_or((0, 0));

        if plate.is_some() {
            let framed = (texture as f32 * 4.0 / 5.0) as u32;
            if source_w >= texture {
                source_w = framed;
            }
            if source_h >= texture {
                source_h = framed;
            }
        }

        if source_w > 0 && source_h > 0 {
            if width < source_w || height < source_h {
                // Too big, scale down along the long axis.
                let ratio = source_w as f32 / source_h as f32;
                if source_w > source_h {
                    height = (width as f32 / ratio) as u32;
                } else if source_h > source_w {
                    width = (height as f32 * ratio) as u32;
                }
            } else if source_w < width && source_h < height {
                // Don't scale up the icon.
                width = source_w;
                height = source_h;
            }
        }

        let mut canvas = RgbaImage::new(texture, texture);

        if let Some(plate) = plate {
            tracing::trace!(target: "skylight_compose::compositor", texture, "drawing background plate");
            let stretched = imageops::resize(plate.image(), texture, texture, FilterType::Triangle);
            imageops::overlay(&mut canvas, &stretched, 0, 0);
        }

        if !icon.is_empty() && width > 0 && height > 0 {
            let foreground;
            let foreground = if icon.image().dimensions() == (width, height) {
                icon.image()
            } else {
                foreground = imageops::resize(icon.image(), width, height, FilterType::Triangle);
                &foreground
            };
            let left = (texture - width) / 2;
            let top = (texture - height) / 2;
            imageops::overlay(&mut canvas, foreground, i64::from(left), i64::from(top));
        }

        canvas
    }

    /// Copy at identical dimensions with fixed desaturation and alpha
    /// multiply, for "greyed out" rendering of disabled applications.
    pub fn disabled_variant(&self, icon: &RgbaImage) -> RgbaImage {
        let mut out = icon.clone();
        // Saturation matrix with the platform luminance weights.
        let inv = 1.0 - DISABLED_SATURATION;
        let (rw, gw, bw) = (0.213 * inv, 0.715 * inv, 0.072 * inv);
        for pixel in out.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let (rf, gf, bf) = (r as f32, g as f32, b as f32);
            pixel.0 = [
                ((rw + DISABLED_SATURATION) * rf + gw * gf + bw * bf).clamp(0.0, 255.0) as u8,
                (rw * rf + (gw + DISABLED_SATURATION) * gf + bw * bf).clamp(0.0, 255.0) as u8,
                (rw * rf + gw * gf + (bw + DISABLED_SATURATION) * bf).clamp(0.0, 255.0) as u8,
                (u32::from(a) * DISABLED_ALPHA / 255) as u8,
            ];
        }
        out
    }

    /// Build the selection glow underlay for an icon.
    ///
    /// Extracts the icon's alpha silhouette expanded by a normal blur
    /// of radius `5 * density`, runs the blurred alpha through a clip
    /// ramp so the body of the glow is solid, and tints it with the
    /// pressed or focused color. The returned offset centers the mask
    /// horizontally against `dest_width` and aligns it vertically so
    /// the blur expansion straddles the icon's top edge at
    /// `padding_top`.
    pub fn selection_glow(
        &self,
        src: &RgbaImage,
        pressed: bool,
        dest_width: u32,
        padding_top: i32,
    ) -> GlowMask {
        let (source_w, source_h) = src.dimensions();
        if source_w == 0 || source_h == 0 {
            return GlowMask {
                mask: RgbaImage::new(0, 0),
                offset: (0, 0),
            };
        }

        let radius = self.metrics.blur_radius();
        let pad = radius.ceil() as u32;

        // Alpha silhouette, padded so the blur can expand past the edges.
        let mut silhouette = GrayImage::new(source_w + 2 * pad, source_h + 2 * pad);
        for (x, y, pixel) in src.enumerate_pixels() {
            silhouette.put_pixel(x + pad, y + pad, Luma([pixel.0[3]]));
        }
        let blurred = imageops::blur(&silhouette, radius / 2.0);

        let color = if pressed {
            GLOW_COLOR_PRESSED
        } else {
            GLOW_COLOR_FOCUSED
        };
        let (red, green, blue) = (
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
        );

        let mut mask = RgbaImage::new(blurred.width(), blurred.height());
        for (x, y, pixel) in blurred.enumerate_pixels() {
            let alpha = clip_ramp(pixel.0[0]);
            mask.put_pixel(x, y, Rgba([red, green, blue, alpha]));
        }

        let offset_x = (dest_width as i32 - mask.width() as i32) / 2;
        let offset_y = padding_top - (mask.height() as i32 - source_h as i32) / 2;

        GlowMask {
            mask,
            offset: (offset_x, offset_y),
        }
    }
}

impl std::fmt::Debug for IconCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCompositor")
            .field("metrics", &self.metrics)
            .field("plates", &self.scratch.lock().plates.len())
            .finish()
    }
}

/// Map blurred alpha through a `[0, 30]` clip ramp: values at or above
/// the ceiling become fully opaque, values below scale linearly.
fn clip_ramp(alpha: u8) -> u8 {
    let alpha = u32::from(alpha);
    if alpha >= GLOW_CLIP_CEILING {
        255
    } else {
        (alpha * 255 / GLOW_CLIP_CEILING) as u8
    }
}

/// Build a "wet floor" variant of an icon: the original stacked above a
/// vertical mirror of its bottom `reflection_height` rows, with an
/// alpha gradient fading the mirrored region from ~44% opacity at the
/// seam to fully transparent at the bottom.
///
/// `reflection_height == 0` is a pass-through. Rows above the seam are
/// never touched.
pub fn reflection(icon: &RgbaImage, reflection_height: u32) -> RgbaImage {
    let (width, height) = icon.dimensions();
    if reflection_height == 0 || width == 0 || height == 0 {
        return icon.clone();
    }
    let reflected = reflection_height.min(height);

    let mut out = RgbaImage::new(width, height + reflected);
    imageops::replace(&mut out, icon, 0, 0);

    for row in 0..reflected {
        let src_y = height - 1 - row;
        let fade = REFLECTION_SEAM_ALPHA * (1.0 - row as f32 / reflected as f32);
        for x in 0..width {
            let mut pixel = *icon.get_pixel(x, src_y);
            pixel.0[3] = (f32::from(pixel.0[3]) * fade).round() as u8;
            out.put_pixel(x, height + row, pixel);
        }
    }

    out
}
