//! Deterministic icon compositing for the Skylight home screen.
//!
//! This crate turns arbitrary application icon art into canonical
//! fixed-size square bitmaps, optionally framed by a themed background
//! plate, plus the derived renderings the shell needs:
//!
//! - **Canonicalization**: crop/scale any source to the canonical
//!   texture size ([`IconCompositor::canonicalize`])
//! - **Composition**: center the icon over a randomly chosen background
//!   plate ([`IconCompositor::compose`])
//! - **Disabled variant**: desaturated, translucent rendering
//!   ([`IconCompositor::disabled_variant`])
//! - **Selection glow**: blurred, tinted alpha silhouette used as a
//!   selection underlay ([`IconCompositor::selection_glow`])
//! - **Reflection**: vertically mirrored "wet floor" variant with an
//!   alpha fade ([`reflection`])
//!
//! All operations are pure functions of their inputs plus the
//! compositor's configuration; the only shared mutable state (the plate
//! set and the RNG that picks from it) lives behind a mutex inside
//! [`IconCompositor`], so one compositor can be shared across threads.
//!
//! # Example
//!
//! ```
//! use skylight_compose::{Drawable, IconCompositor, IconMetrics};
//! use image::RgbaImage;
//!
//! let metrics = IconMetrics::new(48, 1.0, false);
//! let compositor = IconCompositor::new(metrics, Vec::new());
//!
//! let art = RgbaImage::new(96, 96);
//! let icon = compositor.canonicalize(&art);
//! assert_eq!(icon.dimensions(), (48, 48));
//! ```

pub mod compositor;
pub mod drawable;
pub mod metrics;

mod error;

pub use compositor::{GlowMask, IconCompositor, reflection};
pub use drawable::Drawable;
pub use error::{ComposeError, ComposeResult};
pub use metrics::IconMetrics;
