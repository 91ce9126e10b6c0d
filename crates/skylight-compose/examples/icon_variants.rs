//! Composes a sample icon and prints the dimensions of every derived
//! variant.
//!
//! Run with `cargo run --example icon_variants`.

use image::{Rgba, RgbaImage};
use skylight_compose::{Drawable, IconCompositor, IconMetrics, reflection};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let metrics = IconMetrics::new(48, 1.0, true);
    let plate = Drawable::stretchable(RgbaImage::from_pixel(8, 8, Rgba([40, 40, 48, 255])));
    let compositor = IconCompositor::new(metrics, vec![plate]);

    let art = RgbaImage::from_pixel(64, 64, Rgba([220, 80, 20, 255]));
    let icon = compositor.canonicalize(&art);
    println!("canonical icon:  {:?}", icon.dimensions());

    let disabled = compositor.disabled_variant(&icon);
    println!("disabled icon:   {:?}", disabled.dimensions());

    let glow = compositor.selection_glow(&icon, true, 100, 4);
    println!(
        "selection glow:  {:?} at offset {:?}",
        glow.mask.dimensions(),
        glow.offset
    );

    let mirrored = reflection(&icon, 12);
    println!("with reflection: {:?}", mirrored.dimensions());
}
