//! Resolves resources before and after a theme switch and builds the
//! icon compositor for each.
//!
//! Run with `cargo run --example theme_switch`.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use skylight_compose::Drawable;
use skylight_theme::{
    IconPipelineSpec, MemoryRegistry, MemorySettings, ResourceValue, TableProvider, ThemeResolver,
    build_compositor, names,
};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut host = TableProvider::new();
    host.insert(1, "app_icon_size", ResourceValue::Length(48.0));
    host.insert(2, "workspace_accent_color", ResourceValue::Color(0xFF11_2233));
    host.insert(
        3,
        names::ICON_BACKGROUND_LIST,
        ResourceValue::StringList(vec!["plate_round".into()]),
    );
    host.insert(
        10,
        "plate_round",
        ResourceValue::Drawable(Drawable::stretchable(RgbaImage::from_pixel(
            8,
            8,
            Rgba([40, 40, 48, 255]),
        ))),
    );

    let mut night = TableProvider::new();
    night.insert(100, "workspace_accent_color", ResourceValue::Color(0xFFAA_BBCC));

    let registry = Arc::new(MemoryRegistry::new());
    registry.register("org.example.night", "Night", &[], Arc::new(night));

    let resolver = ThemeResolver::new(Arc::new(host), registry, Arc::new(MemorySettings::new()));
    resolver.set_flush_hook(|| println!("icon cache flushed"));

    let spec = IconPipelineSpec {
        icon_size_id: 1,
        has_background_id: 4,
        background_list_id: 3,
        density: 1.0,
    };

    println!("accent (host):  {:#010X}", resolver.color(2).unwrap());
    let compositor = build_compositor(&resolver, &spec).unwrap();
    println!("texture size:   {}", compositor.metrics().texture_size());

    resolver.set_theme("org.example.night");
    println!("accent (night): {:#010X}", resolver.color(2).unwrap());
    let compositor = build_compositor(&resolver, &spec).unwrap();
    println!("texture size:   {}", compositor.metrics().texture_size());
}
