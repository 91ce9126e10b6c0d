//! Wiring between theme resolution and icon compositing.
//!
//! A compositor is rebuilt whenever the active theme changes; its
//! metrics and background plates come from the resolver so a theme can
//! override both the icon size and the plate set.

use skylight_compose::{Drawable, IconCompositor, IconMetrics};

use crate::error::Result;
use crate::provider::ResourceId;
use crate::resolver::ThemeResolver;

/// Resource ids and display parameters the pipeline reads through the
/// resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconPipelineSpec {
    /// Length resource holding the base icon edge in pixels.
    pub icon_size_id: ResourceId,
    /// Boolean resource gating background plates; missing means `true`.
    pub has_background_id: ResourceId,
    /// String-list resource naming the background plate drawables.
    pub background_list_id: ResourceId,
    /// Display density scale factor.
    pub density: f32,
}

/// Build an [`IconCompositor`] configured from the active theme.
///
/// The icon size is the one resource the pipeline cannot invent a
/// value for, so its absence is the only error here. Everything else
/// degrades: a missing background flag defaults to on, and plate names
/// that resolve to no drawable are skipped.
pub fn build_compositor(
    resolver: &ThemeResolver,
    spec: &IconPipelineSpec,
) -> Result<IconCompositor> {
    let base_icon_size = resolver.length(spec.icon_size_id)?.round() as u32;
    let has_background = resolver.boolean_or(spec.has_background_id, true);
    let plates = if has_background {
        load_icon_backgrounds(resolver, spec.background_list_id)
    } else {
        Vec::new()
    };

    // The flag alone drives the canonical texture size; icons must come
    // out the same size whether or not any plate actually loaded.
    let metrics = IconMetrics::new(base_icon_size, spec.density, has_background);
    tracing::debug!(
        target: "skylight_theme::pipeline",
        theme = %resolver.current_theme_package(),
        base_icon_size,
        texture_size = metrics.texture_size(),
        plates = plates.len(),
        "icon compositor configured"
    );
    Ok(IconCompositor::new(metrics, plates))
}

/// Resolve the background plate drawables named by the plate list.
///
/// Each name goes back through the resolver, so a theme may override
/// individual plates even when the list itself comes from the host.
pub fn load_icon_backgrounds(resolver: &ThemeResolver, list_id: ResourceId) -> Vec<Drawable> {
    resolver
        .string_list_or(list_id, Vec::new())
        .iter()
        .filter_map(|name| {
            let drawable = resolver.drawable_named(name);
            if drawable.is_none() {
                tracing::warn!(
                    target: "skylight_theme::pipeline",
                    name,
                    "icon background name resolves to no drawable, skipping"
                );
            }
            drawable
        })
        .collect()
}
