//! Symbolic names of resources a theme package may override.
//!
//! Theme packages expose their resources under these normalized names;
//! the host defines matching resources as the fallback.

/// Full-screen wallpaper supplied by the theme (drawable).
pub const THEME_WALLPAPER: &str = "theme_wallpaper";
/// Additional wallpapers the theme ships (string list of drawable names).
pub const THEME_EXTRA_WALLPAPERS: &str = "extra_wallpapers";
/// Preview image shown in the theme picker (drawable).
pub const THEME_PREVIEW: &str = "theme_preview";

/// Names of the icon background plates (string list of drawable names).
pub const ICON_BACKGROUND_LIST: &str = "ic_shortcut_background";

/// Background alpha for the all-apps view (integer).
pub const ALL_APPS_BG_ALPHA: &str = "all_apps_bg_alpha";
/// Custom icon positions in the all-apps view (string list).
pub const ALL_APPS_CUSTOM_POSITION_NAMES: &str = "all_apps_custom_position_names";

/// Workspace paddings (lengths).
pub const WORKSPACE_LONGAXIS_START_PADDING: &str = "workspace_longaxis_start_padding";
pub const WORKSPACE_LONGAXIS_END_PADDING: &str = "workspace_longaxis_end_padding";
pub const WORKSPACE_SHORTAXIS_START_PADDING: &str = "workspace_shortaxis_start_padding";
pub const WORKSPACE_SHORTAXIS_END_PADDING: &str = "workspace_shortaxis_end_padding";

/// Whether hotseat icons draw a reflection (boolean).
pub const HOTSEAT_ICON_DRAW_REFLECTION: &str = "hotseat_icon_draw_reflection";
