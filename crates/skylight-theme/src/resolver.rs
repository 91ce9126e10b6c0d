//! Theme overlay resolution.
//!
//! [`ThemeResolver`] answers typed resource lookups by consulting the
//! active theme package first and falling back to the host catalog.
//! The active theme handle is process-wide, read-mostly state: it is
//! built lazily from persisted settings on the first lookup and
//! republished atomically whenever the selection changes, so
//! concurrent resolvers never observe a half-updated handle.

use std::sync::Arc;

use parking_lot::Mutex;
use skylight_compose::Drawable;

use crate::error::{Result, ThemeError};
use crate::provider::{
    ResourceCategory, ResourceId, ResourceProvider, ResourceValue, normalize_name,
};
use crate::registry::PackageRegistry;
use crate::settings::{SettingsStore, keys};

/// Reserved theme id meaning "use host resources only".
pub const HOST_PACKAGE: &str = "skylight.host";

#[derive(Clone)]
struct ActiveTheme {
    package: String,
    provider: Option<Arc<dyn ResourceProvider>>,
}

type FlushHook = Box<dyn Fn() + Send + Sync>;

/// Resolves typed resources through the active theme with host
/// fallback.
///
/// Lookups never fail because of a broken theme: provider misses and
/// unresolvable packages degrade to host values or caller defaults.
/// Only the no-default by-id wrappers return [`ThemeError::NotFound`],
/// and only when host resources miss too.
pub struct ThemeResolver {
    host: Arc<dyn ResourceProvider>,
    registry: Arc<dyn PackageRegistry>,
    settings: Arc<dyn SettingsStore>,
    active: Mutex<Option<ActiveTheme>>,
    flush_hook: Mutex<Option<FlushHook>>,
}

impl ThemeResolver {
    /// Create a resolver over the host catalog, the package registry,
    /// and the persisted settings store.
    ///
    /// The active theme is initialized lazily on the first lookup.
    pub fn new(
        host: Arc<dyn ResourceProvider>,
        registry: Arc<dyn PackageRegistry>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            host,
            registry,
            settings,
            active: Mutex::new(None),
            flush_hook: Mutex::new(None),
        }
    }

    /// Package id of the currently active theme, initializing from
    /// settings if needed.
    pub fn current_theme_package(&self) -> String {
        self.active_theme().package
    }

    /// Drop the cached provider handle; the next lookup re-initializes
    /// from persisted settings.
    pub fn reset(&self) {
        *self.active.lock() = None;
    }

    /// Persist a theme selection and republish the active handle.
    ///
    /// An unresolvable package degrades silently to the host sentinel,
    /// which is persisted in its place. The icon-cache flush hook runs
    /// on every switch: bitmaps composited under the old theme must
    /// never be reused.
    pub fn set_theme(&self, package: &str) {
        let selected = if package != HOST_PACKAGE && self.registry.resources_for(package).is_none()
        {
            tracing::warn!(
                target: "skylight_theme::resolver",
                package,
                "selected theme package is unavailable, falling back to host"
            );
            HOST_PACKAGE
        } else {
            package
        };
        self.settings.set_string(keys::THEME_PACKAGE_NAME, selected);
        self.settings.set_boolean(keys::PREFERENCES_CHANGED, true);
        if let Some(hook) = &*self.flush_hook.lock() {
            hook();
        }
        self.reset();
    }

    /// Revert the active theme to the host sentinel.
    pub fn fall_back_to_host(&self) {
        self.set_theme(HOST_PACKAGE);
    }

    /// Register the integration-layer callback that flushes externally
    /// held icon bitmaps on theme switches. Single slot; replaces any
    /// previous hook.
    pub fn set_flush_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.flush_hook.lock() = Some(Box::new(hook));
    }

    /// Remove the flush hook.
    pub fn clear_flush_hook(&self) {
        *self.flush_hook.lock() = None;
    }

    fn active_theme(&self) -> ActiveTheme {
        let mut active = self.active.lock();
        if let Some(theme) = &*active {
            return theme.clone();
        }

        let package = self
            .settings
            .string(keys::THEME_PACKAGE_NAME)
            .unwrap_or_else(|| HOST_PACKAGE.to_string());
        let theme = if package == HOST_PACKAGE {
            ActiveTheme {
                package,
                provider: None,
            }
        } else {
            match self.registry.resources_for(&package) {
                Some(provider) => ActiveTheme {
                    package,
                    provider: Some(provider),
                },
                None => {
                    // Recoverable: the package vanished since the
                    // selection was persisted.
                    tracing::warn!(
                        target: "skylight_theme::resolver",
                        package,
                        "persisted theme package not found, reverting to host"
                    );
                    self.settings.set_string(keys::THEME_PACKAGE_NAME, HOST_PACKAGE);
                    ActiveTheme {
                        package: HOST_PACKAGE.to_string(),
                        provider: None,
                    }
                }
            }
        };
        *active = Some(theme.clone());
        theme
    }

    /// Id-keyed resolution: theme (under the id's normalized entry
    /// name) first, then the host resource by id.
    fn resolve_by_id(&self, id: ResourceId, category: ResourceCategory) -> Option<ResourceValue> {
        let active = self.active_theme();
        if active.package != HOST_PACKAGE {
            if let Some(provider) = &active.provider {
                if let Some(entry) = self.host.entry_name(id) {
                    let name = normalize_name(&entry);
                    if let Some(value) = provider.lookup_name(&name, category) {
                        return Some(value);
                    }
                }
            }
        }
        self.host.lookup_id(id, category)
    }

    /// Name-keyed resolution: theme first, then the host resource
    /// under the same normalized name.
    fn resolve_by_name(&self, name: &str, category: ResourceCategory) -> Option<ResourceValue> {
        let normalized = normalize_name(name);
        let active = self.active_theme();
        if active.package != HOST_PACKAGE {
            if let Some(provider) = &active.provider {
                if let Some(value) = provider.lookup_name(&normalized, category) {
                    return Some(value);
                }
            }
        }
        self.host.lookup_name(&normalized, category)
    }

    // ========================================================================
    // Typed wrappers, one triple per category
    // ========================================================================

    pub fn drawable(&self, id: ResourceId) -> Result<Drawable> {
        self.resolve_by_id(id, ResourceCategory::Drawable)
            .and_then(ResourceValue::into_drawable)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::Drawable))
    }

    pub fn drawable_or(&self, id: ResourceId, default: Drawable) -> Drawable {
        self.resolve_by_id(id, ResourceCategory::Drawable)
            .and_then(ResourceValue::into_drawable)
            .unwrap_or(default)
    }

    pub fn drawable_named(&self, name: &str) -> Option<Drawable> {
        self.resolve_by_name(name, ResourceCategory::Drawable)
            .and_then(ResourceValue::into_drawable)
    }

    pub fn color(&self, id: ResourceId) -> Result<u32> {
        self.resolve_by_id(id, ResourceCategory::Color)
            .and_then(ResourceValue::into_color)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::Color))
    }

    pub fn color_or(&self, id: ResourceId, default: u32) -> u32 {
        self.resolve_by_id(id, ResourceCategory::Color)
            .and_then(ResourceValue::into_color)
            .unwrap_or(default)
    }

    pub fn color_named(&self, name: &str) -> Option<u32> {
        self.resolve_by_name(name, ResourceCategory::Color)
            .and_then(ResourceValue::into_color)
    }

    pub fn integer(&self, id: ResourceId) -> Result<i32> {
        self.resolve_by_id(id, ResourceCategory::Integer)
            .and_then(ResourceValue::into_integer)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::Integer))
    }

    pub fn integer_or(&self, id: ResourceId, default: i32) -> i32 {
        self.resolve_by_id(id, ResourceCategory::Integer)
            .and_then(ResourceValue::into_integer)
            .unwrap_or(default)
    }

    pub fn integer_named(&self, name: &str) -> Option<i32> {
        self.resolve_by_name(name, ResourceCategory::Integer)
            .and_then(ResourceValue::into_integer)
    }

    pub fn length(&self, id: ResourceId) -> Result<f32> {
        self.resolve_by_id(id, ResourceCategory::Length)
            .and_then(ResourceValue::into_length)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::Length))
    }

    pub fn length_or(&self, id: ResourceId, default: f32) -> f32 {
        self.resolve_by_id(id, ResourceCategory::Length)
            .and_then(ResourceValue::into_length)
            .unwrap_or(default)
    }

    pub fn length_named(&self, name: &str) -> Option<f32> {
        self.resolve_by_name(name, ResourceCategory::Length)
            .and_then(ResourceValue::into_length)
    }

    pub fn string_list(&self, id: ResourceId) -> Result<Vec<String>> {
        self.resolve_by_id(id, ResourceCategory::StringList)
            .and_then(ResourceValue::into_string_list)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::StringList))
    }

    pub fn string_list_or(&self, id: ResourceId, default: Vec<String>) -> Vec<String> {
        self.resolve_by_id(id, ResourceCategory::StringList)
            .and_then(ResourceValue::into_string_list)
            .unwrap_or(default)
    }

    pub fn string_list_named(&self, name: &str) -> Option<Vec<String>> {
        self.resolve_by_name(name, ResourceCategory::StringList)
            .and_then(ResourceValue::into_string_list)
    }

    pub fn boolean(&self, id: ResourceId) -> Result<bool> {
        self.resolve_by_id(id, ResourceCategory::Boolean)
            .and_then(ResourceValue::into_boolean)
            .ok_or_else(|| ThemeError::not_found(id, ResourceCategory::Boolean))
    }

    pub fn boolean_or(&self, id: ResourceId, default: bool) -> bool {
        self.resolve_by_id(id, ResourceCategory::Boolean)
            .and_then(ResourceValue::into_boolean)
            .unwrap_or(default)
    }

    pub fn boolean_named(&self, name: &str) -> Option<bool> {
        self.resolve_by_name(name, ResourceCategory::Boolean)
            .and_then(ResourceValue::into_boolean)
    }
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self.active.lock();
        f.debug_struct("ThemeResolver")
            .field(
                "active",
                &active.as_ref().map(|theme| theme.package.as_str()),
            )
            .finish()
    }
}
