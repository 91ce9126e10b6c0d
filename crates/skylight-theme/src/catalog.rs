//! Theme package discovery and lifecycle.
//!
//! [`ThemePackageCatalog`] keeps a live in-memory list of installed
//! theme packages: it discovers candidates through the package
//! registry, gates them on the required theme permission, and fans
//! change notifications out to a single observer. A synthetic entry for
//! the host's built-in theme is always present and always first.

use parking_lot::Mutex;

use crate::names;
use crate::provider::{ResourceCategory, ResourceId};
use crate::registry::PackageRegistry;
use crate::resolver::{HOST_PACKAGE, ThemeResolver};

/// Permission a package must declare to be listed as a theme.
pub const THEME_PERMISSION: &str = "skylight.permission.THEME";

/// Catalog entry describing one installed theme package.
///
/// Entries are immutable once constructed; refresh replaces them
/// wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeInfo {
    /// Unique package id; the host entry carries [`HOST_PACKAGE`].
    pub package_id: String,
    /// Human-readable name shown in the picker.
    pub display_name: String,
    /// Id of the preview drawable in the package's own namespace, or 0
    /// when the package ships none.
    pub preview_image: ResourceId,
    /// Whether the package is currently installed.
    pub is_installed: bool,
}

/// Loading state of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Unloaded,
    Loading,
    Loaded,
}

type Observer = Box<dyn Fn(&[ThemeInfo]) + Send + Sync>;

/// Discovers, validates, and tracks installed theme packages.
pub struct ThemePackageCatalog {
    host_entry: ThemeInfo,
    themes: Mutex<Vec<ThemeInfo>>,
    state: Mutex<CatalogState>,
    observer: Mutex<Option<Observer>>,
}

impl ThemePackageCatalog {
    /// Create a catalog seeded with the synthetic host entry.
    pub fn new(host_display_name: impl Into<String>, host_preview: ResourceId) -> Self {
        let host_entry = ThemeInfo {
            package_id: HOST_PACKAGE.to_string(),
            display_name: host_display_name.into(),
            preview_image: host_preview,
            is_installed: true,
        };
        Self {
            themes: Mutex::new(vec![host_entry.clone()]),
            host_entry,
            state: Mutex::new(CatalogState::Unloaded),
            observer: Mutex::new(None),
        }
    }

    /// Current loading state.
    pub fn state(&self) -> CatalogState {
        *self.state.lock()
    }

    /// Whether a discovery pass has completed.
    pub fn is_loaded(&self) -> bool {
        self.state() == CatalogState::Loaded
    }

    /// Copy of the current theme list.
    pub fn snapshot(&self) -> Vec<ThemeInfo> {
        self.themes.lock().clone()
    }

    /// Register the single observer, replacing any previous one.
    ///
    /// The observer immediately receives the current snapshot so a late
    /// subscriber is never left without data.
    pub fn set_observer(&self, observer: impl Fn(&[ThemeInfo]) + Send + Sync + 'static) {
        let themes = self.themes.lock();
        *self.observer.lock() = Some(Box::new(observer));
        self.notify(&themes);
    }

    /// Remove the observer. The owner must call this before dropping
    /// the subscribing side.
    pub fn clear_observer(&self) {
        *self.observer.lock() = None;
    }

    /// Rebuild the catalog from the registry.
    ///
    /// Discovery (capability query, permission gate, per-candidate
    /// resource lookups) runs off the list lock; only the final swap-in
    /// and the notification hold it. Concurrent refreshes race to
    /// publish; the last writer wins.
    pub fn refresh(&self, registry: &dyn PackageRegistry) {
        *self.state.lock() = CatalogState::Loading;

        let candidates = find_theme_packages(registry);
        let mut discovered = Vec::with_capacity(candidates.len());
        for package in &candidates {
            if let Some(info) = build_theme_info(registry, package) {
                discovered.push(info);
            }
        }
        tracing::debug!(
            target: "skylight_theme::catalog",
            discovered = discovered.len(),
            "theme package discovery complete"
        );

        let mut themes = self.themes.lock();
        themes.clear();
        themes.push(self.host_entry.clone());
        themes.append(&mut discovered);
        *self.state.lock() = CatalogState::Loaded;
        self.notify(&themes);
    }

    /// Incremental update after a package install notification.
    ///
    /// The candidate goes through the same validation as a full
    /// refresh; an entry with the same package id is replaced.
    pub fn on_package_added(&self, registry: &dyn PackageRegistry, package: &str) {
        if !find_theme_packages(registry).iter().any(|p| p == package) {
            return;
        }
        let Some(info) = build_theme_info(registry, package) else {
            return;
        };
        let mut themes = self.themes.lock();
        themes.retain(|t| t.package_id != info.package_id);
        themes.push(info);
        self.notify(&themes);
    }

    /// Incremental update after a package removal notification.
    ///
    /// If the removed package backed the active theme, the resolver is
    /// reverted to the host sentinel: the active theme must never
    /// reference an uninstalled package.
    pub fn on_package_removed(&self, package: &str, resolver: &ThemeResolver) {
        let removed = {
            let mut themes = self.themes.lock();
            let before = themes.len();
            themes.retain(|t| t.package_id == HOST_PACKAGE || t.package_id != package);
            let removed = themes.len() != before;
            if removed {
                self.notify(&themes);
            }
            removed
        };
        if removed && resolver.current_theme_package() == package {
            tracing::info!(
                target: "skylight_theme::catalog",
                package,
                "active theme package removed, reverting to host theme"
            );
            resolver.fall_back_to_host();
        }
    }

    fn notify(&self, themes: &[ThemeInfo]) {
        if let Some(observer) = &*self.observer.lock() {
            observer(themes);
        }
    }
}

impl std::fmt::Debug for ThemePackageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePackageCatalog")
            .field("state", &self.state())
            .field("themes", &self.themes.lock().len())
            .finish()
    }
}

/// Validated candidate package ids, sorted by display name under
/// locale-aware collation.
fn find_theme_packages(registry: &dyn PackageRegistry) -> Vec<String> {
    let mut candidates: Vec<(String, String)> = registry
        .theme_packages()
        .into_iter()
        .filter(|package| {
            let permitted = registry.has_permission(package, THEME_PERMISSION);
            if !permitted {
                // Capability gate, not an error.
                tracing::debug!(
                    target: "skylight_theme::catalog",
                    package,
                    "candidate lacks the theme permission, skipping"
                );
            }
            permitted
        })
        .map(|package| {
            let title = registry
                .display_name(&package)
                .unwrap_or_else(|| package.clone());
            (title, package)
        })
        .collect();
    let collator = display_name_collator();
    candidates.sort_by(|a, b| collator.compare(&a.0, &b.0).then_with(|| a.1.cmp(&b.1)));
    candidates.into_iter().map(|(_, package)| package).collect()
}

/// Collator for the system locale, with package id as the tiebreaker
/// supplied by the caller.
fn display_name_collator() -> icu::collator::CollatorBorrowed<'static> {
    use icu::collator::Collator;
    use icu::collator::options::CollatorOptions;
    use icu::locale::Locale;

    let locale: Locale = sys_locale::get_locale()
        .unwrap_or_default()
        .parse()
        .unwrap_or_else(|_| "en-US".parse().unwrap());
    Collator::try_new(locale.into(), CollatorOptions::default()).unwrap_or_else(|_| {
        let default_locale: Locale = "en-US".parse().unwrap();
        Collator::try_new(default_locale.into(), CollatorOptions::default())
            .expect("default locale should always work")
    })
}

/// Build a catalog entry for one validated candidate.
fn build_theme_info(registry: &dyn PackageRegistry, package: &str) -> Option<ThemeInfo> {
    let Some(provider) = registry.resources_for(package) else {
        tracing::warn!(
            target: "skylight_theme::catalog",
            package,
            "theme package resources can not be found"
        );
        return None;
    };
    let display_name = registry
        .display_name(package)
        .unwrap_or_else(|| package.to_string());
    let preview_image = provider
        .identifier(names::THEME_PREVIEW, ResourceCategory::Drawable)
        .unwrap_or(0);
    Some(ThemeInfo {
        package_id: package.to_string(),
        display_name,
        preview_image,
        is_installed: true,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::provider::{ResourceValue, TableProvider};
    use crate::registry::MemoryRegistry;
    use crate::settings::{MemorySettings, SettingsStore, keys};

    fn theme_provider_with_preview(preview_id: ResourceId) -> Arc<TableProvider> {
        let mut provider = TableProvider::new();
        provider.insert(
            preview_id,
            names::THEME_PREVIEW,
            ResourceValue::Drawable(skylight_compose::Drawable::from_image(
                image::RgbaImage::new(2, 2),
            )),
        );
        Arc::new(provider)
    }

    fn registry_with_two_themes() -> Arc<MemoryRegistry> {
        let registry = Arc::new(MemoryRegistry::new());
        registry.register(
            "org.example.zebra",
            "Zebra",
            &[THEME_PERMISSION],
            theme_provider_with_preview(11),
        );
        registry.register(
            "org.example.amber",
            "amber",
            &[THEME_PERMISSION],
            theme_provider_with_preview(12),
        );
        registry
    }

    fn catalog() -> ThemePackageCatalog {
        ThemePackageCatalog::new("System default", 42)
    }

    fn resolver(registry: Arc<MemoryRegistry>, settings: Arc<MemorySettings>) -> ThemeResolver {
        ThemeResolver::new(
            Arc::new(TableProvider::new()),
            registry,
            settings as Arc<dyn SettingsStore>,
        )
    }

    #[test]
    fn test_new_catalog_has_host_entry_only() {
        let catalog = catalog();
        assert_eq!(catalog.state(), CatalogState::Unloaded);
        let themes = catalog.snapshot();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].package_id, HOST_PACKAGE);
        assert_eq!(themes[0].preview_image, 42);
    }

    #[test]
    fn test_refresh_discovers_sorted_with_host_first() {
        let registry = registry_with_two_themes();
        let catalog = catalog();
        catalog.refresh(&*registry);

        assert!(catalog.is_loaded());
        let themes = catalog.snapshot();
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0].package_id, HOST_PACKAGE);
        // Collated display-name order: "amber" before "Zebra".
        assert_eq!(themes[1].package_id, "org.example.amber");
        assert_eq!(themes[2].package_id, "org.example.zebra");
        assert_eq!(themes[1].preview_image, 12);
        assert!(themes.iter().all(|t| t.is_installed));
    }

    #[test]
    fn test_sort_collates_accented_display_names() {
        let registry = Arc::new(MemoryRegistry::new());
        registry.register(
            "org.example.umlaut",
            "Ärger",
            &[THEME_PERMISSION],
            theme_provider_with_preview(21),
        );
        registry.register(
            "org.example.zebra",
            "Zebra",
            &[THEME_PERMISSION],
            theme_provider_with_preview(22),
        );
        let catalog = catalog();
        catalog.refresh(&*registry);

        // Code-point order would put "Ärger" after "Zebra".
        let themes = catalog.snapshot();
        assert_eq!(themes[1].display_name, "Ärger");
        assert_eq!(themes[2].display_name, "Zebra");
    }

    #[test]
    fn test_refresh_excludes_candidates_without_permission() {
        let registry = registry_with_two_themes();
        registry.register(
            "org.example.rogue",
            "Rogue",
            &["some.other.permission"],
            theme_provider_with_preview(13),
        );
        let catalog = catalog();
        catalog.refresh(&*registry);

        assert!(
            !catalog
                .snapshot()
                .iter()
                .any(|t| t.package_id == "org.example.rogue")
        );
    }

    #[test]
    fn test_package_ids_stay_unique_after_repeated_adds() {
        let registry = registry_with_two_themes();
        let catalog = catalog();
        catalog.refresh(&*registry);
        catalog.on_package_added(&*registry, "org.example.zebra");
        catalog.on_package_added(&*registry, "org.example.zebra");

        let themes = catalog.snapshot();
        let zebra_count = themes
            .iter()
            .filter(|t| t.package_id == "org.example.zebra")
            .count();
        assert_eq!(zebra_count, 1);
        assert_eq!(
            themes
                .iter()
                .filter(|t| t.package_id == HOST_PACKAGE)
                .count(),
            1
        );
    }

    #[test]
    fn test_added_package_goes_through_validation() {
        let registry = registry_with_two_themes();
        let catalog = catalog();
        catalog.refresh(&*registry);

        registry.register(
            "org.example.rogue",
            "Rogue",
            &[],
            theme_provider_with_preview(13),
        );
        catalog.on_package_added(&*registry, "org.example.rogue");
        assert_eq!(catalog.snapshot().len(), 3);
    }

    #[test]
    fn test_removing_package_drops_entry() {
        let registry = registry_with_two_themes();
        let settings = Arc::new(MemorySettings::new());
        let resolver = resolver(Arc::clone(&registry), Arc::clone(&settings));
        let catalog = catalog();
        catalog.refresh(&*registry);

        registry.unregister("org.example.zebra");
        catalog.on_package_removed("org.example.zebra", &resolver);

        let themes = catalog.snapshot();
        assert_eq!(themes.len(), 2);
        assert!(!themes.iter().any(|t| t.package_id == "org.example.zebra"));
    }

    #[test]
    fn test_removing_active_theme_reverts_to_host() {
        let registry = registry_with_two_themes();
        let settings = Arc::new(MemorySettings::new());
        let resolver = resolver(Arc::clone(&registry), Arc::clone(&settings));
        let catalog = catalog();
        catalog.refresh(&*registry);

        resolver.set_theme("org.example.zebra");
        assert_eq!(resolver.current_theme_package(), "org.example.zebra");

        registry.unregister("org.example.zebra");
        catalog.on_package_removed("org.example.zebra", &resolver);

        assert_eq!(resolver.current_theme_package(), HOST_PACKAGE);
        assert_eq!(
            settings.string(keys::THEME_PACKAGE_NAME).as_deref(),
            Some(HOST_PACKAGE)
        );
    }

    #[test]
    fn test_host_entry_survives_removal_by_sentinel_id() {
        let registry = registry_with_two_themes();
        let settings = Arc::new(MemorySettings::new());
        let resolver = resolver(Arc::clone(&registry), Arc::clone(&settings));
        let catalog = catalog();
        catalog.refresh(&*registry);

        catalog.on_package_removed(HOST_PACKAGE, &resolver);
        assert!(
            catalog
                .snapshot()
                .iter()
                .any(|t| t.package_id == HOST_PACKAGE)
        );
    }

    #[test]
    fn test_observer_receives_immediate_snapshot_and_updates() {
        let registry = registry_with_two_themes();
        let catalog = catalog();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            catalog.set_observer(move |themes| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock() = themes.to_vec();
            });
        }
        // Late subscriber still gets the seed list.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().len(), 1);

        catalog.refresh(&*registry);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(seen.lock().len(), 3);

        catalog.clear_observer();
        catalog.refresh(&*registry);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
