//! Installed-package registry interface.
//!
//! The platform's package manager is an external collaborator; the
//! catalog only needs the narrow queries below. [`MemoryRegistry`]
//! implements them over a static table for embedding and tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::provider::ResourceProvider;

/// Queries against the set of installed packages.
pub trait PackageRegistry: Send + Sync {
    /// Package ids of installed components advertising theme capability.
    fn theme_packages(&self) -> Vec<String>;

    /// Whether a package declares the given permission.
    fn has_permission(&self, package: &str, permission: &str) -> bool;

    /// Human-readable display name of a package.
    fn display_name(&self, package: &str) -> Option<String>;

    /// Resource-provider handle for a package's own namespace, or
    /// `None` when the package cannot be resolved.
    fn resources_for(&self, package: &str) -> Option<Arc<dyn ResourceProvider>>;
}

struct RegisteredPackage {
    display_name: String,
    permissions: Vec<String>,
    provider: Arc<dyn ResourceProvider>,
}

/// In-memory [`PackageRegistry`].
///
/// Every registered package advertises theme capability; permission
/// declarations are listed explicitly so the catalog's permission gate
/// stays observable.
#[derive(Default)]
pub struct MemoryRegistry {
    packages: RwLock<HashMap<String, RegisteredPackage>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a theme package.
    pub fn register(
        &self,
        package: &str,
        display_name: &str,
        permissions: &[&str],
        provider: Arc<dyn ResourceProvider>,
    ) {
        self.packages.write().insert(
            package.to_string(),
            RegisteredPackage {
                display_name: display_name.to_string(),
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                provider,
            },
        );
    }

    /// Remove a package, as after an uninstall.
    pub fn unregister(&self, package: &str) {
        self.packages.write().remove(package);
    }
}

impl PackageRegistry for MemoryRegistry {
    fn theme_packages(&self) -> Vec<String> {
        self.packages.read().keys().cloned().collect()
    }

    fn has_permission(&self, package: &str, permission: &str) -> bool {
        self.packages
            .read()
            .get(package)
            .is_some_and(|p| p.permissions.iter().any(|held| held == permission))
    }

    fn display_name(&self, package: &str) -> Option<String> {
        self.packages
            .read()
            .get(package)
            .map(|p| p.display_name.clone())
    }

    fn resources_for(&self, package: &str) -> Option<Arc<dyn ResourceProvider>> {
        self.packages
            .read()
            .get(package)
            .map(|p| Arc::clone(&p.provider))
    }
}

impl std::fmt::Debug for MemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRegistry")
            .field("packages", &self.packages.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TableProvider;

    #[test]
    fn test_memory_registry_queries() {
        let registry = MemoryRegistry::new();
        registry.register(
            "org.example.night",
            "Night",
            &["skylight.permission.THEME"],
            Arc::new(TableProvider::new()),
        );

        assert_eq!(registry.theme_packages(), vec!["org.example.night"]);
        assert!(registry.has_permission("org.example.night", "skylight.permission.THEME"));
        assert!(!registry.has_permission("org.example.night", "other.permission"));
        assert_eq!(registry.display_name("org.example.night").as_deref(), Some("Night"));
        assert!(registry.resources_for("org.example.night").is_some());
        assert!(registry.resources_for("org.example.missing").is_none());

        registry.unregister("org.example.night");
        assert!(registry.theme_packages().is_empty());
    }
}
