//! Error types for theme resolution.

use crate::provider::{ResourceCategory, ResourceId};

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Errors that can occur in the theme engine.
///
/// Resolution deliberately keeps this surface small: provider failures
/// and missing theme packages degrade to host defaults instead of
/// erroring, so a broken theme can never keep icons from rendering.
/// `NotFound` only appears on the wrappers that structurally require a
/// value and were given no default.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A resource was found in neither the theme nor the host catalog.
    #[error("resource {id} not found in category {category:?}")]
    NotFound {
        id: ResourceId,
        category: ResourceCategory,
    },

    /// A theme package is no longer resolvable.
    #[error("theme package '{package}' is not available")]
    PackageUnavailable { package: String },
}

impl ThemeError {
    /// Create a not-found error.
    pub fn not_found(id: ResourceId, category: ResourceCategory) -> Self {
        Self::NotFound { id, category }
    }

    /// Create a package-unavailable error.
    pub fn package_unavailable(package: impl Into<String>) -> Self {
        Self::PackageUnavailable {
            package: package.into(),
        }
    }
}
