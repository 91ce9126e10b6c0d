//! Theme overlay resolution for the Skylight shell.
//!
//! This crate answers one question for the render path: given a
//! resource the host would normally use, does the active theme package
//! supply a replacement? [`ThemeResolver`] performs those lookups with
//! host fallback, [`ThemePackageCatalog`] tracks which theme packages
//! are installed, and the [`pipeline`] module wires resolved resources
//! into an icon compositor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use skylight_theme::{
//!     MemoryRegistry, MemorySettings, ResourceValue, TableProvider, ThemeResolver,
//! };
//!
//! let mut host = TableProvider::new();
//! host.insert(1, "workspace_accent_color", ResourceValue::Color(0xFF112233));
//!
//! let resolver = ThemeResolver::new(
//!     Arc::new(host),
//!     Arc::new(MemoryRegistry::new()),
//!     Arc::new(MemorySettings::new()),
//! );
//!
//! // No theme selected, so the host value comes through.
//! assert_eq!(resolver.color(1).unwrap(), 0xFF112233);
//! ```

pub mod catalog;
pub mod error;
pub mod names;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod settings;

pub use catalog::{CatalogState, THEME_PERMISSION, ThemeInfo, ThemePackageCatalog};
pub use error::{Result, ThemeError};
pub use pipeline::{IconPipelineSpec, build_compositor, load_icon_backgrounds};
pub use provider::{
    ResourceCategory, ResourceId, ResourceProvider, ResourceValue, TableProvider, normalize_name,
};
pub use registry::{MemoryRegistry, PackageRegistry};
pub use resolver::{HOST_PACKAGE, ThemeResolver};
pub use settings::{MemorySettings, SettingsStore, keys};
