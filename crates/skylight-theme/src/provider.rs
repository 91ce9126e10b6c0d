//! Resource provider abstraction and typed resource values.
//!
//! A [`ResourceProvider`] is an opaque handle over a named resource
//! catalog: either the host application's built-in resources or an
//! installed theme package's own namespace. The resolver consults
//! providers, it never owns their contents.

use std::collections::HashMap;

use skylight_compose::Drawable;

/// Numeric resource identifier in a provider's namespace.
///
/// Zero is never a valid identifier.
pub type ResourceId = u32;

/// The six resource categories a theme package may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// Image/drawable resources.
    Drawable,
    /// Packed ARGB colors.
    Color,
    /// Plain integers.
    Integer,
    /// Lengths/dimensions in pixels.
    Length,
    /// Ordered lists of strings.
    StringList,
    /// Boolean flags.
    Boolean,
}

/// A typed resource value.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    Drawable(Drawable),
    Color(u32),
    Integer(i32),
    Length(f32),
    StringList(Vec<String>),
    Boolean(bool),
}

impl ResourceValue {
    /// The category this value belongs to.
    pub fn category(&self) -> ResourceCategory {
        match self {
            ResourceValue::Drawable(_) => ResourceCategory::Drawable,
            ResourceValue::Color(_) => ResourceCategory::Color,
            ResourceValue::Integer(_) => ResourceCategory::Integer,
            ResourceValue::Length(_) => ResourceCategory::Length,
            ResourceValue::StringList(_) => ResourceCategory::StringList,
            ResourceValue::Boolean(_) => ResourceCategory::Boolean,
        }
    }

    pub fn into_drawable(self) -> Option<Drawable> {
        match self {
            ResourceValue::Drawable(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_color(self) -> Option<u32> {
        match self {
            ResourceValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_integer(self) -> Option<i32> {
        match self {
            ResourceValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn into_length(self) -> Option<f32> {
        match self {
            ResourceValue::Length(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_string_list(self) -> Option<Vec<String>> {
        match self {
            ResourceValue::StringList(list) => Some(list),
            _ => None,
        }
    }

    pub fn into_boolean(self) -> Option<bool> {
        match self {
            ResourceValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

/// Opaque handle over a named, typed resource catalog.
///
/// Lookups that find a value of the wrong category report a miss;
/// providers never surface errors to the resolution path.
pub trait ResourceProvider: Send + Sync {
    /// Look up a resource by numeric id.
    fn lookup_id(&self, id: ResourceId, category: ResourceCategory) -> Option<ResourceValue>;

    /// Look up a resource by (already normalized) name.
    fn lookup_name(&self, name: &str, category: ResourceCategory) -> Option<ResourceValue>;

    /// Resolve a name to its numeric id in this provider's namespace.
    fn identifier(&self, name: &str, category: ResourceCategory) -> Option<ResourceId>;

    /// The symbolic name a numeric id was declared under.
    fn entry_name(&self, id: ResourceId) -> Option<String>;
}

/// Normalize a symbolic resource name for theme-side lookup.
///
/// Theme packages expose resources under normalized names derived from
/// the host's symbolic names: lower-cased, trimmed, with dots and
/// spaces replaced by underscores. This normalization is load-bearing;
/// every theme-side name lookup goes through it.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim().replace(['.', ' '], "_")
}

/// In-memory [`ResourceProvider`] backed by hash tables.
///
/// Serves as the host application's resource catalog and as the theme
/// package namespaces in tests.
#[derive(Debug, Default)]
pub struct TableProvider {
    by_id: HashMap<ResourceId, (String, ResourceValue)>,
    by_name: HashMap<(String, ResourceCategory), ResourceId>,
}

impl TableProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under a numeric id and symbolic name.
    ///
    /// Re-inserting an id replaces the previous entry.
    pub fn insert(&mut self, id: ResourceId, name: impl Into<String>, value: ResourceValue) {
        let name = name.into();
        self.by_name.insert((name.clone(), value.category()), id);
        self.by_id.insert(id, (name, value));
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ResourceProvider for TableProvider {
    fn lookup_id(&self, id: ResourceId, category: ResourceCategory) -> Option<ResourceValue> {
        self.by_id
            .get(&id)
            .filter(|(_, value)| value.category() == category)
            .map(|(_, value)| value.clone())
    }

    fn lookup_name(&self, name: &str, category: ResourceCategory) -> Option<ResourceValue> {
        let id = self.identifier(name, category)?;
        self.lookup_id(id, category)
    }

    fn identifier(&self, name: &str, category: ResourceCategory) -> Option<ResourceId> {
        self.by_name.get(&(name.to_string(), category)).copied()
    }

    fn entry_name(&self, id: ResourceId) -> Option<String> {
        self.by_id.get(&id).map(|(name, _)| name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Theme.Preview"), "theme_preview");
        assert_eq!(normalize_name("  Icon Background "), "icon_background");
        assert_eq!(normalize_name("already_normal"), "already_normal");
    }

    #[test]
    fn test_table_provider_lookup_by_id_and_name() {
        let mut provider = TableProvider::new();
        provider.insert(10, "accent", ResourceValue::Color(0xFF00FF00));

        assert_eq!(
            provider.lookup_id(10, ResourceCategory::Color),
            Some(ResourceValue::Color(0xFF00FF00))
        );
        assert_eq!(
            provider.lookup_name("accent", ResourceCategory::Color),
            Some(ResourceValue::Color(0xFF00FF00))
        );
        assert_eq!(provider.entry_name(10).as_deref(), Some("accent"));
        assert_eq!(provider.identifier("accent", ResourceCategory::Color), Some(10));
    }

    #[test]
    fn test_table_provider_category_mismatch_is_a_miss() {
        let mut provider = TableProvider::new();
        provider.insert(10, "accent", ResourceValue::Color(0xFF00FF00));

        assert_eq!(provider.lookup_id(10, ResourceCategory::Integer), None);
        assert_eq!(provider.lookup_name("accent", ResourceCategory::Boolean), None);
    }

    #[test]
    fn test_value_projections() {
        assert_eq!(ResourceValue::Integer(3).into_integer(), Some(3));
        assert_eq!(ResourceValue::Integer(3).into_color(), None);
        assert_eq!(ResourceValue::Boolean(true).into_boolean(), Some(true));
    }
}
