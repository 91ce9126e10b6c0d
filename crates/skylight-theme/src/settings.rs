//! Persisted settings interface.
//!
//! The shell's key/value settings store is an external collaborator;
//! this module defines the interface the theme engine consumes plus an
//! in-memory implementation for embedding and tests.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Well-known settings keys.
pub mod keys {
    /// Package id of the selected theme; defaults to the host sentinel.
    pub const THEME_PACKAGE_NAME: &str = "themePackageName";
    /// Set when any preference changed since the shell last looked.
    pub const PREFERENCES_CHANGED: &str = "preferences_changed";
}

/// Key/value settings store consumed by the theme engine.
pub trait SettingsStore: Send + Sync {
    fn string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);

    fn boolean(&self, key: &str, default: bool) -> bool;
    fn set_boolean(&self, key: &str, value: bool);

    fn integer(&self, key: &str, default: i64) -> i64;
    fn set_integer(&self, key: &str, value: i64);
}

#[derive(Debug, Clone, PartialEq)]
enum SettingValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

/// In-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn string(&self, key: &str) -> Option<String> {
        match self.values.read().get(key) {
            Some(SettingValue::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        self.values
            .write()
            .insert(key.to_string(), SettingValue::Str(value.to_string()));
    }

    fn boolean(&self, key: &str, default: bool) -> bool {
        match self.values.read().get(key) {
            Some(SettingValue::Bool(b)) => *b,
            _ => default,
        }
    }

    fn set_boolean(&self, key: &str, value: bool) {
        self.values
            .write()
            .insert(key.to_string(), SettingValue::Bool(value));
    }

    fn integer(&self, key: &str, default: i64) -> i64 {
        match self.values.read().get(key) {
            Some(SettingValue::Int(i)) => *i,
            _ => default,
        }
    }

    fn set_integer(&self, key: &str, value: i64) {
        self.values
            .write()
            .insert(key.to_string(), SettingValue::Int(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_settings_round_trip() {
        let settings = MemorySettings::new();
        assert_eq!(settings.string(keys::THEME_PACKAGE_NAME), None);

        settings.set_string(keys::THEME_PACKAGE_NAME, "org.example.theme");
        assert_eq!(
            settings.string(keys::THEME_PACKAGE_NAME).as_deref(),
            Some("org.example.theme")
        );

        settings.set_boolean(keys::PREFERENCES_CHANGED, true);
        assert!(settings.boolean(keys::PREFERENCES_CHANGED, false));

        settings.set_integer("allAppsBgAlpha", 180);
        assert_eq!(settings.integer("allAppsBgAlpha", 255), 180);
    }

    #[test]
    fn test_memory_settings_defaults_on_type_mismatch() {
        let settings = MemorySettings::new();
        settings.set_string("flag", "yes");
        assert!(!settings.boolean("flag", false));
    }
}
