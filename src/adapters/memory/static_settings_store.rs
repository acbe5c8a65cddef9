//! Settings store backed by a fixed map.

use std::collections::HashMap;

use crate::ports::SettingsStore;

/// Immutable key/value settings, e.g. built from application config.
#[derive(Debug, Clone, Default)]
pub struct StaticSettingsStore {
    values: HashMap<String, String>,
}

impl StaticSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a setting; empty values are stored as-is.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl FromIterator<(String, String)> for StaticSettingsStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl SettingsStore for StaticSettingsStore {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_configured_values() {
        let store = StaticSettingsStore::new().with("posId", "123").with("debug", "1");

        assert_eq!(store.get_setting("posId").as_deref(), Some("123"));
        assert!(store.get_flag("debug"));
        assert_eq!(store.get_setting("missing"), None);
    }
}
