//! Flat string settings shared with consumers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host configuration as seen by consumer objects.
///
/// Keys are dotted paths (`bootstrap.target`, `site.uri`). Values are kept as
/// strings; consumers parse what they need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    settings: BTreeMap<String, String>,
}

impl Config {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from existing settings.
    #[must_use]
    pub fn from_settings(settings: BTreeMap<String, String>) -> Self {
        Self { settings }
    }

    /// Add or replace a setting.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Get a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Get a setting, or `default` when it is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Iterate over all settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Check if there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_falls_back() {
        let config = Config::new().with("site.uri", "https://example.org");
        assert_eq!(config.get("site.uri"), Some("https://example.org"));
        assert_eq!(config.get_or("site.root", "/var/www"), "/var/www");
        assert_eq!(config.len(), 1);
    }
}
