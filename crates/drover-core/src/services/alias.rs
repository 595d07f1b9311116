//! Site alias lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name of the alias that refers to the site being bootstrapped.
pub const SELF_ALIAS: &str = "@self";

/// A named pointer to a site: where it lives and which URI selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAlias {
    pub name: String,
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl SiteAlias {
    /// Create an alias. A missing leading `@` is added.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize(name),
            root: None,
            uri: None,
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Registry of site aliases, with one of them optionally selected as `@self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteAliasManager {
    aliases: BTreeMap<String, SiteAlias>,
    selected: Option<String>,
}

impl SiteAliasManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias.
    #[must_use]
    pub fn with_alias(mut self, mut alias: SiteAlias) -> Self {
        alias.name = normalize(&alias.name);
        self.aliases.insert(alias.name.clone(), alias);
        self
    }

    /// Select which alias `@self` refers to.
    #[must_use]
    pub fn with_self_alias(mut self, name: &str) -> Self {
        self.selected = Some(normalize(name));
        self
    }

    /// Look up an alias by name, with or without the leading `@`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SiteAlias> {
        let name = normalize(name);
        if name == SELF_ALIAS {
            return self.self_alias();
        }
        self.aliases.get(&name)
    }

    /// The alias currently selected as `@self`.
    #[must_use]
    pub fn self_alias(&self) -> Option<&SiteAlias> {
        self.selected
            .as_ref()
            .and_then(|name| self.aliases.get(name))
    }

    /// All aliases in name order.
    pub fn aliases(&self) -> impl Iterator<Item = &SiteAlias> {
        self.aliases.values()
    }
}

fn normalize(name: &str) -> String {
    if name.starts_with('@') {
        name.to_string()
    } else {
        format!("@{}", name)
    }
}
