//! # Host Configuration
//!
//! Loads `drover.toml` and turns it into the pieces the host needs.
//!
//! ```toml
//! [bootstrap]
//! target = "full"
//! self_alias = "local"
//!
//! [[phases]]
//! name = "DRUSH_BOOTSTRAP_DRUPAL_UPDATE"
//! ordinal = 8
//!
//! [settings]
//! "site.uri" = "https://local.test"
//!
//! [[aliases]]
//! name = "local"
//! root = "/srv/site"
//! uri = "https://local.test"
//! ```
//!
//! ## Precedence
//!
//! `--phase` > `DROVER_PHASE` > `bootstrap.target` > `"max"`.

use drover_core::services::{Config, SiteAlias, SiteAliasManager};
use drover_core::{DroverError, Phase, SymbolTable};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable that overrides `bootstrap.target`.
pub const PHASE_ENV: &str = "DROVER_PHASE";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "drover.toml";

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// FILE FORMAT
// =============================================================================

/// The `[bootstrap]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapSection {
    /// Phase name to bootstrap to.
    pub target: String,
    /// Alias that `@self` refers to.
    pub self_alias: Option<String>,
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            target: "max".to_string(),
            self_alias: None,
        }
    }
}

/// One `[[phases]]` entry: an extension phase constant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseDefinition {
    pub name: String,
    pub ordinal: i32,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub bootstrap: BootstrapSection,
    pub phases: Vec<PhaseDefinition>,
    pub settings: BTreeMap<String, String>,
    pub aliases: Vec<SiteAlias>,
}

// =============================================================================
// LOADING
// =============================================================================

impl HostConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DroverError> {
        toml::from_str(text).map_err(|e| DroverError::Config(e.to_string()))
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, DroverError> {
        if !path.exists() {
            tracing::debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| DroverError::IoError(format!("Cannot read file metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(DroverError::Config(format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            DroverError::IoError(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        tracing::info!("Loaded configuration from {:?}", path);
        Self::from_toml_str(&text)
    }

    /// Apply the target-phase overrides, strongest last.
    #[must_use]
    pub fn with_target_overrides(mut self, env: Option<String>, flag: Option<String>) -> Self {
        if let Some(target) = flag.or(env).filter(|t| !t.trim().is_empty()) {
            self.bootstrap.target = target;
        }
        self
    }

    /// Build the append-only symbol table: canonical constants plus every
    /// `[[phases]]` entry. Redefinitions are rejected.
    pub fn symbol_table(&self) -> Result<SymbolTable, DroverError> {
        let mut table = SymbolTable::canonical();
        for definition in &self.phases {
            table.register(definition.name.clone(), Phase::new(definition.ordinal))?;
        }
        Ok(table)
    }

    /// The `Config` service handed to consumers.
    #[must_use]
    pub fn service_config(&self) -> Config {
        let mut config = Config::from_settings(self.settings.clone())
            .with("bootstrap.target", self.bootstrap.target.clone());
        if let Some(alias) = &self.bootstrap.self_alias {
            config = config.with("bootstrap.self_alias", alias.clone());
        }
        config
    }

    /// The `SiteAliasManager` service handed to consumers.
    #[must_use]
    pub fn alias_manager(&self) -> SiteAliasManager {
        let manager = self
            .aliases
            .iter()
            .cloned()
            .fold(SiteAliasManager::new(), SiteAliasManager::with_alias);
        match &self.bootstrap.self_alias {
            Some(name) => manager.with_self_alias(name),
            None => manager,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[bootstrap]
target = "site"
self_alias = "local"

[[phases]]
name = "DRUSH_BOOTSTRAP_DRUPAL_UPDATE"
ordinal = 8

[settings]
"site.uri" = "https://local.test"

[[aliases]]
name = "local"
root = "/srv/site"
uri = "https://local.test"
"#;

    #[test]
    fn parses_every_section() {
        let config = HostConfig::from_toml_str(SAMPLE).expect("parse");
        assert_eq!(config.bootstrap.target, "site");
        assert_eq!(config.phases.len(), 1);
        assert_eq!(config.settings.get("site.uri").map(String::as_str), Some("https://local.test"));
        assert_eq!(config.aliases[0].name, "local");
    }

    #[test]
    fn empty_text_is_default() {
        let config = HostConfig::from_toml_str("").expect("parse");
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.bootstrap.target, "max");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = HostConfig::from_toml_str("[bootstrap]\nphase = \"full\"\n");
        assert!(matches!(result, Err(DroverError::Config(_))));
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let config = HostConfig::from_toml_str(SAMPLE).expect("parse");

        let env_only = config
            .clone()
            .with_target_overrides(Some("database".into()), None);
        assert_eq!(env_only.bootstrap.target, "database");

        let both = config
            .clone()
            .with_target_overrides(Some("database".into()), Some("root".into()));
        assert_eq!(both.bootstrap.target, "root");

        let blank = config.with_target_overrides(Some("  ".into()), None);
        assert_eq!(blank.bootstrap.target, "site");
    }

    #[test]
    fn symbol_table_includes_extensions() {
        let config = HostConfig::from_toml_str(SAMPLE).expect("parse");
        let table = config.symbol_table().expect("table");
        assert_eq!(table.get("DRUSH_BOOTSTRAP_DRUPAL_UPDATE"), Some(Phase::new(8)));
    }

    #[test]
    fn redefining_canonical_symbol_fails() {
        let config = HostConfig::from_toml_str(
            "[[phases]]\nname = \"DRUSH_BOOTSTRAP_DRUPAL_FULL\"\nordinal = 9\n",
        )
        .expect("parse");
        assert!(matches!(
            config.symbol_table(),
            Err(DroverError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn services_reflect_configuration() {
        let config = HostConfig::from_toml_str(SAMPLE).expect("parse");

        let service_config = config.service_config();
        assert_eq!(service_config.get("bootstrap.target"), Some("site"));
        assert_eq!(service_config.get("bootstrap.self_alias"), Some("local"));

        let aliases = config.alias_manager();
        let selected = aliases.self_alias().expect("self");
        assert_eq!(selected.uri.as_deref(), Some("https://local.test"));
    }
}
