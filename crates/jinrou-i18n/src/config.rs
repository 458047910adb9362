#![forbid(unsafe_code)]

//! Localization configuration, loadable from TOML or JSON.
//!
//! ```toml
//! # i18n.toml
//! default_language = "ja"
//! fallback_language = "en"
//! languages = ["ja", "en"]
//! namespaces = ["common", "game_client", "game_client_form"]
//! resource_dir = "public/locales"
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language selected at startup.
    pub default_language: String,
    /// Consulted by translators when a key is missing in the active
    /// language. Resource lookups for interpolation never fall back.
    pub fallback_language: Option<String>,
    /// Languages to load.
    pub languages: Vec<String>,
    /// Namespaces to load for each language.
    pub namespaces: Vec<String>,
    /// Namespace used by `Localization::t` when the key has no `ns:` prefix.
    pub default_namespace: String,
    /// Bundles are read from `<resource_dir>/<language>/<namespace>.json`.
    pub resource_dir: PathBuf,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "ja".into(),
            fallback_language: None,
            languages: vec!["ja".into()],
            namespaces: vec!["common".into()],
            default_namespace: "common".into(),
            resource_dir: PathBuf::from("locales"),
        }
    }
}

impl I18nConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Human-readable problems; empty when the configuration is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.default_language.is_empty() {
            errors.push("default_language must not be empty".into());
        }
        if !self.languages.contains(&self.default_language) {
            errors.push(format!(
                "default_language {:?} is not listed in languages",
                self.default_language
            ));
        }
        if let Some(fallback) = &self.fallback_language
            && !self.languages.contains(fallback)
        {
            errors.push(format!("fallback_language {fallback:?} is not listed in languages"));
        }
        if self.namespaces.is_empty() {
            errors.push("namespaces must not be empty".into());
        }
        if self.namespaces.iter().any(|ns| ns.contains(':')) {
            errors.push("namespace names must not contain ':'".into());
        }
        errors
    }

    /// Path of one bundle file.
    #[must_use]
    pub fn bundle_path(&self, language: &str, namespace: &str) -> PathBuf {
        self.resource_dir.join(language).join(format!("{namespace}.json"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read i18n config: {0}")]
    Io(#[source] std::io::Error),
    #[error("invalid i18n config TOML: {0}")]
    Toml(#[source] toml::de::Error),
    #[error("invalid i18n config JSON: {0}")]
    Json(#[source] serde_json::Error),
}
