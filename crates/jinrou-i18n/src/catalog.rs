#![forbid(unsafe_code)]

//! Resource strings indexed by language, namespace and key.
//!
//! Bundles are JSON objects; nested objects are flattened into dotted keys
//! so `{"Merchant": {"description": "..."}}` is looked up as
//! `Merchant.description`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;

use crate::error::I18nError;

type Bundle = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    /// language -> namespace -> key -> template
    resources: HashMap<String, HashMap<String, Bundle>>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) one resource string.
    pub fn add_resource(
        &mut self,
        language: impl Into<String>,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.bundle_mut(language.into(), namespace.into())
            .insert(key.into(), value.into());
    }

    /// Merge a whole bundle of already flattened `key -> template` pairs.
    pub fn add_bundle<K, V>(
        &mut self,
        language: impl Into<String>,
        namespace: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let bundle = self.bundle_mut(language.into(), namespace.into());
        bundle.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Parse and merge a JSON bundle.
    pub fn add_json_bundle(&mut self, language: &str, namespace: &str, json: &str) -> Result<(), I18nError> {
        let value: Value = serde_json::from_str(json).map_err(|source| I18nError::Json {
            language: language.to_owned(),
            namespace: namespace.to_owned(),
            source: Arc::new(source),
        })?;
        let Value::Object(map) = value else {
            return Err(I18nError::NotAnObject {
                language: language.to_owned(),
                namespace: namespace.to_owned(),
            });
        };
        let mut flat = Vec::new();
        for (key, value) in map {
            flatten(key, value, &mut flat);
        }
        self.add_bundle(language, namespace, flat);
        Ok(())
    }

    /// Build a catalog from a single JSON bundle.
    pub fn from_json_str(language: &str, namespace: &str, json: &str) -> Result<Self, I18nError> {
        let mut catalog = Self::new();
        catalog.add_json_bundle(language, namespace, json)?;
        Ok(catalog)
    }

    /// Exact lookup; no language fallback.
    #[must_use]
    pub fn get(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
        self.resources
            .get(language)?
            .get(namespace)?
            .get(key)
            .map(String::as_str)
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.resources.contains_key(language)
    }

    /// Languages with at least one bundle, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.resources.keys().map(String::as_str).collect();
        set.into_iter().collect()
    }

    /// Namespaces loaded for `language`, sorted.
    #[must_use]
    pub fn namespaces(&self, language: &str) -> Vec<&str> {
        let Some(ns) = self.resources.get(language) else {
            return Vec::new();
        };
        let set: BTreeSet<&str> = ns.keys().map(String::as_str).collect();
        set.into_iter().collect()
    }

    /// Total number of resource strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bundle_mut(&mut self, language: String, namespace: String) -> &mut Bundle {
        self.resources
            .entry(language)
            .or_default()
            .entry(namespace)
            .or_default()
    }
}

fn flatten(prefix: String, value: Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(s) => out.push((prefix, s)),
        Value::Object(map) => {
            for (key, child) in map {
                flatten(format!("{prefix}.{key}"), child, out);
            }
        }
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        // Arrays and nulls have no string form in a resource bundle.
        Value::Array(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GAME_CLIENT_FORM: &str = r#"{
        "Merchant": {
            "description": "Send a kit to someone.",
            "kit": { "Diviner": "Diviner kit", "Guard": "Guard kit" }
        },
        "limit": 3
    }"#;

    #[test]
    fn nested_json_is_flattened() {
        let catalog = ResourceCatalog::from_json_str("en", "game_client_form", GAME_CLIENT_FORM).unwrap();
        assert_eq!(
            catalog.get("en", "game_client_form", "Merchant.description"),
            Some("Send a kit to someone.")
        );
        assert_eq!(
            catalog.get("en", "game_client_form", "Merchant.kit.Guard"),
            Some("Guard kit")
        );
        assert_eq!(catalog.get("en", "game_client_form", "limit"), Some("3"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn lookup_is_exact() {
        let mut catalog = ResourceCatalog::new();
        catalog.add_resource("ja", "common", "ok", "OK");
        assert_eq!(catalog.get("ja", "common", "ok"), Some("OK"));
        assert_eq!(catalog.get("en", "common", "ok"), None);
        assert_eq!(catalog.get("ja", "other", "ok"), None);
        assert_eq!(catalog.get("ja", "common", "missing"), None);
    }

    #[test]
    fn bundles_merge() {
        let mut catalog = ResourceCatalog::new();
        catalog.add_bundle("ja", "common", [("a", "1"), ("b", "2")]);
        catalog.add_bundle("ja", "common", [("b", "3")]);
        catalog.add_resource("en", "dialog", "x", "y");
        assert_eq!(catalog.get("ja", "common", "b"), Some("3"));
        assert_eq!(catalog.languages(), vec!["en", "ja"]);
        assert_eq!(catalog.namespaces("ja"), vec!["common"]);
        assert!(catalog.namespaces("fr").is_empty());
    }

    #[test]
    fn non_object_bundle_is_rejected() {
        let err = ResourceCatalog::from_json_str("en", "common", "[1, 2]").unwrap_err();
        assert!(matches!(err, I18nError::NotAnObject { .. }));
        let err = ResourceCatalog::from_json_str("en", "common", "{").unwrap_err();
        assert!(matches!(err, I18nError::Json { .. }));
    }
}
