#![forbid(unsafe_code)]

//! Filesystem resource loader.
//!
//! Reads `<resource_dir>/<language>/<namespace>.json` for every configured
//! language and namespace. Missing bundles are skipped; the default
//! language must contribute at least one.

use std::io::ErrorKind;
use std::rc::Rc;

use tracing::{debug, info};
use web_time::Instant;

use crate::cache::LocalizationCache;
use crate::catalog::ResourceCatalog;
use crate::config::I18nConfig;
use crate::error::I18nError;
use crate::localization::Localization;

#[derive(Debug, Clone)]
pub struct FsCatalogLoader {
    config: I18nConfig,
}

impl FsCatalogLoader {
    pub fn new(config: I18nConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    pub fn load_catalog(&self) -> Result<ResourceCatalog, I18nError> {
        let started = Instant::now();
        let mut catalog = ResourceCatalog::new();
        let mut bundles = 0u64;
        for language in &self.config.languages {
            for namespace in &self.config.namespaces {
                let path = self.config.bundle_path(language, namespace);
                let json = match std::fs::read_to_string(&path) {
                    Ok(json) => json,
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        debug!(target: "jinrou.i18n", path = %path.display(), "resource bundle missing, skipped");
                        continue;
                    }
                    Err(err) => return Err(I18nError::io(path, err)),
                };
                catalog.add_json_bundle(language, namespace, &json)?;
                bundles += 1;
            }
        }
        if !catalog.has_language(&self.config.default_language) {
            return Err(I18nError::MissingLanguage(self.config.default_language.clone()));
        }
        info!(
            target: "jinrou.i18n",
            bundles,
            resources = catalog.len() as u64,
            duration_us = started.elapsed().as_micros() as u64,
            "resource catalog loaded"
        );
        Ok(catalog)
    }

    /// Load the catalog and build a context in the configured default
    /// language.
    pub fn load(&self) -> Result<Localization, I18nError> {
        let catalog = self.load_catalog()?;
        let mut builder = Localization::builder(catalog)
            .language(self.config.default_language.clone())
            .default_namespace(self.config.default_namespace.clone());
        if let Some(fallback) = &self.config.fallback_language {
            builder = builder.fallback_language(fallback.clone());
        }
        Ok(builder.build())
    }

    /// A cache whose loader reads from disk on first use.
    ///
    /// The bundle files are read with blocking `std::fs` calls when the
    /// load future is first polled, on the polling thread. Hosts that must
    /// not block there should read the bundles elsewhere and hand the
    /// finished [`Localization`] to [`LocalizationCache::ready`], or build
    /// the cache with [`LocalizationCache::new`] over their own async reader.
    pub fn into_cache(self) -> LocalizationCache {
        let loader = Rc::new(self);
        LocalizationCache::new(move || {
            let loader = Rc::clone(&loader);
            async move { loader.load() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, lang: &str, ns: &str, body: &str) {
        let lang_dir = dir.join(lang);
        fs::create_dir_all(&lang_dir).unwrap();
        fs::write(lang_dir.join(format!("{ns}.json")), body).unwrap();
    }

    fn config(dir: &Path) -> I18nConfig {
        I18nConfig {
            default_language: "ja".into(),
            fallback_language: Some("en".into()),
            languages: vec!["ja".into(), "en".into()],
            namespaces: vec!["common".into(), "game_client".into()],
            resource_dir: dir.to_path_buf(),
            ..I18nConfig::default()
        }
    }

    #[test]
    fn loads_available_bundles() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ja", "common", r#"{"ok": "了解"}"#);
        write(dir.path(), "ja", "game_client", r#"{"kick": {"title": "{{name}}を追放"}}"#);
        write(dir.path(), "en", "common", r#"{"ok": "OK", "only_en": "English"}"#);

        let loc = FsCatalogLoader::new(config(dir.path())).load().unwrap();
        assert_eq!(loc.language(), "ja");
        assert_eq!(loc.t("ok"), "了解");
        assert_eq!(loc.t("only_en"), "English");
        assert_eq!(
            loc.resource("ja", "game_client", "kick.title").as_deref(),
            Some("{{name}}を追放")
        );
    }

    #[test]
    fn default_language_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en", "common", r#"{"ok": "OK"}"#);
        let err = FsCatalogLoader::new(config(dir.path())).load().unwrap_err();
        assert!(matches!(err, I18nError::MissingLanguage(lang) if lang == "ja"));
    }

    #[test]
    fn malformed_bundle_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ja", "common", "[1, 2]");
        let err = FsCatalogLoader::new(config(dir.path())).load().unwrap_err();
        assert!(matches!(err, I18nError::NotAnObject { .. }));
    }

    #[test]
    fn cache_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ja", "common", r#"{"ok": "了解"}"#);
        let cache = FsCatalogLoader::new(config(dir.path())).into_cache();
        let a = block_on(cache.get()).unwrap();
        let b = block_on(cache.get()).unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(cache.loads_started(), 1);
    }

    #[test]
    fn cache_reads_disk_on_first_poll_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCatalogLoader::new(config(dir.path())).into_cache();
        assert_eq!(cache.loads_started(), 0);

        // Written after the cache was built: still picked up.
        write(dir.path(), "ja", "common", r#"{"ok": "了解"}"#);
        let loc = block_on(cache.get()).unwrap();
        assert_eq!(loc.t("ok"), "了解");

        let preloaded = FsCatalogLoader::new(config(dir.path())).load().unwrap();
        let ready = LocalizationCache::ready(preloaded);
        assert_eq!(block_on(ready.get()).unwrap().t("ok"), "了解");
        assert_eq!(ready.loads_started(), 0);
    }
}
