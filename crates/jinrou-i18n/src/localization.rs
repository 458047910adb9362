#![forbid(unsafe_code)]

//! The shared localization context.
//!
//! A [`Localization`] bundles the resource catalog with the active
//! language. The language lives in an [`Observable`], which doubles as the
//! change-notification source: components attach with
//! [`Localization::on_language_changed`] and detach by dropping the
//! returned [`Subscription`].
//!
//! Handles are cheap clones of one `Rc`; every dialog and every
//! interpolation component sees the same instance.

use std::cell::RefCell;
use std::rc::Rc;

use jinrou_reactive::{Observable, Subscription};
use tracing::info_span;

use crate::catalog::ResourceCatalog;
use crate::translator::FixedTranslator;

struct LocalizationInner {
    catalog: RefCell<ResourceCatalog>,
    language: Observable<String>,
    fallback_language: Option<String>,
    default_namespace: String,
}

#[derive(Clone)]
pub struct Localization {
    inner: Rc<LocalizationInner>,
}

pub struct LocalizationBuilder {
    catalog: ResourceCatalog,
    language: String,
    fallback_language: Option<String>,
    default_namespace: String,
}

impl LocalizationBuilder {
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = Some(language.into());
        self
    }

    #[must_use]
    pub fn default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn build(self) -> Localization {
        Localization {
            inner: Rc::new(LocalizationInner {
                catalog: RefCell::new(self.catalog),
                language: Observable::new(self.language),
                fallback_language: self.fallback_language,
                default_namespace: self.default_namespace,
            }),
        }
    }
}

impl Localization {
    /// Start building a context over `catalog`. Defaults: language `ja`,
    /// no fallback, namespace `common`.
    pub fn builder(catalog: ResourceCatalog) -> LocalizationBuilder {
        LocalizationBuilder {
            catalog,
            language: "ja".into(),
            fallback_language: None,
            default_namespace: "common".into(),
        }
    }

    /// Active language.
    #[must_use]
    pub fn language(&self) -> String {
        self.inner.language.get()
    }

    #[must_use]
    pub fn fallback_language(&self) -> Option<&str> {
        self.inner.fallback_language.as_deref()
    }

    #[must_use]
    pub fn default_namespace(&self) -> &str {
        &self.inner.default_namespace
    }

    /// Switch the active language. Subscribers run synchronously, in
    /// registration order, only if the language actually changed.
    pub fn change_language(&self, language: impl Into<String>) {
        let language = language.into();
        let previous = self.language();
        if previous == language {
            return;
        }
        let _span = info_span!(
            "i18n.language_changed",
            from = %previous,
            to = %language,
            listeners = self.listener_count() as u64,
        )
        .entered();
        self.inner.language.set(language);
    }

    /// Attach a language-change listener for as long as the returned guard
    /// lives.
    pub fn on_language_changed(&self, listener: impl Fn(&str) + 'static) -> Subscription {
        self.inner.language.subscribe(move |lang: &String| listener(lang))
    }

    /// Listeners whose guard is still alive.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.language.live_subscriber_count()
    }

    /// Listener slots held by the language observable, including dropped
    /// guards not yet pruned.
    #[must_use]
    pub fn listener_slots(&self) -> usize {
        self.inner.language.subscriber_count()
    }

    /// Number of language switches so far.
    #[must_use]
    pub fn language_version(&self) -> u64 {
        self.inner.language.version()
    }

    /// Exact resource lookup; `None` if absent. No fallback language.
    #[must_use]
    pub fn resource(&self, language: &str, namespace: &str, key: &str) -> Option<String> {
        self.inner
            .catalog
            .borrow()
            .get(language, namespace, key)
            .map(str::to_owned)
    }

    /// Translator pinned to `language` and `namespace`.
    #[must_use]
    pub fn fixed_translator(&self, language: &str, namespace: &str) -> FixedTranslator {
        FixedTranslator::new(self.clone(), language, namespace)
    }

    /// Translator for the active language and the default namespace.
    #[must_use]
    pub fn translator(&self) -> FixedTranslator {
        let ns = self.inner.default_namespace.clone();
        FixedTranslator::new(self.clone(), &self.language(), &ns)
    }

    /// Translate `key` (optionally `ns:key`) in the active language.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translator().t(key)
    }

    /// Merge additional resources, e.g. a lazily loaded namespace.
    pub fn add_resource_bundle<K, V>(
        &self,
        language: &str,
        namespace: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner
            .catalog
            .borrow_mut()
            .add_bundle(language, namespace, entries);
    }

    /// Run `f` against the catalog.
    pub fn with_catalog<R>(&self, f: impl FnOnce(&ResourceCatalog) -> R) -> R {
        f(&self.inner.catalog.borrow())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Localization) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localization")
            .field("language", &self.language())
            .field("fallback_language", &self.inner.fallback_language)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
