#![forbid(unsafe_code)]

//! Localization for the jinrou front-end.
//!
//! Provides the shared [`Localization`] context (resource catalog plus a
//! language-change notification source), the `{{name}}` placeholder
//! [`tokenize`]r, and the components that render localized text:
//! [`I18nProvider`], [`Translated`] and the reactive [`Interp`].
//!
//! # How it fits in the system
//! Dialog content is wrapped in an [`I18nProvider`] when the caller loaded
//! a context through a [`LocalizationCache`]. Components below it find the
//! context in their [`Scope`](jinrou_view::Scope). [`Interp`] instances
//! subscribe to language changes while mounted and re-tokenize their
//! template when the language switches.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interp;
pub mod loader;
pub mod localization;
pub mod provider;
pub mod token;
pub mod translator;

pub use cache::{LocalizationCache, get_i18n_for, global_cache, install_cache, uninstall_cache};
pub use catalog::ResourceCatalog;
pub use config::{ConfigError, I18nConfig};
pub use error::I18nError;
pub use interp::{Interp, PlaceholderBindings, render_tokens};
pub use loader::FsCatalogLoader;
pub use localization::{Localization, LocalizationBuilder};
pub use provider::{I18nProvider, Translated};
pub use token::{Token, reconstruct, resource_tokens, tokenize};
pub use translator::FixedTranslator;
