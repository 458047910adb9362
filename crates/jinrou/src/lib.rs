#![forbid(unsafe_code)]

//! jinrou front-end public facade.
//!
//! Re-exports the presentation core (dialogs, localization, view
//! primitives, game store) and offers a prelude plus startup helpers.

use std::rc::Rc;

use tracing::info;

pub use jinrou_dialog as dialog;
pub use jinrou_game as game;
pub use jinrou_i18n as i18n;
pub use jinrou_reactive as reactive;
pub use jinrou_view as view;

pub use jinrou_dialog::{Closer, DialogError, DialogHost, Opener};
pub use jinrou_i18n::{I18nConfig, I18nError, Interp, Localization, LocalizationCache, PlaceholderBindings};
pub use jinrou_view::{Component, Document, LayerDocument, Node, Scope, UiEvent};

/// Install a filesystem-backed localization cache described by `config`
/// as this thread's shared context. Nothing is read until the first
/// localized dialog (or [`i18n::get_i18n_for`]) asks for it.
pub fn install_localization(config: I18nConfig) -> Rc<LocalizationCache> {
    for problem in config.validate() {
        tracing::warn!(target: "jinrou.i18n", problem = %problem, "i18n config problem");
    }
    let cache = Rc::new(i18n::FsCatalogLoader::new(config).into_cache());
    if i18n::install_cache(Rc::clone(&cache)) {
        info!(target: "jinrou.i18n", "replaced installed localization cache");
    }
    cache
}

/// Install a global `tracing` subscriber writing to stderr, filtered by
/// `filter` (`RUST_LOG` syntax, e.g. `"jinrou.dialog=debug,info"`).
/// Returns `false` if a subscriber was already installed.
#[cfg(feature = "logging")]
pub fn init_logging(filter: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

pub mod prelude {
    pub use crate::{
        Closer, Component, DialogError, DialogHost, Document, I18nConfig, Interp, LayerDocument, Localization,
        LocalizationCache, Node, Opener, PlaceholderBindings, Scope, UiEvent,
    };

    pub use crate::{dialog, game, i18n, reactive, view};
}

#[cfg(test)]
mod tests {
    use super::install_localization;
    use crate::prelude::*;
    use futures::executor::block_on;
    use std::fs;
    use std::rc::Rc;

    #[test]
    fn installed_localization_feeds_localized_dialogs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ja")).unwrap();
        fs::write(
            dir.path().join("ja").join("game_client.json"),
            r#"{"icon_select": {"title": "アイコン選択"}}"#,
        )
        .unwrap();
        let config = I18nConfig {
            namespaces: vec!["common".into(), "game_client".into()],
            resource_dir: dir.path().to_path_buf(),
            ..I18nConfig::default()
        };
        let cache = install_localization(config);

        let doc = Rc::new(LayerDocument::new());
        let host = DialogHost::new(doc.clone());
        let mut pool = futures::executor::LocalPool::new();
        let fut = host.show_icon_select_dialog(dialog::IconSelectDialog::default());
        let _ = pool.run_until(futures::future::select(Box::pin(fut), futures::future::ready(())));

        assert_eq!(cache.loads_started(), 1);
        let title = doc.render(doc.top().unwrap()).unwrap();
        assert_eq!(title.find("h1").map(Node::text_content).as_deref(), Some("アイコン選択"));

        let loc = block_on(i18n::get_i18n_for()).unwrap();
        assert!(cache.peek().unwrap().ptr_eq(&loc));
        i18n::uninstall_cache();
    }
}
