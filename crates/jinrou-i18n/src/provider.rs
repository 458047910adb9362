#![forbid(unsafe_code)]

//! Context injection components.
//!
//! [`I18nProvider`] wraps content and makes a [`Localization`] visible to
//! everything below it. While mounted it listens for language changes and
//! asks the host to repaint, so consumers that translate on every render
//! (such as [`Translated`]) pick up the new language without holding a
//! subscription of their own.

use jinrou_reactive::Subscription;
use jinrou_view::{Component, Node, Redraw, Scope, UiEvent};
use tracing::debug;

use crate::localization::Localization;
use crate::translator::FixedTranslator;

pub struct I18nProvider {
    localization: Localization,
    child: Box<dyn Component>,
    /// Present while mounted: the scope it was activated with and the
    /// language listener.
    mounted: Option<(Scope, Subscription)>,
}

impl I18nProvider {
    pub fn new(localization: Localization, child: impl Component + 'static) -> Self {
        Self {
            localization,
            child: Box::new(child),
            mounted: None,
        }
    }

    #[must_use]
    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    /// Provide a different instance. When mounted, the content is
    /// deactivated against the old instance and activated against the new
    /// one, so every listener below moves with it.
    pub fn set_localization(&mut self, localization: Localization) {
        if self.localization.ptr_eq(&localization) {
            return;
        }
        let remount = self.mounted.take();
        if remount.is_some() {
            self.child.deactivate();
        }
        self.localization = localization;
        if let Some((scope, _old)) = remount {
            self.activate(&scope);
            scope.redraw().request();
        }
    }

    fn child_scope(&self, scope: &Scope) -> Scope {
        scope.provide(self.localization.clone())
    }
}

fn listen(localization: &Localization, redraw: Redraw) -> Subscription {
    localization.on_language_changed(move |language| {
        debug!(target: "jinrou.i18n", language, "provider re-providing context");
        redraw.request();
    })
}

impl Component for I18nProvider {
    fn name(&self) -> &'static str {
        self.child.name()
    }

    fn activate(&mut self, scope: &Scope) {
        let subscription = listen(&self.localization, scope.redraw().clone());
        self.mounted = Some((scope.clone(), subscription));
        let child_scope = self.child_scope(scope);
        self.child.activate(&child_scope);
    }

    fn deactivate(&mut self) {
        self.child.deactivate();
        self.mounted = None;
    }

    fn render(&self, scope: &Scope) -> Node {
        self.child.render(&self.child_scope(scope))
    }

    fn handle_event(&mut self, event: &UiEvent, scope: &Scope) -> bool {
        let child_scope = self.child_scope(scope);
        self.child.handle_event(event, &child_scope)
    }
}

type TranslateFn = Box<dyn Fn(&FixedTranslator) -> Node>;

/// Render-prop consumer: renders through a translator for the active
/// language of the provided context, or nothing without a provider.
pub struct Translated {
    namespace: Option<String>,
    render: TranslateFn,
}

impl Translated {
    pub fn new(render: impl Fn(&FixedTranslator) -> Node + 'static) -> Self {
        Self {
            namespace: None,
            render: Box::new(render),
        }
    }

    /// Bind the translator to `namespace` instead of the context default.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl Component for Translated {
    fn name(&self) -> &'static str {
        "Translated"
    }

    fn render(&self, scope: &Scope) -> Node {
        let Some(localization) = scope.get::<Localization>() else {
            return Node::Empty;
        };
        let namespace = self
            .namespace
            .as_deref()
            .unwrap_or(localization.default_namespace());
        let t = localization.fixed_translator(&localization.language(), namespace);
        (self.render)(&t)
    }
}
