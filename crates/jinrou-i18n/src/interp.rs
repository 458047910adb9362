#![forbid(unsafe_code)]

//! Localized text with node interpolation.
//!
//! [`Interp`] renders the resource `namespace`/`key` of the active
//! language, substituting each `{{name}}` placeholder with a caller
//! supplied [`Node`] from its [`PlaceholderBindings`].
//!
//! # Lifecycle
//!
//! ```text
//!   new ──activate(scope with Localization)──► Mounted(bindings, lang)
//!                                                 │   ▲
//!                                language changed │   │ re-tokenize
//!                                                 ▼   │
//!                                             Mounted(bindings, lang')
//!                                                 │
//!                                  deactivate ────┴──► Unmounted (terminal)
//! ```
//!
//! The language-change subscription is held only while mounted. The
//! template is tokenized on activation, on a language change and on
//! [`Interp::set_key`]; plain renders and binding updates reuse the cached
//! tokens.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use jinrou_reactive::Subscription;
use jinrou_view::{Component, Node, Redraw, Scope};
use tracing::trace;

use crate::localization::Localization;
use crate::token::{Token, resource_tokens};

/// Placeholder name → content substituted at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderBindings {
    values: HashMap<String, Node>,
}

impl PlaceholderBindings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(name, node);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        self.values.insert(name.into(), node.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.values.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, N: Into<Node>> FromIterator<(K, N)> for PlaceholderBindings {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (k, n) in iter {
            bindings.insert(k, n);
        }
        bindings
    }
}

/// Map tokens to nodes: literals become text (empty → [`Node::Empty`]),
/// placeholders become their binding or [`Node::Empty`] when unbound.
#[must_use]
pub fn render_tokens(tokens: &[Token], bindings: &PlaceholderBindings) -> Vec<Node> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Literal(s) => Node::text(s.as_str()),
            Token::Placeholder(name) => bindings.get(name).cloned().unwrap_or_default(),
        })
        .collect()
}

struct InterpState {
    namespace: String,
    key: String,
    language: Option<String>,
    tokens: Vec<Token>,
    tokenize_count: u64,
}

impl InterpState {
    fn retokenize(&mut self, localization: &Localization, language: &str) {
        self.tokens = resource_tokens(localization, language, &self.namespace, &self.key);
        self.language = Some(language.to_owned());
        self.tokenize_count += 1;
        trace!(
            target: "jinrou.i18n",
            namespace = %self.namespace,
            key = %self.key,
            language,
            tokens = self.tokens.len() as u64,
            "interpolation template tokenized"
        );
    }
}

struct Mounted {
    localization: Localization,
    redraw: Redraw,
    _subscription: Subscription,
}

/// Reactive interpolated text component.
pub struct Interp {
    bindings: PlaceholderBindings,
    state: Rc<RefCell<InterpState>>,
    mounted: Option<Mounted>,
}

impl Interp {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bindings: PlaceholderBindings::new(),
            state: Rc::new(RefCell::new(InterpState {
                namespace: namespace.into(),
                key: key.into(),
                language: None,
                tokens: Vec::new(),
                tokenize_count: 0,
            })),
            mounted: None,
        }
    }

    #[must_use]
    pub fn bindings(mut self, bindings: PlaceholderBindings) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.bindings.insert(name, node);
        self
    }

    /// Replace the bindings and request a repaint when mounted. The
    /// template is not re-tokenized.
    pub fn set_bindings(&mut self, bindings: PlaceholderBindings) {
        self.bindings = bindings;
        if let Some(mounted) = &self.mounted {
            mounted.redraw.request();
        }
    }

    /// Point at another resource; re-tokenizes immediately when mounted.
    pub fn set_key(&mut self, namespace: impl Into<String>, key: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.namespace = namespace.into();
        state.key = key.into();
        if let Some(mounted) = &self.mounted {
            let language = mounted.localization.language();
            state.retokenize(&mounted.localization, &language);
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Tokens from the last tokenization.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.state.borrow().tokens.clone()
    }

    /// Language the current tokens were produced for.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        self.state.borrow().language.clone()
    }

    /// How many times the template has been tokenized.
    #[must_use]
    pub fn tokenize_count(&self) -> u64 {
        self.state.borrow().tokenize_count
    }
}

impl Component for Interp {
    fn name(&self) -> &'static str {
        "Interp"
    }

    fn activate(&mut self, scope: &Scope) {
        // Without a provider in scope there is nothing to render.
        let Some(localization) = scope.get::<Localization>().cloned() else {
            return;
        };
        self.state
            .borrow_mut()
            .retokenize(&localization, &localization.language());

        let state = Rc::downgrade(&self.state);
        let source = localization.clone();
        let redraw = scope.redraw().clone();
        let on_change = redraw.clone();
        let subscription = localization.on_language_changed(move |language| {
            let Some(state) = state.upgrade() else {
                return;
            };
            state.borrow_mut().retokenize(&source, language);
            on_change.request();
        });
        self.mounted = Some(Mounted {
            localization,
            redraw,
            _subscription: subscription,
        });
    }

    fn deactivate(&mut self) {
        self.mounted = None;
    }

    fn render(&self, _scope: &Scope) -> Node {
        if self.mounted.is_none() {
            return Node::Empty;
        }
        Node::Fragment(render_tokens(&self.state.borrow().tokens, &self.bindings))
    }
}

impl std::fmt::Debug for Interp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Interp")
            .field("namespace", &state.namespace)
            .field("key", &state.key)
            .field("language", &state.language)
            .field("mounted", &self.mounted.is_some())
            .finish()
    }
}
