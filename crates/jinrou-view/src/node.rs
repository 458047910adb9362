#![forbid(unsafe_code)]

//! Static render tree.

use std::borrow::Cow;

/// Output of a render pass.
///
/// `Empty` renders as nothing; it is what an unbound placeholder or an
/// empty literal becomes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Fragment(Vec<Node>),
    Element {
        tag: Cow<'static, str>,
        attrs: Vec<(Cow<'static, str>, String)>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Text node. An empty string collapses to [`Node::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Self::Empty } else { Self::Text(s) }
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    pub fn element(tag: impl Into<Cow<'static, str>>, children: impl IntoIterator<Item = Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: children.into_iter().collect(),
        }
    }

    /// Add an attribute. No-op on non-element nodes.
    #[must_use]
    pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    /// `true` if this renders nothing visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Fragment(children) => children.iter().all(Node::is_empty),
            Self::Element { .. } => false,
        }
    }

    /// Concatenated text content, depth first.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(s) => out.push_str(s),
            Self::Fragment(children) | Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Find the first element with `tag` (depth first, self included).
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Node> {
        match self {
            Self::Element { tag: t, .. } if t == tag => Some(self),
            Self::Fragment(children) | Self::Element { children, .. } => {
                children.iter().find_map(|c| c.find(tag))
            }
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::text(s)
    }
}
