#![forbid(unsafe_code)]

//! `{{name}}` placeholder tokenizer.
//!
//! A template is split into an alternating sequence that always starts
//! and ends with a literal:
//!
//! ```text
//! "a{{b}}c"     -> [Literal("a"), Placeholder("b"), Literal("c")]
//! "{{a}}{{b}}"  -> ["", a, "", b, ""]
//! ""            -> [Literal("")]
//! ```
//!
//! Placeholder names are ASCII word characters (`[A-Za-z0-9_]+`). Braces
//! that do not enclose a valid name are literal text.

use std::sync::LazyLock;

use regex::Regex;

use crate::localization::Localization;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(String),
    Placeholder(String),
}

impl Token {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Placeholder(s) => s,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Split `template` into literal and placeholder tokens.
#[must_use]
pub fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        tokens.push(Token::Literal(template[last..whole.start()].to_owned()));
        tokens.push(Token::Placeholder(name.as_str().to_owned()));
        last = whole.end();
    }
    tokens.push(Token::Literal(template[last..].to_owned()));
    tokens
}

/// Inverse of [`tokenize`]: literals verbatim, placeholders re-wrapped in
/// double braces.
#[must_use]
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::Placeholder(name) => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
    }
    out
}

/// Placeholder names in order of appearance (duplicates kept).
#[must_use]
pub fn placeholders(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter(|t| t.is_placeholder())
        .map(Token::as_str)
        .collect()
}

/// Tokenize the resource at `language`/`namespace`/`key`.
///
/// A missing resource yields the key itself as the only literal, so the
/// caller still sees the string it asked for.
#[must_use]
pub fn resource_tokens(localization: &Localization, language: &str, namespace: &str, key: &str) -> Vec<Token> {
    match localization.resource(language, namespace, key) {
        Some(template) => tokenize(&template),
        None => {
            tracing::debug!(
                target: "jinrou.i18n",
                language,
                namespace,
                key,
                "resource missing; echoing key"
            );
            vec![Token::Literal(key.to_owned())]
        }
    }
}
