#![forbid(unsafe_code)]

//! Translators pinned to a language and namespace.

use crate::localization::Localization;
use crate::token::{Token, tokenize};

/// Translation function bound to one language and one default namespace.
///
/// Keys may carry a namespace prefix (`game_client_form:Merchant.description`)
/// which overrides the bound namespace. Lookup order: bound language, then
/// the context's fallback language, then the bare key.
#[derive(Debug, Clone)]
pub struct FixedTranslator {
    localization: Localization,
    language: String,
    namespace: String,
}

impl FixedTranslator {
    pub fn new(localization: Localization, language: &str, namespace: &str) -> Self {
        Self {
            localization,
            language: language.to_owned(),
            namespace: namespace.to_owned(),
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Template for `key`, or `None` if no language has it.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        let (namespace, key) = self.split_key(key);
        self.localization
            .resource(&self.language, namespace, key)
            .or_else(|| {
                let fallback = self.localization.fallback_language()?;
                self.localization.resource(fallback, namespace, key)
            })
    }

    /// Translate `key`; a missing key yields the key (without namespace).
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(template) => template,
            None => self.split_key(key).1.to_owned(),
        }
    }

    /// Translate `key` and substitute `{{name}}` placeholders with string
    /// arguments. Placeholders without an argument are left as written.
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.t(key);
        let mut out = String::with_capacity(template.len());
        for token in tokenize(&template) {
            match token {
                Token::Literal(s) => out.push_str(&s),
                Token::Placeholder(name) => match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(&name);
                        out.push_str("}}");
                    }
                },
            }
        }
        out
    }

    fn split_key<'k>(&'k self, key: &'k str) -> (&'k str, &'k str) {
        match key.split_once(':') {
            Some((ns, rest)) if !ns.is_empty() => (ns, rest),
            _ => (self.namespace.as_str(), key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceCatalog;

    fn loc() -> Localization {
        let mut catalog = ResourceCatalog::new();
        catalog.add_resource("ja", "common", "greet", "こんにちは、{{name}}さん");
        catalog.add_resource("ja", "game_client_form", "Merchant.description", "商人の説明");
        catalog.add_resource("en", "common", "only_en", "English only");
        Localization::builder(catalog)
            .language("ja")
            .fallback_language("en")
            .build()
    }

    #[test]
    fn namespace_prefix_overrides_bound_namespace() {
        let t = loc().fixed_translator("ja", "common");
        assert_eq!(t.t("game_client_form:Merchant.description"), "商人の説明");
    }

    #[test]
    fn falls_back_then_echoes_key() {
        let t = loc().fixed_translator("ja", "common");
        assert_eq!(t.t("only_en"), "English only");
        assert_eq!(t.t("nope"), "nope");
        assert_eq!(t.t("game_client_form:nope"), "nope");
        assert_eq!(t.lookup("nope"), None);
    }

    #[test]
    fn string_interpolation() {
        let t = loc().fixed_translator("ja", "common");
        assert_eq!(t.t_with("greet", &[("name", "太郎")]), "こんにちは、太郎さん");
        assert_eq!(t.t_with("greet", &[]), "こんにちは、{{name}}さん");
    }

    #[test]
    fn pinned_language_ignores_active_language() {
        let l = loc();
        let t = l.fixed_translator("ja", "common");
        l.change_language("en");
        assert_eq!(t.language(), "ja");
        assert_eq!(t.t_with("greet", &[("name", "A")]), "こんにちは、Aさん");
    }
}
