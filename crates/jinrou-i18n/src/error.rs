#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

/// Errors produced while obtaining localization data.
///
/// `Clone` so that one failed load can be handed to every caller that was
/// waiting on it; the wrapped io/serde errors are shared behind `Arc`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum I18nError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("invalid resource bundle {language}/{namespace}: {source}")]
    Json {
        language: String,
        namespace: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    #[error("resource bundle {language}/{namespace} must be a JSON object")]
    NotAnObject { language: String, namespace: String },

    #[error("no resources found for language {0:?}")]
    MissingLanguage(String),

    #[error("no localization loader installed")]
    NoLoader,

    #[error("localization load failed: {0}")]
    Load(String),
}

impl I18nError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}
