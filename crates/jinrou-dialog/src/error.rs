#![forbid(unsafe_code)]

use jinrou_i18n::I18nError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DialogError {
    /// The localization context could not be obtained; nothing was mounted.
    #[error("failed to load dialog localization: {0}")]
    ContextLoad(#[from] I18nError),

    /// Every closer was dropped without producing a result.
    #[error("dialog abandoned without a result")]
    Abandoned,
}
