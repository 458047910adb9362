#![forbid(unsafe_code)]

//! The built-in dialogs as awaitable calls.
//!
//! Icon select, kick and kick manage are localized: they wait for the
//! host's localization context first and fail with
//! [`DialogError::ContextLoad`] if it cannot be obtained.

use crate::content::{
    ConfirmContent, IconSelectContent, KickContent, KickManageContent, MessageContent, PlayerContent,
    SelectContent,
};
use crate::defs::{
    ConfirmDialog, IconSelectDialog, KickDialog, KickManageDialog, KickManageResult, KickResult, MessageDialog,
    PlayerDialog, PlayerProfile, SelectDialog,
};
use crate::error::DialogError;
use crate::orchestrator::DialogHost;

impl DialogHost {
    /// Resolves when the message is dismissed.
    pub async fn show_message_dialog(&self, def: MessageDialog) -> Result<(), DialogError> {
        self.present(None, move |open, close| {
            open.open(MessageContent::new(def, close));
        })
        .await
    }

    pub async fn show_confirm_dialog(&self, def: ConfirmDialog) -> Result<bool, DialogError> {
        self.present(None, move |open, close| {
            open.open(ConfirmContent::new(def, close));
        })
        .await
    }

    /// `None` if cancelled.
    pub async fn show_player_dialog(&self, def: PlayerDialog) -> Result<Option<PlayerProfile>, DialogError> {
        self.present(None, move |open, close| {
            open.open(PlayerContent::new(def, close));
        })
        .await
    }

    /// Chosen icon URL, `None` if cancelled.
    pub async fn show_icon_select_dialog(&self, def: IconSelectDialog) -> Result<Option<String>, DialogError> {
        self.present_localized(move |open, close| {
            open.open(IconSelectContent::new(def, close));
        })
        .await
    }

    /// Value of the chosen option, `None` if cancelled.
    pub async fn show_select_dialog(&self, def: SelectDialog) -> Result<Option<String>, DialogError> {
        self.present(None, move |open, close| {
            open.open(SelectContent::new(def, close));
        })
        .await
    }

    pub async fn show_kick_dialog(&self, def: KickDialog) -> Result<Option<KickResult>, DialogError> {
        self.present_localized(move |open, close| {
            open.open(KickContent::new(def, close));
        })
        .await
    }

    pub async fn show_kick_manage_dialog(
        &self,
        def: KickManageDialog,
    ) -> Result<Option<KickManageResult>, DialogError> {
        self.present_localized(move |open, close| {
            open.open(KickManageContent::new(def, close));
        })
        .await
    }
}
