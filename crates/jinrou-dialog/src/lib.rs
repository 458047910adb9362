#![forbid(unsafe_code)]

//! Awaitable modal dialogs.
//!
//! A dialog is a render callback plus a result type. [`DialogHost`]
//! mounts it into a fresh container of a [`Document`](jinrou_view::Document),
//! gives the callback an [`Opener`] to display content and a [`Closer`] to
//! finish, and returns a future of the result:
//!
//! ```ignore
//! let keep = host
//!     .show_confirm_dialog(ConfirmDialog {
//!         modal: true,
//!         title: "確認".into(),
//!         message: "このルールを保存しますか？".into(),
//!         yes: "はい".into(),
//!         no: "いいえ".into(),
//!     })
//!     .await?;
//! ```
//!
//! Closing disposes the container before the caller is resumed; repeated
//! closes are ignored. Localized dialogs load the shared
//! [`Localization`](jinrou_i18n::Localization) first and wrap their content
//! in an [`I18nProvider`](jinrou_i18n::I18nProvider).

pub mod channel;
pub mod content;
pub mod defs;
pub mod error;
mod flavors;
pub mod mount;
pub mod orchestrator;

pub use channel::{Resolver, ResultFuture, result_channel};
pub use defs::{
    ConfirmDialog, IconSelectDialog, KickDialog, KickManageDialog, KickManageResult, KickResult, KickTarget,
    MessageDialog, PlayerDialog, PlayerProfile, SelectDialog, SelectOption,
};
pub use error::DialogError;
pub use mount::Mount;
pub use orchestrator::{Closer, DialogHost, Opener, dialogs_closed_total, dialogs_shown_total};
