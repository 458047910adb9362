#![forbid(unsafe_code)]

//! Parameters and results of the built-in dialogs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDialog {
    pub modal: bool,
    pub title: String,
    pub message: String,
    /// Label of the close button.
    pub ok: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    pub modal: bool,
    pub title: String,
    pub message: String,
    pub yes: String,
    pub no: String,
}

/// Asks for a player name and an optional icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDialog {
    pub modal: bool,
    pub title: String,
    pub message: Option<String>,
    pub ok: String,
    pub cancel: String,
    /// Icon preselected in the form.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub icon: Option<String>,
}

/// Icon picker. Titles and labels come from the localization context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSelectDialog {
    pub modal: bool,
    /// Candidate icon URLs.
    #[serde(default)]
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDialog {
    pub modal: bool,
    pub title: String,
    pub message: String,
    pub options: Vec<SelectOption>,
    pub ok: String,
    pub cancel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickTarget {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickDialog {
    pub modal: bool,
    pub players: Vec<KickTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickResult {
    pub id: String,
    /// Also bar the player from re-entering the room.
    pub noentry: bool,
}

/// Lists users currently barred from the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickManageDialog {
    pub modal: bool,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickManageResult {
    /// Users to lift the ban for.
    pub remove: Vec<String>,
}
