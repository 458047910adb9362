#![forbid(unsafe_code)]

//! Game state as exchanged with the server.
//!
//! Field names follow the wire format (`camelCase`); tagged unions use a
//! `type` discriminator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub day: u32,
    #[serde(default)]
    pub status: GameStatus,
}

/// The viewing player's role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub jobname: String,
    #[serde(default)]
    pub dead: bool,
    /// Team that won, once the game is over.
    #[serde(default)]
    pub win: Option<String>,
    /// Speak kinds available to this role; the first is the default.
    pub speak: Vec<String>,
}

impl RoleInfo {
    #[must_use]
    pub fn can_speak(&self, kind: &str) -> bool {
        self.speak.iter().any(|k| k == kind)
    }

    /// Default speak kind, or `""` for a role that cannot speak.
    #[must_use]
    pub fn default_speak_kind(&self) -> &str {
        self.speak.first().map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakSize {
    Big,
    #[default]
    Normal,
    Small,
}

/// State of the speak form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakState {
    pub size: SpeakSize,
    pub kind: String,
    pub multiline: bool,
    pub will_open: bool,
}

/// Partial update of [`SpeakState`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeakStatePatch {
    pub size: Option<SpeakSize>,
    pub kind: Option<String>,
    pub multiline: Option<bool>,
    pub will_open: Option<bool>,
}

impl SpeakStatePatch {
    pub fn apply(self, state: &mut SpeakState) {
        if let Some(size) = self.size {
            state.size = size;
        }
        if let Some(kind) = self.kind {
            state.kind = kind;
        }
        if let Some(multiline) = self.multiline {
            state.multiline = multiline;
        }
        if let Some(will_open) = self.will_open {
            state.will_open = will_open;
        }
    }
}

/// Which days of the log are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogVisibility {
    #[default]
    All,
    Today,
    One { day: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerInfo {
    pub enabled: bool,
    /// Displayed name of the timer.
    pub name: String,
    /// Countdown target, epoch milliseconds.
    pub target: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerFlag {
    Ready,
    Helper,
    Gm,
    Norevive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub realid: Option<String>,
    pub anonymous: bool,
    pub name: String,
    pub dead: bool,
    pub icon: Option<String>,
    /// `None` until the game is finished.
    pub winner: Option<bool>,
    pub jobname: Option<String>,
    #[serde(default)]
    pub flags: Vec<PlayerFlag>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentSize {
    #[serde(rename = "big")]
    Big,
    #[default]
    #[serde(rename = "")]
    Normal,
    #[serde(rename = "small")]
    Small,
}

impl From<SpeakSize> for CommentSize {
    fn from(size: SpeakSize) -> Self {
        match size {
            SpeakSize::Big => Self::Big,
            SpeakSize::Normal => Self::Normal,
            SpeakSize::Small => Self::Small,
        }
    }
}

/// A comment submitted from the speak form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakQuery {
    pub comment: String,
    pub mode: String,
    pub size: CommentSize,
}

impl SpeakQuery {
    /// Query for `comment` using the form's current kind and size.
    #[must_use]
    pub fn from_state(comment: impl Into<String>, state: &SpeakState) -> Self {
        Self {
            comment: comment.into(),
            mode: state.kind.clone(),
            size: state.size.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_visibility_is_tagged() {
        let one: LogVisibility = serde_json::from_str(r#"{"type":"one","day":3}"#).unwrap();
        assert_eq!(one, LogVisibility::One { day: 3 });
        assert_eq!(serde_json::to_string(&LogVisibility::Today).unwrap(), r#"{"type":"today"}"#);
    }

    #[test]
    fn player_info_from_wire() {
        let p: PlayerInfo = serde_json::from_str(
            r#"{"id":"u1","realid":null,"anonymous":false,"name":"太郎","dead":false,
                "icon":null,"winner":null,"jobname":"Human","flags":["ready","gm"]}"#,
        )
        .unwrap();
        assert_eq!(p.flags, vec![PlayerFlag::Ready, PlayerFlag::Gm]);
        assert_eq!(p.winner, None);
    }

    #[test]
    fn speak_query_uses_wire_sizes() {
        let state = SpeakState {
            size: SpeakSize::Normal,
            kind: "day".into(),
            ..SpeakState::default()
        };
        let q = SpeakQuery::from_state("おはよう", &state);
        assert_eq!(
            serde_json::to_string(&q).unwrap(),
            r#"{"comment":"おはよう","mode":"day","size":""}"#
        );
    }

    #[test]
    fn patch_applies_only_given_fields() {
        let mut state = SpeakState {
            kind: "day".into(),
            multiline: true,
            ..SpeakState::default()
        };
        SpeakStatePatch {
            size: Some(SpeakSize::Big),
            ..SpeakStatePatch::default()
        }
        .apply(&mut state);
        assert_eq!(state.size, SpeakSize::Big);
        assert_eq!(state.kind, "day");
        assert!(state.multiline);
    }

    #[test]
    fn speak_state_wire_names() {
        let s: SpeakState =
            serde_json::from_str(r#"{"size":"small","kind":"","multiline":false,"willOpen":true}"#).unwrap();
        assert!(s.will_open);
        assert_eq!(s.size, SpeakSize::Small);
    }
}
