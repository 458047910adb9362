#![forbid(unsafe_code)]

//! Observable state of the game view.
//!
//! Each field of [`GameStore`] is an [`Observable`]. [`GameStore::update`]
//! applies a partial [`UpdateQuery`] inside one [`BatchScope`], so
//! subscribers see each changed field once, after the whole update, with
//! the consistency rule already applied:
//!
//! > if a role is known and the selected speak kind is not one of its
//! > kinds, the kind is reset to the role's first kind (or `""`).

use jinrou_reactive::{BatchScope, Observable, Subscription};
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use crate::defs::{GameInfo, LogVisibility, RoleInfo, SpeakState, SpeakStatePatch};

/// Partial update. Absent fields are left unchanged; `role_info:
/// Some(None)` clears the role.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateQuery {
    pub game_info: Option<GameInfo>,
    #[serde(deserialize_with = "present_or_null")]
    pub role_info: Option<Option<RoleInfo>>,
    pub speak_state: Option<SpeakStatePatch>,
    pub log_visibility: Option<LogVisibility>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present_or_null<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl UpdateQuery {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct GameStore {
    pub game_info: Observable<GameInfo>,
    pub role_info: Observable<Option<RoleInfo>>,
    pub speak_state: Observable<SpeakState>,
    pub log_visibility: Observable<LogVisibility>,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            game_info: Observable::new(GameInfo::default()),
            role_info: Observable::new(None),
            speak_state: Observable::new(SpeakState::default()),
            log_visibility: Observable::new(LogVisibility::default()),
        }
    }

    pub fn update(&self, query: UpdateQuery) {
        let _batch = BatchScope::new();
        let UpdateQuery {
            game_info,
            role_info,
            speak_state,
            log_visibility,
        } = query;

        if let Some(game_info) = game_info {
            self.game_info.set(game_info);
        }
        if let Some(role_info) = role_info {
            self.role_info.set(role_info);
        }
        if let Some(patch) = speak_state {
            self.speak_state.update(|state| patch.apply(state));
        }
        if let Some(log_visibility) = log_visibility {
            self.log_visibility.set(log_visibility);
        }

        let reset = self.role_info.with(|role| {
            let role = role.as_ref()?;
            let kind = self.speak_state.with(|s| s.kind.clone());
            (!role.can_speak(&kind)).then(|| (kind, role.default_speak_kind().to_owned()))
        });
        if let Some((from, to)) = reset {
            debug!(target: "jinrou.store", from = %from, to = %to, "speak kind reset for role");
            self.speak_state.update(|state| state.kind = to);
        }
        trace!(target: "jinrou.store", day = self.game_info.with(|g| g.day), "game store updated");
    }

    /// Run `f` after every change of the speak form state.
    pub fn on_speak_state(&self, f: impl Fn(&SpeakState) + 'static) -> Subscription {
        self.speak_state.subscribe(f)
    }
}
