#![forbid(unsafe_code)]

//! Game view state for the jinrou front-end.
//!
//! [`defs`] holds the wire types shared with the server; [`GameStore`]
//! keeps the current game, role, speak form and log filter as observables
//! and applies server updates atomically.

pub mod defs;
pub mod store;

pub use defs::{
    CommentSize, GameInfo, GameStatus, LogVisibility, PlayerFlag, PlayerInfo, RoleInfo, SpeakQuery, SpeakSize,
    SpeakState, SpeakStatePatch, TimerInfo,
};
pub use store::{GameStore, UpdateQuery};
