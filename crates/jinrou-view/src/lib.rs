#![forbid(unsafe_code)]

//! View primitives for the jinrou front-end.
//!
//! # Role
//! This crate is the presentation environment the dialog layer is built
//! on. It knows nothing about localization or dialogs; it only provides:
//!
//! - [`Node`]: a static render tree (text, elements, fragments).
//! - [`Component`]: stateful content with activation/deactivation hooks.
//! - [`Scope`]: ambient values handed down to components (context data
//!   such as a localization handle) plus a [`Redraw`] request handle.
//! - [`Document`]: create/remove detached containers and mount content
//!   into them. [`LayerDocument`] is the in-process implementation.

pub mod component;
pub mod document;
pub mod event;
pub mod node;
pub mod scope;

pub use component::Component;
pub use document::{ContainerId, Document, LayerDocument};
pub use event::UiEvent;
pub use node::Node;
pub use scope::{Redraw, Scope};
