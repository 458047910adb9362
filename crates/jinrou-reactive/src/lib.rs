#![forbid(unsafe_code)]

//! Change-notification primitives for the jinrou front-end.
//!
//! - [`Observable`]: a shared, version-tracked value that notifies
//!   subscribers when it changes.
//! - [`Subscription`]: RAII guard; dropping it detaches the callback.
//! - [`BatchScope`]: defers notifications until the outermost scope exits,
//!   so a multi-field store update is observed as one change.
//!
//! # Architecture
//!
//! Everything here is single-threaded (`Rc<RefCell<..>>`). The UI runs on
//! one event loop; none of these types are `Send`.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per value-changing mutation.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op.
//! 4. A dropped [`Subscription`] is never called again.
//! 5. Inside a [`BatchScope`], values update immediately and each
//!    subscriber is notified at most once when the outermost scope exits.

pub mod batch;
pub mod observable;

pub use batch::BatchScope;
pub use observable::{Observable, Subscription};
