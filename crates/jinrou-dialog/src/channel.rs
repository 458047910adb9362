#![forbid(unsafe_code)]

//! Single-assignment result channel.
//!
//! [`result_channel`] pairs a [`Resolver`] (clonable, shared by every
//! handle that may complete the interaction) with the [`ResultFuture`] the
//! caller awaits. The first resolution wins; later ones are reported as
//! ignored and never reach the awaiting side.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::error::DialogError;

pub fn result_channel<T>() -> (Resolver<T>, ResultFuture<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        Resolver {
            sender: Rc::new(RefCell::new(Some(sender))),
        },
        ResultFuture { receiver },
    )
}

pub struct Resolver<T> {
    sender: Rc<RefCell<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Rc::clone(&self.sender),
        }
    }
}

impl<T> Resolver<T> {
    /// Fulfil the future with `value`. Returns `false` (and drops `value`)
    /// if the channel was already resolved.
    pub fn resolve(&self, value: T) -> bool {
        match self.claim() {
            Some(sender) => {
                // A dropped receiver means nobody is waiting; the
                // resolution still counts.
                let _ = sender.send(value);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.sender.borrow().is_none()
    }

    /// Take the right to resolve. Whoever holds the sender is the only
    /// party that can complete the channel, so work done between claiming
    /// and sending cannot be overtaken by a nested resolution.
    pub(crate) fn claim(&self) -> Option<oneshot::Sender<T>> {
        self.sender.borrow_mut().take()
    }
}

impl<T> std::fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Completes with the first resolved value, or
/// [`DialogError::Abandoned`] once every [`Resolver`] is gone unresolved.
#[must_use = "a dialog result does nothing unless awaited"]
pub struct ResultFuture<T> {
    receiver: oneshot::Receiver<T>,
}

impl<T> ResultFuture<T> {
    /// Non-blocking check: `None` while still pending.
    pub fn try_take(&mut self) -> Option<Result<T, DialogError>> {
        match self.receiver.try_recv() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(DialogError::Abandoned)),
        }
    }
}

impl<T> Future for ResultFuture<T> {
    type Output = Result<T, DialogError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|oneshot::Canceled| DialogError::Abandoned))
    }
}

impl<T> std::fmt::Debug for ResultFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultFuture").finish_non_exhaustive()
    }
}
