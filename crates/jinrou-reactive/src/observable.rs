#![forbid(unsafe_code)]

//! Observable value with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] keeps its value in shared `Rc<RefCell<..>>` storage.
//! Subscribers are held as `Weak` callbacks; the strong side lives in the
//! [`Subscription`] guard returned to the caller, so attaching an observer is
//! tied to the guard's scope and detaching is just dropping it.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: a subscriber may call `set()` on the same
//!   observable. The borrow is released before callbacks run, so this is
//!   allowed; the nested change is delivered after the outer one.
//! - **Guard leak**: a `Subscription` that is never dropped keeps its
//!   callback alive. Dead entries are pruned on the next notify or
//!   subscribe, so the list stays bounded by live guards plus the dead
//!   ones since the last of those.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Pruned on notify and on subscribe.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` yields another handle to the same state.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value. Subscribers are notified only if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place. Subscribers are notified only if the
    /// result differs from the value before `f` ran.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value != before {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Attach `callback`; it runs with the new value after every change
    /// until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.push(Rc::downgrade(&strong));
        drop(inner);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Incremented once per value-changing mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Subscribers whose guard is still alive.
    #[must_use]
    pub fn live_subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// `true` if both handles point at the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        if super::batch::is_batching() {
            for cb in callbacks {
                let key = Rc::as_ptr(&cb) as *const () as usize;
                let source = self.clone();
                super::batch::defer_or_run_keyed(key, move || {
                    let latest = source.get();
                    cb(&latest);
                });
            }
            return;
        }

        let value = self.get();
        let start = Instant::now();
        let _span = debug_span!(
            "reactive.notify",
            subscribers = callbacks.len() as u64,
            version = self.version(),
        )
        .entered();

        for cb in &callbacks {
            cb(&value);
        }

        debug!(
            target: "jinrou.reactive",
            duration_us = start.elapsed().as_micros() as u64,
            "observable change propagated"
        );
    }
}

/// RAII guard for a subscriber callback.
///
/// Holds the only strong reference to the callback; once dropped the
/// observable's `Weak` entry can no longer be upgraded.
#[must_use = "dropping a Subscription detaches the callback immediately"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
