#![forbid(unsafe_code)]

//! Batched notification delivery for [`Observable`](crate::Observable).
//!
//! A store update that touches several observables should be seen by
//! views as one change. While a [`BatchScope`] is alive, notifications
//! are queued; when the outermost scope drops, each distinct subscriber
//! fires once with the latest value.
//!
//! ```
//! use jinrou_reactive::{BatchScope, Observable};
//!
//! let day = Observable::new(0);
//! {
//!     let _batch = BatchScope::new();
//!     day.set(1);
//!     day.set(2);
//! } // subscribers of `day` run once here, with 2
//! assert_eq!(day.get(), 2);
//! ```
//!
//! # Failure Modes
//!
//! - **Callback panics during flush**: the remaining callbacks still run;
//!   the first panic is resumed afterwards.

use std::cell::RefCell;

use tracing::debug_span;

type Deferred = Box<dyn FnOnce()>;

struct Entry {
    key: Option<usize>,
    notify: Deferred,
}

struct BatchContext {
    depth: u32,
    deferred: Vec<Entry>,
}

thread_local! {
    static BATCH_CTX: RefCell<Option<BatchContext>> = const { RefCell::new(None) };
}

/// `true` while a batch is open on this thread.
pub fn is_batching() -> bool {
    BATCH_CTX.with(|ctx| ctx.borrow().is_some())
}

/// Queue `f` for the end of the current batch, or run it now if none is
/// open. Returns whether it was deferred.
pub fn defer_or_run(f: impl FnOnce() + 'static) -> bool {
    enqueue(None, Box::new(f))
}

/// Like [`defer_or_run`], but a later entry with the same `key` replaces
/// the earlier one while keeping its queue position.
pub fn defer_or_run_keyed(key: usize, f: impl FnOnce() + 'static) -> bool {
    enqueue(Some(key), Box::new(f))
}

fn enqueue(key: Option<usize>, notify: Deferred) -> bool {
    let leftover = BATCH_CTX.with(|ctx| {
        let mut guard = ctx.borrow_mut();
        let Some(batch) = guard.as_mut() else {
            return Some(notify);
        };
        let existing = match key {
            Some(k) => batch.deferred.iter_mut().find(|e| e.key == Some(k)),
            None => None,
        };
        match existing {
            Some(existing) => existing.notify = notify,
            None => batch.deferred.push(Entry { key, notify }),
        }
        None
    });
    match leftover {
        Some(f) => {
            f();
            false
        }
        None => true,
    }
}

/// RAII guard opening a batch. Nested guards only bump the depth; the
/// outermost one flushes on drop.
pub struct BatchScope {
    is_root: bool,
}

impl BatchScope {
    #[must_use]
    pub fn new() -> Self {
        let is_root = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            match guard.as_mut() {
                Some(batch) => {
                    batch.depth += 1;
                    false
                }
                None => {
                    *guard = Some(BatchContext {
                        depth: 1,
                        deferred: Vec::new(),
                    });
                    true
                }
            }
        });
        Self { is_root }
    }

    /// Notifications queued so far in the open batch.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        BATCH_CTX.with(|ctx| ctx.borrow().as_ref().map_or(0, |b| b.deferred.len()))
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        // The context is closed before callbacks run, so changes made by a
        // callback are delivered immediately instead of being lost.
        let deferred = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            let batch = guard.as_mut()?;
            batch.depth -= 1;
            if batch.depth > 0 {
                return None;
            }
            guard.take().map(|b| b.deferred)
        });

        let Some(deferred) = deferred else {
            return;
        };
        debug_assert!(self.is_root);
        if deferred.is_empty() {
            return;
        }

        let _span = debug_span!("reactive.batch_flush", callbacks = deferred.len() as u64).entered();
        let mut first_panic: Option<Box<dyn std::any::Any + Send>> = None;
        for entry in deferred {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(entry.notify));
            if let Err(payload) = result
                && first_panic.is_none()
            {
                first_panic = Some(payload);
            }
        }
        if let Some(payload) = first_panic {
            std::panic::resume_unwind(payload);
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("is_root", &self.is_root)
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Observable;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(obs: &Observable<i32>) -> (Rc<Cell<u32>>, crate::Subscription) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| h.set(h.get() + 1));
        (hits, sub)
    }

    #[test]
    fn coalesces_to_single_notification() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| s.set(*v));
        let (hits, _sub2) = counter(&obs);

        {
            let _batch = BatchScope::new();
            obs.set(1);
            obs.set(2);
            obs.set(3);
            assert_eq!(hits.get(), 0);
            assert_eq!(obs.get(), 3);
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn nested_only_outermost_flushes() {
        let obs = Observable::new(0);
        let (hits, _sub) = counter(&obs);
        {
            let _outer = BatchScope::new();
            {
                let _inner = BatchScope::new();
                obs.set(1);
            }
            assert_eq!(hits.get(), 0);
            assert!(is_batching());
        }
        assert_eq!(hits.get(), 1);
        assert!(!is_batching());
    }

    #[test]
    fn without_batch_runs_immediately() {
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        assert!(!defer_or_run(move || r.set(true)));
        assert!(ran.get());
    }

    #[test]
    fn keyed_entries_keep_first_position() {
        let order = Rc::new(RefCell::new(Vec::new()));
        {
            let _batch = BatchScope::new();
            let o = Rc::clone(&order);
            defer_or_run_keyed(1, move || o.borrow_mut().push("a-old"));
            let o = Rc::clone(&order);
            defer_or_run_keyed(2, move || o.borrow_mut().push("b"));
            let o = Rc::clone(&order);
            defer_or_run_keyed(1, move || o.borrow_mut().push("a-new"));
        }
        assert_eq!(*order.borrow(), vec!["a-new", "b"]);
    }

    #[test]
    fn change_made_during_flush_is_delivered() {
        let a = Observable::new(0);
        let b = Observable::new(0);
        let b2 = b.clone();
        let _link = a.subscribe(move |v| b2.set(*v * 10));
        let (hits, _sub) = counter(&b);

        {
            let _batch = BatchScope::new();
            a.set(4);
        }
        assert_eq!(b.get(), 40);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn pending_count_reports_queue() {
        let obs = Observable::new(0);
        let _sub = obs.subscribe(|_| {});
        let batch = BatchScope::new();
        assert_eq!(batch.pending_count(), 0);
        obs.set(1);
        obs.set(2);
        assert_eq!(batch.pending_count(), 1);
    }
}
