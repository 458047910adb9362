#![forbid(unsafe_code)]

//! Awaitable dialogs.
//!
//! [`DialogHost::present`] turns a render callback into a future: it
//! optionally waits for the localization context, allocates a [`Mount`],
//! hands the callback an [`Opener`] and a [`Closer`], and completes with
//! the value passed to the first [`Closer::close`].
//!
//! ```text
//!   present ─► [load context] ─► Mount::acquire ─► callback(open, close)
//!                   │ err                               │
//!                   ▼                                   ▼ close(v)
//!          Err(ContextLoad)                 dispose mount, resolve(v)
//! ```
//!
//! Disposal always precedes resolution, so by the time the caller sees the
//! result the container is gone. A dialog whose content keeps its closer
//! but never calls it stays mounted; there is no timeout.
//!
//! # Tracing
//!
//! `dialog.show` and `dialog.close` spans (target `jinrou.dialog`) carry a
//! per-host `dialog_id`; `dialog.close` also records `duration_us` from
//! show to close.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use jinrou_i18n::{I18nError, I18nProvider, Localization, LocalizationCache, global_cache};
use jinrou_view::{Component, ContainerId, Document};
use tracing::{debug, warn};
use web_time::Instant;

use crate::channel::{Resolver, ResultFuture, result_channel};
use crate::error::DialogError;
use crate::mount::Mount;

static DIALOGS_SHOWN_TOTAL: AtomicU64 = AtomicU64::new(0);
static DIALOGS_CLOSED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Dialogs shown since process start (monotonic counter).
#[must_use]
pub fn dialogs_shown_total() -> u64 {
    DIALOGS_SHOWN_TOTAL.load(Ordering::Relaxed)
}

/// Dialogs closed since process start (monotonic counter).
#[must_use]
pub fn dialogs_closed_total() -> u64 {
    DIALOGS_CLOSED_TOTAL.load(Ordering::Relaxed)
}

/// Displays content in the mount; wraps it in an [`I18nProvider`] when the
/// dialog was shown with a localization context.
#[derive(Clone)]
pub struct Opener {
    dialog_id: u64,
    mount: Rc<Mount>,
    localization: Option<Localization>,
}

impl Opener {
    /// Replace the displayed content. Ignored once the dialog is closed.
    pub fn open(&self, content: impl Component + 'static) -> bool {
        let content: Box<dyn Component> = match &self.localization {
            Some(localization) => Box::new(I18nProvider::new(localization.clone(), content)),
            None => Box::new(content),
        };
        debug!(
            target: "jinrou.dialog",
            dialog_id = self.dialog_id,
            component = content.name(),
            localized = self.localization.is_some(),
            "dialog content opened"
        );
        self.mount.render(content)
    }

    #[must_use]
    pub fn dialog_id(&self) -> u64 {
        self.dialog_id
    }

    #[must_use]
    pub fn container(&self) -> ContainerId {
        self.mount.container()
    }
}

/// Completes the dialog. Clones share the same one-shot right to close.
pub struct Closer<T> {
    dialog_id: u64,
    mount: Rc<Mount>,
    resolver: Resolver<T>,
    shown_at: Instant,
}

impl<T> Clone for Closer<T> {
    fn clone(&self) -> Self {
        Self {
            dialog_id: self.dialog_id,
            mount: Rc::clone(&self.mount),
            resolver: self.resolver.clone(),
            shown_at: self.shown_at,
        }
    }
}

impl<T: 'static> Closer<T> {
    /// Dispose the mount, then resolve with `result`. Returns `false`
    /// without side effects if the dialog was already closed.
    pub fn close(&self, result: T) -> bool {
        let Some(sender) = self.resolver.claim() else {
            debug!(target: "jinrou.dialog", dialog_id = self.dialog_id, "repeated close ignored");
            return false;
        };
        let duration_us = self.shown_at.elapsed().as_micros() as u64;
        let _span = tracing::debug_span!(
            "dialog.close",
            dialog_id = self.dialog_id,
            container = self.mount.container().get(),
            duration_us,
        )
        .entered();

        self.mount.dispose();
        if sender.send(result).is_err() {
            debug!(target: "jinrou.dialog", dialog_id = self.dialog_id, "dialog result dropped: caller stopped waiting");
        }
        DIALOGS_CLOSED_TOTAL.fetch_add(1, Ordering::Relaxed);
        debug!(target: "jinrou.dialog", dialog_id = self.dialog_id, duration_us, "dialog closed");
        true
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.resolver.is_resolved()
    }

    #[must_use]
    pub fn dialog_id(&self) -> u64 {
        self.dialog_id
    }

    /// `close` as a plain callback, for content that reports through
    /// `Fn(T)` handlers.
    pub fn callback(&self) -> impl Fn(T) + 'static {
        let closer = self.clone();
        move |result| {
            closer.close(result);
        }
    }
}

impl<T> std::fmt::Debug for Closer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closer")
            .field("dialog_id", &self.dialog_id)
            .field("closed", &self.resolver.is_resolved())
            .finish()
    }
}

/// Entry point for showing dialogs in one document.
pub struct DialogHost {
    document: Rc<dyn Document>,
    localization: Option<Rc<LocalizationCache>>,
    next_id: Cell<u64>,
}

impl DialogHost {
    pub fn new(document: Rc<dyn Document>) -> Self {
        Self {
            document,
            localization: None,
            next_id: Cell::new(1),
        }
    }

    /// Use `cache` for localized dialogs instead of the thread's installed
    /// cache.
    #[must_use]
    pub fn with_localization(mut self, cache: Rc<LocalizationCache>) -> Self {
        self.localization = Some(cache);
        self
    }

    /// Cache used by [`present_localized`](Self::present_localized): this
    /// host's own, else the installed one.
    #[must_use]
    pub fn localization_cache(&self) -> Option<Rc<LocalizationCache>> {
        self.localization.clone().or_else(global_cache)
    }

    #[must_use]
    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    /// Mount a dialog now and return its result future. `localization`,
    /// when given, is provided to the content.
    pub fn show<T, F>(&self, localization: Option<Localization>, callback: F) -> ResultFuture<T>
    where
        T: 'static,
        F: FnOnce(Opener, Closer<T>),
    {
        let dialog_id = self.next_id.get();
        self.next_id.set(dialog_id + 1);
        DIALOGS_SHOWN_TOTAL.fetch_add(1, Ordering::Relaxed);

        let mount = Rc::new(Mount::acquire(Rc::clone(&self.document)));
        let _span = tracing::debug_span!(
            "dialog.show",
            dialog_id,
            container = mount.container().get(),
            localized = localization.is_some(),
        )
        .entered();

        let (resolver, future) = result_channel();
        let opener = Opener {
            dialog_id,
            mount: Rc::clone(&mount),
            localization,
        };
        let closer = Closer {
            dialog_id,
            mount,
            resolver,
            shown_at: Instant::now(),
        };
        callback(opener, closer);
        future
    }

    /// Load the context from `loader` (if any), then show the dialog and
    /// wait for its result. A failed load mounts nothing.
    pub async fn present<T, F>(&self, loader: Option<&LocalizationCache>, callback: F) -> Result<T, DialogError>
    where
        T: 'static,
        F: FnOnce(Opener, Closer<T>),
    {
        let localization = match loader {
            Some(cache) => match cache.get().await {
                Ok(localization) => Some(localization),
                Err(err) => {
                    warn!(target: "jinrou.dialog", error = %err, "dialog not shown: localization unavailable");
                    return Err(err.into());
                }
            },
            None => None,
        };
        self.show(localization, callback).await
    }

    /// [`present`](Self::present) with this host's localization cache.
    pub async fn present_localized<T, F>(&self, callback: F) -> Result<T, DialogError>
    where
        T: 'static,
        F: FnOnce(Opener, Closer<T>),
    {
        let Some(cache) = self.localization_cache() else {
            warn!(target: "jinrou.dialog", "dialog not shown: no localization cache installed");
            return Err(I18nError::NoLoader.into());
        };
        self.present(Some(&cache), callback).await
    }
}

impl std::fmt::Debug for DialogHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogHost")
            .field("next_id", &self.next_id.get())
            .field("has_localization", &self.localization.is_some())
            .finish_non_exhaustive()
    }
}
