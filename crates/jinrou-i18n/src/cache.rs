#![forbid(unsafe_code)]

//! Lazily loaded, memoized localization context.
//!
//! The first [`LocalizationCache::get`] starts the load; every caller that
//! arrives while it is in flight awaits the same shared future, so the
//! loader runs once no matter how many dialogs ask for the context at the
//! same time. A successful result is kept for the life of the cache. A
//! failed load is handed to every waiter and then forgotten, so the next
//! call retries.
//!
//! ```text
//!   Empty ──get──► Loading{generation, shared} ──ok──► Ready(localization)
//!     ▲                       │
//!     └────────── err ────────┘
//! ```
//!
//! One cache per UI thread is reachable through [`install_cache`] /
//! [`get_i18n_for`].

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tracing::{debug, info_span, warn};
use web_time::Instant;

use crate::error::I18nError;
use crate::localization::Localization;

type LoadResult = Result<Localization, I18nError>;
type Loader = Box<dyn Fn() -> LocalBoxFuture<'static, LoadResult>>;

enum CacheState {
    Empty,
    Loading {
        generation: u64,
        future: Shared<LocalBoxFuture<'static, LoadResult>>,
    },
    Ready(Localization),
}

pub struct LocalizationCache {
    loader: Loader,
    state: RefCell<CacheState>,
    generation: Cell<u64>,
    loads_started: Cell<u64>,
}

impl LocalizationCache {
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = LoadResult> + 'static,
    {
        Self {
            loader: Box::new(move || loader().boxed_local()),
            state: RefCell::new(CacheState::Empty),
            generation: Cell::new(0),
            loads_started: Cell::new(0),
        }
    }

    /// Cache that already holds `localization`; its loader is never run.
    pub fn ready(localization: Localization) -> Self {
        let fallback = localization.clone();
        let cache = Self::new(move || {
            let localization = fallback.clone();
            async move { Ok(localization) }
        });
        *cache.state.borrow_mut() = CacheState::Ready(localization);
        cache
    }

    /// The shared context, loading it on first use.
    pub async fn get(&self) -> LoadResult {
        let (generation, future) = match self.pending() {
            Ok(localization) => return Ok(localization),
            Err(pending) => pending,
        };

        let started = Instant::now();
        let result = future.await;

        let mut state = self.state.borrow_mut();
        let current = matches!(
            &*state,
            CacheState::Loading { generation: g, .. } if *g == generation
        );
        if current {
            let duration_us = started.elapsed().as_micros() as u64;
            *state = match &result {
                Ok(localization) => {
                    debug!(
                        target: "jinrou.i18n",
                        generation,
                        duration_us,
                        language = %localization.language(),
                        "localization ready"
                    );
                    CacheState::Ready(localization.clone())
                }
                Err(err) => {
                    warn!(target: "jinrou.i18n", generation, duration_us, error = %err, "localization load failed");
                    CacheState::Empty
                }
            };
        }
        result
    }

    /// Either the ready context or the in-flight load to wait on, starting
    /// one if needed. The state borrow is released before returning.
    fn pending(&self) -> Result<Localization, (u64, Shared<LocalBoxFuture<'static, LoadResult>>)> {
        match &*self.state.borrow() {
            CacheState::Ready(localization) => return Ok(localization.clone()),
            CacheState::Loading { generation, future } => {
                return Err((*generation, future.clone()));
            }
            CacheState::Empty => {}
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.loads_started.set(self.loads_started.get() + 1);
        let _span = info_span!("i18n.load", generation).entered();
        let future = (self.loader)().shared();
        *self.state.borrow_mut() = CacheState::Loading {
            generation,
            future: future.clone(),
        };
        debug!(target: "jinrou.i18n", generation, "localization load started");
        Err((generation, future))
    }

    /// The context if it has finished loading.
    #[must_use]
    pub fn peek(&self) -> Option<Localization> {
        match &*self.state.borrow() {
            CacheState::Ready(localization) => Some(localization.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(&*self.state.borrow(), CacheState::Loading { .. })
    }

    /// How many times the loader has been invoked.
    #[must_use]
    pub fn loads_started(&self) -> u64 {
        self.loads_started.get()
    }
}

impl std::fmt::Debug for LocalizationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.state.borrow() {
            CacheState::Empty => "empty",
            CacheState::Loading { .. } => "loading",
            CacheState::Ready(_) => "ready",
        };
        f.debug_struct("LocalizationCache")
            .field("state", &state)
            .field("loads_started", &self.loads_started.get())
            .finish_non_exhaustive()
    }
}

thread_local! {
    static GLOBAL: RefCell<Option<Rc<LocalizationCache>>> = const { RefCell::new(None) };
}

/// Install the UI thread's cache. Returns `true` if one was already
/// installed (it is replaced).
pub fn install_cache(cache: Rc<LocalizationCache>) -> bool {
    GLOBAL.with(|g| g.borrow_mut().replace(cache).is_some())
}

/// Remove the UI thread's cache.
pub fn uninstall_cache() -> Option<Rc<LocalizationCache>> {
    GLOBAL.with(|g| g.borrow_mut().take())
}

#[must_use]
pub fn global_cache() -> Option<Rc<LocalizationCache>> {
    GLOBAL.with(|g| g.borrow().clone())
}

/// Shared context from the installed cache.
pub async fn get_i18n_for() -> LoadResult {
    let cache = global_cache().ok_or(I18nError::NoLoader)?;
    cache.get().await
}
