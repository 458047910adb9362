#![forbid(unsafe_code)]

//! Resource-scoped mount: one detached container plus whatever is rendered
//! into it.
//!
//! # Invariants
//!
//! 1. The container is created in [`Mount::acquire`] and removed exactly
//!    once, by the first [`Mount::dispose`] (or on drop if never disposed).
//! 2. After disposal, [`Mount::render`] is ignored.
//! 3. State is `Cell`-based and no borrow is held while calling into the
//!    document, so content may dispose its own mount from inside
//!    activation or event handling.

use std::cell::Cell;
use std::rc::Rc;

use jinrou_view::{Component, ContainerId, Document};
use tracing::{debug, trace, warn};

pub struct Mount {
    document: Rc<dyn Document>,
    container: ContainerId,
    disposed: Cell<bool>,
    renders: Cell<u64>,
}

impl Mount {
    /// Create a fresh container in `document`.
    pub fn acquire(document: Rc<dyn Document>) -> Self {
        let container = document.create_container();
        trace!(target: "jinrou.dialog", container = container.get(), "mount acquired");
        Self {
            document,
            container,
            disposed: Cell::new(false),
            renders: Cell::new(0),
        }
    }

    #[must_use]
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Display `content`, replacing what was shown. Returns `false` if the
    /// mount is already disposed.
    pub fn render(&self, content: Box<dyn Component>) -> bool {
        if self.disposed.get() {
            warn!(
                target: "jinrou.dialog",
                container = self.container.get(),
                component = content.name(),
                "render after dispose ignored"
            );
            return false;
        }
        self.renders.set(self.renders.get() + 1);
        self.document.mount(self.container, content);
        true
    }

    /// Unmount the content and remove the container. Only the first call
    /// does anything; it returns `true`.
    pub fn dispose(&self) -> bool {
        if self.disposed.replace(true) {
            return false;
        }
        self.document.unmount(self.container);
        self.document.remove_container(self.container);
        debug!(
            target: "jinrou.dialog",
            container = self.container.get(),
            renders = self.renders.get(),
            "mount disposed"
        );
        true
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Number of accepted renders.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders.get()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        if !self.disposed.get() {
            trace!(target: "jinrou.dialog", container = self.container.get(), "mount dropped undisposed");
            self.dispose();
        }
    }
}

impl std::fmt::Debug for Mount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount")
            .field("container", &self.container)
            .field("disposed", &self.disposed.get())
            .field("renders", &self.renders.get())
            .finish()
    }
}
