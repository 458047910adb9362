#![forbid(unsafe_code)]

//! Document environment: detached containers that host mounted content.
//!
//! [`Document`] is the boundary the dialog layer allocates from. Each
//! container holds at most one mounted [`Component`]; mounting again
//! replaces (deactivates) the previous one.
//!
//! [`LayerDocument`] keeps containers as an ordered overlay stack: the
//! most recently created container is on top and receives dispatched
//! events.
//!
//! # Invariants
//!
//! 1. A container id is never reused.
//! 2. Every activated component is deactivated exactly once, when it is
//!    replaced, unmounted, or its container is removed.
//! 3. No component is activated, deactivated or dropped while the layer
//!    table is borrowed, so content may create, mount into, or remove
//!    containers from inside its own hooks and event handlers.

use std::cell::{Cell, RefCell};

use tracing::{debug, trace, warn};

use crate::component::Component;
use crate::event::UiEvent;
use crate::node::Node;
use crate::scope::{Redraw, Scope};

/// Identifier of a detached container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Presentation environment primitives.
pub trait Document {
    /// Insert a new, empty container.
    fn create_container(&self) -> ContainerId;

    /// Mount `content` into `container`, replacing what was there.
    fn mount(&self, container: ContainerId, content: Box<dyn Component>);

    /// Unmount whatever is displayed in `container`; the container stays.
    fn unmount(&self, container: ContainerId);

    /// Remove `container`, unmounting its content first.
    fn remove_container(&self, container: ContainerId);
}

struct Layer {
    id: ContainerId,
    /// Bumped on every mount/unmount so an in-flight dispatch can tell
    /// whether the content it borrowed was replaced meanwhile.
    generation: u64,
    content: Option<Box<dyn Component>>,
}

/// In-process overlay stack implementing [`Document`].
pub struct LayerDocument {
    layers: RefCell<Vec<Layer>>,
    next_id: Cell<u64>,
    scope: Scope,
    redraw: Redraw,
    created_total: Cell<u64>,
    removed_total: Cell<u64>,
}

impl Default for LayerDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerDocument {
    pub fn new() -> Self {
        let redraw = Redraw::new();
        Self {
            layers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            scope: Scope::root(redraw.clone()),
            redraw,
            created_total: Cell::new(0),
            removed_total: Cell::new(0),
        }
    }

    /// Containers currently attached.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.layers.borrow().len()
    }

    #[must_use]
    pub fn contains(&self, container: ContainerId) -> bool {
        self.layers.borrow().iter().any(|l| l.id == container)
    }

    /// Attached containers, bottom to top.
    #[must_use]
    pub fn containers(&self) -> Vec<ContainerId> {
        self.layers.borrow().iter().map(|l| l.id).collect()
    }

    /// Top-most container, if any.
    #[must_use]
    pub fn top(&self) -> Option<ContainerId> {
        self.layers.borrow().last().map(|l| l.id)
    }

    /// `(created, removed)` since construction.
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        (self.created_total.get(), self.removed_total.get())
    }

    pub fn redraw(&self) -> &Redraw {
        &self.redraw
    }

    /// Render the content of one container. `None` if the container does
    /// not exist; [`Node::Empty`] if nothing is mounted.
    #[must_use]
    pub fn render(&self, container: ContainerId) -> Option<Node> {
        let layers = self.layers.borrow();
        let layer = layers.iter().find(|l| l.id == container)?;
        Some(
            layer
                .content
                .as_ref()
                .map_or(Node::Empty, |c| c.render(&self.scope)),
        )
    }

    /// Render every container, bottom to top.
    #[must_use]
    pub fn render_all(&self) -> Vec<(ContainerId, Node)> {
        let layers = self.layers.borrow();
        layers
            .iter()
            .map(|l| {
                let node = l.content.as_ref().map_or(Node::Empty, |c| c.render(&self.scope));
                (l.id, node)
            })
            .collect()
    }

    /// Deliver `event` to the content of the top-most container.
    ///
    /// The content is taken out of its layer while it handles the event,
    /// so the handler may dispose its own container. A consumed event
    /// requests a redraw. Returns whether the event was consumed.
    pub fn dispatch(&self, event: &UiEvent) -> bool {
        let taken = {
            let mut layers = self.layers.borrow_mut();
            layers
                .iter_mut()
                .rev()
                .find(|l| l.content.is_some())
                .and_then(|l| l.content.take().map(|c| (l.id, l.generation, c)))
        };
        let Some((id, generation, mut content)) = taken else {
            trace!(target: "jinrou.view", ?event, "dispatch with no mounted content");
            return false;
        };

        let consumed = content.handle_event(event, &self.scope);
        debug!(
            target: "jinrou.view",
            container = id.get(),
            component = content.name(),
            consumed,
            "event dispatched"
        );

        let orphan = {
            let mut layers = self.layers.borrow_mut();
            match layers.iter_mut().find(|l| l.id == id) {
                Some(layer) if layer.generation == generation && layer.content.is_none() => {
                    layer.content = Some(content);
                    None
                }
                _ => Some(content),
            }
        };
        // Replaced or removed while handling: retire it outside the borrow.
        if let Some(mut content) = orphan {
            content.deactivate();
        }
        if consumed {
            self.redraw.request();
        }
        consumed
    }

    fn take_content(&self, container: ContainerId) -> Option<Box<dyn Component>> {
        let mut layers = self.layers.borrow_mut();
        let layer = layers.iter_mut().find(|l| l.id == container)?;
        layer.generation += 1;
        layer.content.take()
    }
}

impl Document for LayerDocument {
    fn create_container(&self) -> ContainerId {
        let id = ContainerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.layers.borrow_mut().push(Layer {
            id,
            generation: 0,
            content: None,
        });
        self.created_total.set(self.created_total.get() + 1);
        debug!(target: "jinrou.view", container = id.get(), "container attached");
        id
    }

    fn mount(&self, container: ContainerId, mut content: Box<dyn Component>) {
        if !self.contains(container) {
            warn!(
                target: "jinrou.view",
                container = container.get(),
                component = content.name(),
                "mount into missing container ignored"
            );
            return;
        }
        if let Some(mut previous) = self.take_content(container) {
            previous.deactivate();
        }
        content.activate(&self.scope);

        let rejected = {
            let mut layers = self.layers.borrow_mut();
            match layers.iter_mut().find(|l| l.id == container) {
                Some(layer) => {
                    layer.generation += 1;
                    let previous = layer.content.replace(content);
                    trace!(
                        target: "jinrou.view",
                        container = container.get(),
                        "content mounted"
                    );
                    previous
                }
                // Activation removed the container.
                None => Some(content),
            }
        };
        if let Some(mut stale) = rejected {
            stale.deactivate();
        }
        self.redraw.request();
    }

    fn unmount(&self, container: ContainerId) {
        if let Some(mut content) = self.take_content(container) {
            content.deactivate();
            debug!(target: "jinrou.view", container = container.get(), "content unmounted");
            self.redraw.request();
        }
    }

    fn remove_container(&self, container: ContainerId) {
        let removed = {
            let mut layers = self.layers.borrow_mut();
            let index = layers.iter().position(|l| l.id == container);
            index.map(|i| layers.remove(i))
        };
        let Some(layer) = removed else {
            warn!(target: "jinrou.view", container = container.get(), "remove of unknown container");
            return;
        };
        if let Some(mut content) = layer.content {
            content.deactivate();
        }
        self.removed_total.set(self.removed_total.get() + 1);
        debug!(target: "jinrou.view", container = container.get(), "container detached");
        self.redraw.request();
    }
}

impl std::fmt::Debug for LayerDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerDocument")
            .field("containers", &self.containers())
            .field("totals", &self.totals())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    struct Tracked {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn make(&self, label: &'static str) -> Box<dyn Component> {
            Box::new(Tracked {
                label,
                log: Rc::clone(&self.log),
            })
        }

        fn entries(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    impl Component for Tracked {
        fn activate(&mut self, _scope: &Scope) {
            self.log.borrow_mut().push(format!("+{}", self.label));
        }

        fn deactivate(&mut self) {
            self.log.borrow_mut().push(format!("-{}", self.label));
        }

        fn render(&self, _scope: &Scope) -> Node {
            Node::text(self.label)
        }

        fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
            self.log.borrow_mut().push(format!("{}:{event:?}", self.label));
            true
        }
    }

    #[test]
    fn create_and_remove_containers() {
        let doc = LayerDocument::new();
        let a = doc.create_container();
        let b = doc.create_container();
        assert_ne!(a, b);
        assert_eq!(doc.containers(), vec![a, b]);
        assert_eq!(doc.top(), Some(b));

        doc.remove_container(a);
        assert_eq!(doc.containers(), vec![b]);
        doc.remove_container(b);
        assert_eq!(doc.container_count(), 0);
        assert_eq!(doc.totals(), (2, 2));
    }

    #[test]
    fn mount_replaces_and_deactivates_previous() {
        let rec = Recorder::default();
        let doc = LayerDocument::new();
        let id = doc.create_container();

        doc.mount(id, rec.make("a"));
        doc.mount(id, rec.make("b"));
        assert_eq!(doc.render(id), Some(Node::text("b")));

        doc.remove_container(id);
        assert_eq!(rec.entries(), vec!["+a", "-a", "+b", "-b"]);
        assert_eq!(doc.render(id), None);
    }

    #[test]
    fn unmount_keeps_container() {
        let rec = Recorder::default();
        let doc = LayerDocument::new();
        let id = doc.create_container();
        doc.mount(id, rec.make("a"));
        doc.unmount(id);

        assert!(doc.contains(id));
        assert_eq!(doc.render(id), Some(Node::Empty));
        assert_eq!(rec.entries(), vec!["+a", "-a"]);
    }

    #[test]
    fn mount_into_missing_container_is_ignored() {
        let rec = Recorder::default();
        let doc = LayerDocument::new();
        let id = doc.create_container();
        doc.remove_container(id);
        doc.mount(id, rec.make("late"));
        assert!(rec.entries().is_empty());
    }

    #[test]
    fn dispatch_targets_top_container() {
        let rec = Recorder::default();
        let doc = LayerDocument::new();
        let low = doc.create_container();
        let high = doc.create_container();
        doc.mount(low, rec.make("low"));
        doc.mount(high, rec.make("high"));

        assert!(doc.dispatch(&UiEvent::Submit));
        assert_eq!(rec.entries().last().map(String::as_str), Some("high:Submit"));
        assert_eq!(doc.render(high), Some(Node::text("high")), "content restored");
    }

    struct SelfRemoving {
        doc: Rc<LayerDocument>,
        id: Option<ContainerId>,
        deactivated: Rc<Cell<u32>>,
    }

    impl Component for SelfRemoving {
        fn deactivate(&mut self) {
            self.deactivated.set(self.deactivated.get() + 1);
        }

        fn render(&self, _scope: &Scope) -> Node {
            Node::Empty
        }

        fn handle_event(&mut self, _event: &UiEvent, _scope: &Scope) -> bool {
            if let Some(id) = self.id.take() {
                self.doc.unmount(id);
                self.doc.remove_container(id);
            }
            true
        }
    }

    #[test]
    fn content_may_remove_its_own_container_while_handling() {
        let doc = Rc::new(LayerDocument::new());
        let id = doc.create_container();
        let deactivated = Rc::new(Cell::new(0));
        doc.mount(
            id,
            Box::new(SelfRemoving {
                doc: Rc::clone(&doc),
                id: Some(id),
                deactivated: Rc::clone(&deactivated),
            }),
        );

        assert!(doc.dispatch(&UiEvent::Cancel));
        assert_eq!(doc.container_count(), 0);
        assert_eq!(deactivated.get(), 1);
        assert!(!doc.dispatch(&UiEvent::Cancel));
    }

    #[test]
    fn consumed_event_requests_redraw() {
        let doc = LayerDocument::new();
        let rec = Recorder::default();
        let id = doc.create_container();
        doc.mount(id, rec.make("a"));
        let before = doc.redraw().generation();
        assert!(doc.dispatch(&UiEvent::Submit));
        assert_eq!(doc.redraw().generation(), before + 1);

        doc.mount(id, Box::new(Node::text("static")));
        let before = doc.redraw().generation();
        assert!(!doc.dispatch(&UiEvent::Toggle(0)));
        assert_eq!(doc.redraw().generation(), before);
    }

    #[test]
    fn mount_and_remove_request_redraw() {
        let doc = LayerDocument::new();
        let id = doc.create_container();
        let before = doc.redraw().generation();
        doc.mount(id, Box::new(Node::text("x")));
        doc.remove_container(id);
        assert_eq!(doc.redraw().generation(), before + 2);
    }
}
