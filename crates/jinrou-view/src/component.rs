#![forbid(unsafe_code)]

//! Stateful content that can be mounted into a document container.

use crate::event::UiEvent;
use crate::node::Node;
use crate::scope::Scope;

/// Mountable content.
///
/// The host calls [`activate`](Component::activate) once when the content
/// is attached and [`deactivate`](Component::deactivate) once when it is
/// replaced or removed. Anything acquired in `activate` (notification
/// subscriptions in particular) must be released in `deactivate`.
pub trait Component {
    /// Name used in trace output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn activate(&mut self, _scope: &Scope) {}

    fn deactivate(&mut self) {}

    fn render(&self, scope: &Scope) -> Node;

    /// Returns `true` if the event was consumed.
    fn handle_event(&mut self, _event: &UiEvent, _scope: &Scope) -> bool {
        false
    }
}

/// Static nodes mount as inert content.
impl Component for Node {
    fn name(&self) -> &'static str {
        "Node"
    }

    fn render(&self, _scope: &Scope) -> Node {
        self.clone()
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn activate(&mut self, scope: &Scope) {
        (**self).activate(scope);
    }

    fn deactivate(&mut self) {
        (**self).deactivate();
    }

    fn render(&self, scope: &Scope) -> Node {
        (**self).render(scope)
    }

    fn handle_event(&mut self, event: &UiEvent, scope: &Scope) -> bool {
        (**self).handle_event(event, scope)
    }
}
