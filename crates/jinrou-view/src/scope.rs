#![forbid(unsafe_code)]

//! Ambient values passed down the component tree.
//!
//! A [`Scope`] is an immutable, cheaply clonable type map. Wrapping
//! components derive a child scope with [`Scope::provide`]; children read
//! values back with [`Scope::get`]. A component that never sees a value
//! provided simply gets `None`.

use std::any::{Any, TypeId};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Handle used by components to ask the host for a repaint after state
/// changed outside of a render pass (e.g. a language switch).
#[derive(Debug, Clone, Default)]
pub struct Redraw {
    generation: Rc<Cell<u64>>,
}

impl Redraw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    /// Number of requests so far. Hosts compare against the value they
    /// last painted at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

#[derive(Clone, Default)]
pub struct Scope {
    values: Rc<HashMap<TypeId, Rc<dyn Any>>>,
    redraw: Redraw,
}

impl Scope {
    /// Root scope with no provided values.
    pub fn root(redraw: Redraw) -> Self {
        Self {
            values: Rc::new(HashMap::new()),
            redraw,
        }
    }

    /// Child scope that additionally carries `value`, shadowing any value
    /// of the same type provided further up.
    #[must_use]
    pub fn provide<T: 'static>(&self, value: T) -> Scope {
        let mut values: HashMap<TypeId, Rc<dyn Any>> = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Rc::new(value));
        Self {
            values: Rc::new(values),
            redraw: self.redraw.clone(),
        }
    }

    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn redraw(&self) -> &Redraw {
        &self.redraw
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("values", &self.values.len())
            .field("redraw", &self.redraw.generation())
            .finish()
    }
}
