//! Single-threaded publish/subscribe channel for lifecycle events.
//!
//! Listeners are keyed by [`EventKind`] and invoked inline, in registration order, by [`EventBus::emit`].
//! The bus is an ordinary value shared through `Rc`; there is no process-wide instance.
//!
//! Scoped registration goes through [`Subscription`]: every listener added with [`Subscription::on`] is removed
//! when the guard drops, whichever way the owning scope is left.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use describe_core::{Event, EventKind};

use crate::error::Result;

/// A listener callback. Returning an error stops the current emission.
pub type Handler = Rc<dyn Fn(&Event) -> Result<()>>;

/// Identifies one registration so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventKind, Vec<(ListenerId, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh bus behind an `Rc`, ready to hand to executors and observers.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn register(&self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove one registration. Returns `false` if it was not registered under `kind`.
    pub fn remove(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(bound) = listeners.get_mut(&kind) else {
            return false;
        };
        let before = bound.len();
        bound.retain(|(bound_id, _)| *bound_id != id);
        let removed = bound.len() != before;
        if bound.is_empty() {
            listeners.remove(&kind);
        }
        removed
    }

    /// Deliver `event` to every listener registered for its kind.
    ///
    /// The listener list is snapshotted first: handlers may register, remove, or emit without conflicting with
    /// this dispatch, and such changes take effect from the next emission.
    ///
    /// ## Errors
    /// The first handler error is returned and the remaining handlers are not called.
    pub fn emit(&self, event: &Event) -> Result<()> {
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .get(&event.kind())
            .map(|bound| bound.iter().map(|(_, handler)| Rc::clone(handler)).collect())
            .unwrap_or_default();
        for handler in handlers {
            handler(event)?;
        }
        Ok(())
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().values().map(Vec::len).sum()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let mut counts: Vec<_> = listeners.iter().map(|(kind, bound)| (*kind, bound.len())).collect();
        counts.sort();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

/// RAII guard over a set of registrations on one bus.
#[must_use = "dropping a Subscription removes its listeners immediately"]
pub struct Subscription {
    bus: Rc<EventBus>,
    bindings: Vec<(EventKind, ListenerId)>,
}

impl Subscription {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            bindings: Vec::new(),
        }
    }

    pub fn on(&mut self, kind: EventKind, handler: impl Fn(&Event) -> Result<()> + 'static) -> ListenerId {
        let id = self.bus.register(kind, Rc::new(handler));
        self.bindings.push((kind, id));
        id
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for (kind, id) in self.bindings.drain(..) {
            self.bus.remove(kind, id);
        }
    }
}
