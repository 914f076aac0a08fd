//! Listener lists for container notifications.

use std::fmt;

/// Identifies a registered handler so it can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// An ordered list of callbacks invoked with a payload of type `T`.
pub struct EventHook<T> {
    handlers: Vec<(HandlerId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> EventHook<T> {
    /// An empty hook.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler; handlers run in registration order.
    pub fn subscribe<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id);
        self.handlers.len() != before
    }

    /// Call every handler with `payload`.
    pub fn emit(&mut self, payload: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(payload);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for EventHook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHook")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
