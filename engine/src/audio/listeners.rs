//! Ordered observer lists.
//!
//! Each event kind gets its own [`Listeners`]; handlers run in registration
//! order on the thread that broadcasts.

/// Token returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registration-ordered list of event handlers.
pub struct Listeners<E> {
    handlers: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler. It runs after every previously registered one.
    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Whether at least one handler is registered.
    pub fn is_bound(&self) -> bool {
        !self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler with `event`, in registration order.
    pub fn broadcast(&mut self, event: &E) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.handlers.len())
            .finish()
    }
}

/// Registration-ordered list of handlers that may answer a request.
///
/// Every handler is polled; the last answer wins, so later registrations
/// override earlier ones.
pub struct Responders<E, R> {
    handlers: Vec<(ListenerId, Box<dyn FnMut(&E) -> Option<R>>)>,
    next_id: u64,
}

impl<E, R> Default for Responders<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> Responders<E, R> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) -> Option<R> + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub fn is_bound(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Invoke every handler in registration order and keep the last answer.
    pub fn poll(&mut self, request: &E) -> Option<R> {
        let mut answer = None;
        for (_, handler) in &mut self.handlers {
            if let Some(value) = handler(request) {
                answer = Some(value);
            }
        }
        answer
    }
}

impl<E, R> std::fmt::Debug for Responders<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responders")
            .field("count", &self.handlers.len())
            .finish()
    }
}
