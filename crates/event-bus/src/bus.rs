//! The event bus itself.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{BusEvent, SubscriptionId, Topic};

type Handler<E> = Rc<dyn Fn(&E)>;

struct Subscriber<E: BusEvent> {
    id: SubscriptionId,
    topic: Topic<E::Kind>,
    handler: Handler<E>,
}

struct Registry<E: BusEvent> {
    next_id: u64,
    subscribers: Vec<Subscriber<E>>,
}

impl<E: BusEvent> Default for Registry<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

/// Synchronous publish/subscribe mediator.
///
/// The bus supports:
/// - Exact subscriptions to a single event kind, plus wildcard subscriptions
/// - Dispatch in registration order, with no de-duplication
/// - Re-entrant publishing: a handler may publish, subscribe or unsubscribe,
///   and a nested publish runs to completion before the outer one resumes
///
/// Cloning the bus yields another handle onto the same registry. The bus is
/// single-threaded; it is neither `Send` nor `Sync`.
pub struct EventBus<E: BusEvent> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: BusEvent> EventBus<E> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Registers `handler` for events of exactly `kind`.
    pub fn subscribe<F>(&self, kind: E::Kind, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        self.register(Topic::Exact(kind), Rc::new(handler))
    }

    /// Registers `handler` for every event published on the bus.
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        self.register(Topic::All, Rc::new(handler))
    }

    fn register(&self, topic: Topic<E::Kind>, handler: Handler<E>) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = SubscriptionId::new(registry.next_id);
        registry.subscribers.push(Subscriber { id, topic, handler });
        tracing::trace!(subscription = %id, ?topic, "subscribed");
        id
    }

    /// Removes a subscription.
    ///
    /// Returns false if the id was unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|s| s.id != id);
        before != registry.subscribers.len()
    }

    /// Removes every subscription.
    pub fn clear(&self) {
        self.registry.borrow_mut().subscribers.clear();
    }

    /// Returns the number of subscriptions that would receive an event of `kind`.
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.registry
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.topic.matches(&kind))
            .count()
    }

    /// Delivers `event` to every matching handler, in registration order.
    ///
    /// The set of handlers is fixed when `publish` is called; handlers
    /// registered during this dispatch only see later events. Publishing an
    /// event nobody listens to is a no-op.
    pub fn publish(&self, event: E) {
        let kind = event.kind();
        let handlers: Vec<Handler<E>> = self
            .registry
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.topic.matches(&kind))
            .map(|s| Rc::clone(&s.handler))
            .collect();

        tracing::trace!(event = event.name(), handlers = handlers.len(), "publishing");

        for handler in handlers {
            handler(&event);
        }
    }
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.registry.borrow().subscribers.len())
            .finish()
    }
}
