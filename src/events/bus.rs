//! Publish/subscribe bus keyed by message kind.
//!
//! Delivery is synchronous and in-process: `publish` calls every handler
//! subscribed to the message's kind, in registration order, before it
//! returns.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::message::{Message, MessageKind};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

type Handler = Box<dyn FnMut(&Message)>;

/// Subscriber registry and dispatcher.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use card_table::core::GroupId;
/// use card_table::events::{EventBus, Message, MessageKind};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut bus = EventBus::new();
///
/// let sink = Rc::clone(&seen);
/// let id = bus.subscribe(MessageKind::Rearrange, move |m| sink.borrow_mut().push(*m));
///
/// bus.publish(&Message::rearrange(GroupId::new(1)));
/// bus.publish(&Message::destroy(GroupId::new(1)));
/// assert_eq!(seen.borrow().len(), 1);
///
/// bus.unsubscribe(id);
/// bus.publish(&Message::rearrange(GroupId::new(1)));
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    /// Handlers per kind, in registration order.
    subscribers: FxHashMap<MessageKind, Vec<(SubscriptionId, Handler)>>,

    /// Next subscription ID to allocate.
    next_id: u32,

    /// Messages published since creation (or the last `clear`).
    published: u64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one message kind.
    pub fn subscribe<F>(&mut self, kind: MessageKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&Message) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for handlers in self.subscribers.values_mut() {
            let before = handlers.len();
            handlers.retain(|(sub, _)| *sub != id);
            removed |= handlers.len() != before;
        }
        self.subscribers.retain(|_, handlers| !handlers.is_empty());
        removed
    }

    /// Deliver a message to every handler of its kind.
    ///
    /// Returns the number of handlers called.
    pub fn publish(&mut self, message: &Message) -> usize {
        self.published += 1;
        tracing::trace!(?message, "publish");

        let Some(handlers) = self.subscribers.get_mut(&message.kind()) else {
            return 0;
        };
        for (_, handler) in handlers.iter_mut() {
            handler(message);
        }
        handlers.len()
    }

    /// Drop every subscription (full reset).
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.published = 0;
    }

    /// Number of handlers registered for a kind.
    #[must_use]
    pub fn subscriber_count(&self, kind: MessageKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Messages published so far.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("rearrange", &self.subscriber_count(MessageKind::Rearrange))
            .field("group_destroy", &self.subscriber_count(MessageKind::GroupDestroy))
            .field("published", &self.published)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::GroupId;

    fn recorder(bus: &mut EventBus, kind: MessageKind, tag: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> SubscriptionId {
        let log = Rc::clone(log);
        bus.subscribe(kind, move |_| log.borrow_mut().push(tag))
    }

    #[test]
    fn test_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        recorder(&mut bus, MessageKind::Rearrange, "first", &log);
        recorder(&mut bus, MessageKind::Rearrange, "second", &log);
        recorder(&mut bus, MessageKind::Rearrange, "third", &log);

        let delivered = bus.publish(&Message::rearrange(GroupId::new(0)));

        assert_eq!(delivered, 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_kind_filtering() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        recorder(&mut bus, MessageKind::Rearrange, "rearrange", &log);
        recorder(&mut bus, MessageKind::GroupDestroy, "destroy", &log);

        bus.publish(&Message::destroy(GroupId::new(0)));

        assert_eq!(*log.borrow(), vec!["destroy"]);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let a = recorder(&mut bus, MessageKind::Rearrange, "a", &log);
        recorder(&mut bus, MessageKind::Rearrange, "b", &log);

        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        assert_eq!(bus.subscriber_count(MessageKind::Rearrange), 1);

        bus.publish(&Message::rearrange(GroupId::new(0)));
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut bus = EventBus::new();
        assert_eq!(bus.publish(&Message::rearrange(GroupId::new(0))), 0);
        assert_eq!(bus.published(), 1);
    }

    #[test]
    fn test_clear() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        recorder(&mut bus, MessageKind::Rearrange, "a", &log);
        recorder(&mut bus, MessageKind::GroupDestroy, "b", &log);

        bus.clear();

        assert_eq!(bus.subscriber_count(MessageKind::Rearrange), 0);
        assert_eq!(bus.subscriber_count(MessageKind::GroupDestroy), 0);
        bus.publish(&Message::rearrange(GroupId::new(0)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(MessageKind::Rearrange, |_| {});
        bus.clear();
        let b = bus.subscribe(MessageKind::Rearrange, |_| {});
        assert_ne!(a, b);
    }
}
