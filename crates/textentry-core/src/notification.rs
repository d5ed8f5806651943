//! Notifications emitted by text controls and the subscriber list that
//! delivers them.
//!
//! Delivery is synchronous: [`Notifier::emit`] invokes every subscriber in
//! registration order before returning. There is no queue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change reported by a text control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notification {
    /// Content was modified (or explicitly assigned).
    Changed,
    /// An insertion was rejected or cut short by the maximum length.
    LengthExceeded,
    /// Enter was pressed in a single-line control.
    Submitted,
}

impl Notification {
    /// All notification kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::Changed, Self::LengthExceeded, Self::Submitted];

    /// Stable lowercase name, used in logs and assertion messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::LengthExceeded => "length_exceeded",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type alias for subscriber callbacks.
pub type Subscriber = Box<dyn FnMut(Notification)>;

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscribers.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Notifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Callbacks run in registration order.
    pub fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, callback));
        log::trace!("subscribed {id:?} ({} total)", self.subscribers.len());
        id
    }

    /// Remove a callback. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            log::trace!("unsubscribed {id:?}");
        }
        removed
    }

    /// Deliver a notification to every subscriber.
    pub fn emit(&mut self, notification: Notification) {
        log::debug!("emit {notification} to {} subscriber(s)", self.subscribers.len());
        for (_, callback) in &mut self.subscribers {
            callback(notification);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Something that publishes [`Notification`]s.
pub trait NotificationSource {
    /// Register a callback.
    fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId;

    /// Remove a callback. Returns `false` if the id was unknown.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

impl NotificationSource for Notifier {
    fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId {
        Self::subscribe(self, callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        Self::unsubscribe(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collector() -> (Rc<RefCell<Vec<Notification>>>, Subscriber) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Box::new(move |n| sink.borrow_mut().push(n)))
    }

    #[test]
    fn test_notification_name() {
        assert_eq!(Notification::Changed.name(), "changed");
        assert_eq!(Notification::LengthExceeded.to_string(), "length_exceeded");
        assert_eq!(Notification::Submitted.to_string(), "submitted");
    }

    #[test]
    fn test_notifier_new_is_empty() {
        let notifier = Notifier::new();
        assert!(notifier.is_empty());
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn test_notifier_emit_without_subscribers() {
        let mut notifier = Notifier::new();
        notifier.emit(Notification::Changed);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_notifier_delivers_in_order() {
        let mut notifier = Notifier::new();
        let (log, sub) = collector();
        notifier.subscribe(sub);

        notifier.emit(Notification::Changed);
        notifier.emit(Notification::LengthExceeded);
        notifier.emit(Notification::Changed);

        assert_eq!(
            *log.borrow(),
            vec![
                Notification::Changed,
                Notification::LengthExceeded,
                Notification::Changed
            ]
        );
    }

    #[test]
    fn test_notifier_registration_order() {
        let mut notifier = Notifier::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            notifier.subscribe(Box::new(move |_| order.borrow_mut().push(tag)));
        }

        notifier.emit(Notification::Changed);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_notifier_unsubscribe() {
        let mut notifier = Notifier::new();
        let (log, sub) = collector();
        let id = notifier.subscribe(sub);

        notifier.emit(Notification::Changed);
        assert!(notifier.unsubscribe(id));
        notifier.emit(Notification::Changed);

        assert_eq!(log.borrow().len(), 1);
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn test_subscription_ids_unique() {
        let mut notifier = Notifier::new();
        let a = notifier.subscribe(Box::new(|_| {}));
        let b = notifier.subscribe(Box::new(|_| {}));
        notifier.unsubscribe(a);
        let c = notifier.subscribe(Box::new(|_| {}));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(notifier.len(), 2);
    }

    #[test]
    fn test_notifier_as_source() {
        fn attach(source: &mut dyn NotificationSource, sub: Subscriber) -> SubscriptionId {
            source.subscribe(sub)
        }
        let mut notifier = Notifier::new();
        let (log, sub) = collector();
        let id = attach(&mut notifier, sub);
        notifier.emit(Notification::Submitted);
        assert_eq!(*log.borrow(), vec![Notification::Submitted]);
        assert!(NotificationSource::unsubscribe(&mut notifier, id));
    }

    fn kind() -> impl Strategy<Value = Notification> {
        prop::sample::select(Notification::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_every_subscriber_sees_emit_order(
            emitted in prop::collection::vec(kind(), 0..32),
            subscribers in 1usize..5,
        ) {
            let mut notifier = Notifier::new();
            let logs: Vec<_> = (0..subscribers)
                .map(|_| {
                    let (log, sub) = collector();
                    notifier.subscribe(sub);
                    log
                })
                .collect();

            for n in &emitted {
                notifier.emit(*n);
            }

            for log in &logs {
                prop_assert_eq!(&*log.borrow(), &emitted);
            }
        }
    }
}
