//! Notification recorder for asserting on side effects.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use textentry_core::{Notification, NotificationSource, Subscriber, SubscriptionId};

#[derive(Debug, Default)]
struct Tally {
    counts: HashMap<Notification, usize>,
    events: Vec<Notification>,
}

impl Tally {
    fn record(&mut self, notification: Notification) {
        *self.counts.entry(notification).or_default() += 1;
        self.events.push(notification);
    }
}

/// Counts notifications by kind.
///
/// Clones share the same tally, so a clone handed to a subscriber and the
/// one kept by the test always agree.
#[derive(Debug, Clone, Default)]
pub struct NotificationRecorder {
    tally: Rc<RefCell<Tally>>,
    subscription: Option<SubscriptionId>,
}

impl NotificationRecorder {
    /// Create a recorder that is not subscribed to anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder subscribed to `source`.
    pub fn attach<S: NotificationSource + ?Sized>(source: &mut S) -> Self {
        let mut recorder = Self::new();
        recorder.subscription = Some(source.subscribe(recorder.callback()));
        recorder
    }

    /// Unsubscribe from `source`. Counts are kept.
    pub fn detach<S: NotificationSource + ?Sized>(&mut self, source: &mut S) -> bool {
        self.subscription
            .take()
            .is_some_and(|id| source.unsubscribe(id))
    }

    /// A subscriber callback feeding this recorder.
    pub fn callback(&self) -> Subscriber {
        let tally = Rc::clone(&self.tally);
        Box::new(move |notification| tally.borrow_mut().record(notification))
    }

    /// Subscription created by [`NotificationRecorder::attach`].
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Number of notifications of `kind` since creation or the last reset.
    pub fn count(&self, kind: Notification) -> usize {
        self.tally.borrow().counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of notifications of any kind.
    pub fn total(&self) -> usize {
        self.tally.borrow().events.len()
    }

    /// Notifications in delivery order.
    pub fn events(&self) -> Vec<Notification> {
        self.tally.borrow().events.clone()
    }

    /// Zero all counts.
    pub fn reset(&self) {
        let mut tally = self.tally.borrow_mut();
        tally.counts.clear();
        tally.events.clear();
    }
}
