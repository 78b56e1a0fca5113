//! Late-registration notifier.
//!
//! A one-to-many signal raised once per batch registration. Subscriptions are
//! one-shot: each callback runs at most once and is dropped after delivery.

use std::cell::{Cell, RefCell};

/// Handle used to cancel a pending subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnOnce()>;

/// Observer list for the late-registration signal.
#[derive(Default)]
pub struct LateRegistrationNotifier {
    subscribers: RefCell<Vec<(SubscriptionId, Callback)>>,
    next_id: Cell<u64>,
    notifications: Cell<u64>,
}

impl LateRegistrationNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a callback for the next notification only.
    pub fn subscribe_once(&self, callback: impl FnOnce() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers.borrow_mut().push((id, Box::new(callback)));
        id
    }

    /// Cancel a pending subscription. Returns false if it already fired or
    /// was never registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    /// Deliver the signal to every pending subscriber. Returns the number of
    /// callbacks run.
    pub fn notify(&self) -> usize {
        self.notifications.set(self.notifications.get() + 1);

        // Taken out first: callbacks re-render and may subscribe again
        let pending = std::mem::take(&mut *self.subscribers.borrow_mut());
        let delivered = pending.len();
        for (_, callback) in pending {
            callback();
        }
        delivered
    }

    /// True if `id` is still waiting for a notification.
    pub fn is_pending(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow().iter().any(|(sub, _)| *sub == id)
    }

    /// Number of subscriptions waiting for the next notification.
    pub fn pending(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Total notifications raised so far.
    pub fn notifications(&self) -> u64 {
        self.notifications.get()
    }

    /// Drop all pending subscriptions and reset the counter.
    pub fn clear(&self) {
        self.subscribers.borrow_mut().clear();
        self.notifications.set(0);
    }
}

impl std::fmt::Debug for LateRegistrationNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateRegistrationNotifier")
            .field("pending", &self.pending())
            .field("notifications", &self.notifications())
            .finish()
    }
}
