//! User-facing notifications as an injectable service.
//!
//! A [`Notifier`] is a cheap cloneable handle; the application root creates one and passes it to
//! whatever needs to publish or listen. Subscribers are invoked synchronously on the publishing
//! thread, outside the internal lock, so a subscriber may publish in turn.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

const DEFAULT_HISTORY: usize = 50;
const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_secs(2);

struct Inner {
    next_subscription: u64,
    next_notification: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    history: VecDeque<Notification>,
    max_history: usize,
    recent: VecDeque<(String, Instant)>,
    dedup_window: Duration,
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Notifier")
            .field("listeners", &inner.listeners.len())
            .field("history", &inner.history.len())
            .finish()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_HISTORY, DEFAULT_DEDUP_WINDOW)
    }

    /// `max_history` bounds [`Notifier::history`]; identical messages published within
    /// `dedup_window` of each other are dropped.
    pub fn with_options(max_history: usize, dedup_window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_subscription: 0,
                next_notification: 0,
                listeners: Vec::new(),
                history: VecDeque::new(),
                max_history,
                recent: VecDeque::new(),
                dedup_window,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sid, _)| *sid != id);
        inner.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Delivers a notification to every subscriber. Returns `None` when it was suppressed as a
    /// duplicate.
    pub fn publish(&self, level: Level, message: impl Into<String>) -> Option<u64> {
        let message = message.into();
        let now = Instant::now();

        let (notification, listeners) = {
            let mut inner = self.lock();
            let window = inner.dedup_window;
            while inner
                .recent
                .front()
                .is_some_and(|(_, at)| now.duration_since(*at) >= window)
            {
                inner.recent.pop_front();
            }
            if inner.recent.iter().any(|(m, _)| *m == message) {
                tracing::trace!(%message, "duplicate notification suppressed");
                return None;
            }
            if !window.is_zero() {
                inner.recent.push_back((message.clone(), now));
            }

            let notification = Notification {
                id: inner.next_notification,
                level,
                message,
            };
            inner.next_notification += 1;
            if inner.max_history > 0 {
                if inner.history.len() == inner.max_history {
                    inner.history.pop_front();
                }
                inner.history.push_back(notification.clone());
            }
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
            (notification, listeners)
        };

        for listener in listeners {
            listener(&notification);
        }
        Some(notification.id)
    }

    pub fn info(&self, message: impl Into<String>) -> Option<u64> {
        self.publish(Level::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Option<u64> {
        self.publish(Level::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Option<u64> {
        self.publish(Level::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Option<u64> {
        self.publish(Level::Error, message)
    }

    /// Oldest first.
    pub fn history(&self) -> Vec<Notification> {
        self.lock().history.iter().cloned().collect()
    }

    /// Forgets history and the duplicate window. Subscriptions stay.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.history.clear();
        inner.recent.clear();
    }
}
