//! Typed publish/subscribe.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};
use tracing::{debug, warn};

use crate::events::Event;

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    handlers: RwLock<Vec<(u64, Handler<E>)>>,
    next_id: AtomicU64,
}

impl<E> Registry<E> {
    fn remove(&self, id: u64) -> bool {
        match self.handlers.write() {
            Ok(mut handlers) => {
                let before = handlers.len();
                handlers.retain(|(h, _)| *h != id);
                handlers.len() != before
            }
            Err(e) => {
                warn!("Event bus lock poisoned: {}", e);
                false
            }
        }
    }
}

/// Synchronous in-process event bus for one event type.
///
/// Handlers run on the publisher's thread in subscription order. Delivery works on a
/// snapshot of the handler list, so a handler may subscribe or unsubscribe without
/// deadlocking; such changes take effect from the next publish.
pub struct EventBus<E> {
    registry: Arc<Registry<E>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Registry {
                handlers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }
}

impl<E: Event> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        match self.registry.handlers.write() {
            Ok(mut handlers) => handlers.push((id, Arc::new(handler))),
            Err(e) => warn!("Event bus lock poisoned, handler dropped: {}", e),
        }

        let weak: Weak<Registry<E>> = Arc::downgrade(&self.registry);
        Subscription {
            id,
            remove: Box::new(move |id| weak.upgrade().is_some_and(|r| r.remove(id))),
        }
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// # Returns
    /// Number of handlers invoked. Zero means the event was dropped.
    pub fn publish(&self, event: &E) -> usize {
        let snapshot: Vec<Handler<E>> = match self.registry.handlers.read() {
            Ok(handlers) => handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(e) => {
                warn!("Event bus lock poisoned, {} dropped: {}", event.topic(), e);
                return 0;
            }
        };

        for handler in &snapshot {
            handler(event);
        }
        debug!("Published {} to {} subscriber(s)", event.topic(), snapshot.len());
        snapshot.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

/// Handle to one registered handler.
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "a subscription stays registered until unsubscribe() is called"]
pub struct Subscription {
    id: u64,
    remove: Box<dyn Fn(u64) -> bool + Send + Sync>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove exactly this handler.
    ///
    /// # Returns
    /// Whether the handler was still registered.
    pub fn unsubscribe(self) -> bool {
        (self.remove)(self.id)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
