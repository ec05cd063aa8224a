use std::sync::{Arc, PoisonError, RwLock};

use futures::{Stream, StreamExt};
use shared::action::Action;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use crate::{reducer::reduce, state::State};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Notification sent to subscribers after every dispatch.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub action: &'static str,
    pub state: Arc<State>,
}

/// Holds the current [`State`] and applies actions to it.
///
/// Cloning a `Store` yields another handle to the same state, so it can be
/// handed to every component that reads or dispatches.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<Arc<State>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl Store {
    pub fn new(initial: State) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                events,
            }),
        }
    }

    /// Runs `action` through the reducer and publishes the new snapshot.
    ///
    /// Dispatches are serialized: subscribers observe snapshots in the order
    /// the actions arrived.
    pub fn dispatch(&self, action: Action) -> Arc<State> {
        let kind = action.discriminant();
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(reduce(&**guard, action));
        *guard = Arc::clone(&next);
        debug!(
            action = kind,
            products = next.products.len(),
            cart_lines = next.cart.len(),
            cart_open = next.cart_open,
            "dispatched"
        );
        // No receivers is fine; nothing is rendering yet.
        let _ = self.inner.events.send(StoreEvent {
            action: kind,
            state: Arc::clone(&next),
        });
        drop(guard);
        next
    }

    pub fn get_state(&self) -> Arc<State> {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    /// Snapshots published after this call, as a stream. Lagging consumers
    /// skip the snapshots they missed.
    pub fn watch(&self) -> impl Stream<Item = Arc<State>> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|event| async move {
            match event {
                Ok(event) => Some(event.state),
                Err(err) => {
                    warn!(%err, "state watcher lagged");
                    None
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
