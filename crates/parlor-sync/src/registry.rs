//! Keyed registry of live realtime subscriptions.
//!
//! Fan-out listeners (per game, per friend in a status list) are created
//! and torn down dynamically as screens come and go. Rather than ambient
//! module-level maps, each owner holds a registry with an explicit
//! `ensure`/`dispose_all` lifecycle: at most one live subscription per key,
//! and dropping the registry (or the handle) tears the listener down.

use crate::store::{GameUpdate, MemoryStore};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// A live listener task. Dropping it stops delivery.
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Drive a store subscription into a callback on a background task.
    pub fn spawn<F>(store: Arc<MemoryStore>, game_id: Uuid, mut on_change: F) -> Self
    where
        F: FnMut(GameUpdate) + Send + 'static,
    {
        let mut rx = store.subscribe(game_id);
        let task = tokio::spawn(async move {
            while let Some(update) = rx.recv().await {
                on_change(update);
            }
        });
        Self { task }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// At most one live [`Subscription`] per key.
pub struct SubscriptionRegistry {
    active: DashMap<Uuid, Subscription>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            active: DashMap::new(),
        }
    }

    /// Create the subscription for `key` if none is live yet. Racing callers
    /// are serialized on the entry; `make` runs at most once per key.
    pub fn ensure(&self, key: Uuid, make: impl FnOnce() -> Subscription) {
        self.active.entry(key).or_insert_with(|| {
            debug!(%key, "registering subscription");
            make()
        });
    }

    pub fn contains(&self, key: Uuid) -> bool {
        self.active.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Tear down the subscription for `key`, if any.
    pub fn dispose(&self, key: Uuid) -> bool {
        self.active.remove(&key).is_some()
    }

    /// Tear down every live subscription.
    pub fn dispose_all(&self) {
        debug!(count = self.active.len(), "disposing all subscriptions");
        self.active.clear();
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
