//! In-memory game document store.
//!
//! The store holds one versioned document per game id and fans committed
//! snapshots out to subscribers. Semantics match the managed backend it
//! stands in for: last accepted write wins, delivery to subscribers is
//! eventual but order-preserving per writer (the `seq` on each update is
//! the commit order).
//!
//! [`MemoryStore::update_game`] is the important primitive: it runs the
//! caller's closure against the *live* document under its entry lock, so
//! validation always sees the latest persisted state and a racing writer is
//! rejected against fresh state rather than a stale snapshot. The closure
//! works on a copy; nothing is persisted or broadcast unless it succeeds.

use dashmap::DashMap;
use parlor_core::{Game, MoveError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Errors from the document store itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("game not found")]
    NotFound,

    #[error("game already exists")]
    AlreadyExists,
}

/// A committed snapshot delivered to subscribers and returned by loads.
/// Serializable so the realtime layer can push it to clients as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameUpdate {
    /// Commit counter for this game, starting at 1 on creation.
    pub seq: u64,
    pub game: Game,
}

struct Stored {
    seq: u64,
    game: Game,
}

/// Shared, thread-safe store of game documents.
pub struct MemoryStore {
    games: DashMap<Uuid, Stored>,
    subscribers: DashMap<Uuid, Vec<mpsc::UnboundedSender<GameUpdate>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            subscribers: DashMap::new(),
        }
    }

    /// Persist a freshly bootstrapped game document.
    pub fn create_game(&self, game: Game) -> Result<Uuid, StoreError> {
        let id = game.id;
        if self.games.contains_key(&id) {
            return Err(StoreError::AlreadyExists);
        }
        let update = GameUpdate {
            seq: 1,
            game: game.clone(),
        };
        self.games.insert(id, Stored { seq: 1, game });
        self.broadcast(id, update);
        Ok(id)
    }

    /// Snapshot the current document.
    pub fn load_game(&self, id: Uuid) -> Result<GameUpdate, StoreError> {
        self.games
            .get(&id)
            .map(|stored| GameUpdate {
                seq: stored.seq,
                game: stored.game.clone(),
            })
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite the document unconditionally (last write wins) and notify
    /// subscribers.
    pub fn apply_update(&self, id: Uuid, game: Game) -> Result<u64, StoreError> {
        let mut stored = self.games.get_mut(&id).ok_or(StoreError::NotFound)?;
        stored.seq += 1;
        stored.game = game.clone();
        let update = GameUpdate {
            seq: stored.seq,
            game,
        };
        let seq = stored.seq;
        drop(stored);
        self.broadcast(id, update);
        Ok(seq)
    }

    /// Run a state transition against the live document.
    ///
    /// The closure receives a copy of the latest persisted state; if it
    /// succeeds the copy is committed and broadcast in one step, still under
    /// the entry lock a racing writer would have to take first. If it
    /// rejects, nothing is persisted.
    pub fn update_game<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Game) -> Result<T, MoveError>,
    ) -> Result<(Game, T), MoveError> {
        let mut stored = self.games.get_mut(&id).ok_or(MoveError::GameNotFound)?;
        let mut game = stored.game.clone();
        let value = f(&mut game)?;
        stored.seq += 1;
        stored.game = game.clone();
        let update = GameUpdate {
            seq: stored.seq,
            game: game.clone(),
        };
        drop(stored);
        self.broadcast(id, update);
        Ok((game, value))
    }

    /// Register for committed snapshots of one game. Dropping the receiver
    /// unsubscribes; the dead sender is pruned on the next broadcast.
    pub fn subscribe(&self, id: Uuid) -> mpsc::UnboundedReceiver<GameUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.entry(id).or_default().push(tx);
        rx
    }

    fn broadcast(&self, id: Uuid, update: GameUpdate) {
        if let Some(mut senders) = self.subscribers.get_mut(&id) {
            senders.retain(|tx| tx.send(update.clone()).is_ok());
            debug!(game = %id, seq = update.seq, listeners = senders.len(), "broadcast update");
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
