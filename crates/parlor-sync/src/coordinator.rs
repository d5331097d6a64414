//! Store-facing move coordination.
//!
//! The coordinator is the only writer of game documents. Each proposal is
//! validated and committed through [`MemoryStore::update_game`], so the
//! check always runs against the latest persisted state: of two racing
//! submissions, exactly one commits and the loser is rejected with the real
//! reason (`NotYourTurn`, occupied cell, ...) computed against fresh state.
//! The rejected caller re-fetches and may re-propose; the coordinator
//! itself never retries.

use crate::bootstrap;
use crate::store::{MemoryStore, StoreError};
use parlor_core::{Game, GameKind, KernelState, MoveError, PlayerId, PlayerMove};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Orchestrates move proposals against the document store.
pub struct MoveCoordinator {
    store: Arc<MemoryStore>,
}

impl MoveCoordinator {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Bootstrap and persist a new game between two players.
    pub fn create_game(
        &self,
        kind: GameKind,
        players: [PlayerId; 2],
    ) -> Result<Game, StoreError> {
        let game = bootstrap::new_game(kind, players, now_ms());
        let id = self.store.create_game(game.clone())?;
        info!(game = %id, ?kind, "created game");
        Ok(game)
    }

    /// Propose a move. On acceptance the committed document is returned;
    /// on rejection nothing is persisted.
    pub fn propose_move(
        &self,
        game_id: Uuid,
        player: PlayerId,
        mov: PlayerMove,
    ) -> Result<Game, MoveError> {
        let now = now_ms();
        let result = self
            .store
            .update_game(game_id, |game| game.apply_move(player, mov, now));
        match result {
            Ok((game, ())) => {
                debug!(game = %game_id, %player, "move accepted");
                Ok(game)
            }
            Err(err) => {
                debug!(game = %game_id, %player, %err, "move rejected");
                Err(err)
            }
        }
    }

    /// Mark an active game abandoned (player left, invite withdrawn).
    pub fn abandon(&self, game_id: Uuid) -> Result<Game, MoveError> {
        let now = now_ms();
        let (game, ()) = self.store.update_game(game_id, |game| game.abandon(now))?;
        info!(game = %game_id, "game abandoned");
        Ok(game)
    }

    /// End the memorize phase of a Memory game.
    pub fn unlock_memory(&self, game_id: Uuid) -> Result<Game, MoveError> {
        let now = now_ms();
        let (game, ()) = self
            .store
            .update_game(game_id, |game| game.unlock_board(now))?;
        debug!(game = %game_id, "memory board unlocked");
        Ok(game)
    }

    /// Run the chess clock for a game: one second per tick off whoever is
    /// on the move, for as long as the game stays active. A flag fall is
    /// logged and broadcast with the update; it does not end the game.
    pub fn spawn_clock(&self, game_id: Uuid) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let now = now_ms();
                let result = store.update_game(game_id, |game| {
                    if !matches!(game.kernel, KernelState::Chess(_)) {
                        return Err(MoveError::MalformedMove);
                    }
                    if !game.is_active() {
                        return Err(MoveError::GameNotActive);
                    }
                    Ok(game.tick_clock(now))
                });
                match result {
                    Ok((_game, Some(player))) => {
                        warn!(game = %game_id, %player, "flag fell");
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        })
    }
}
