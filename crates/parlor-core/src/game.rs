//! The shared game document and the uniform move pipeline.
//!
//! A [`Game`] is one match between exactly two players. Every mutation goes
//! through [`Game::apply_move`], which performs the checks common to all
//! game types (status gate, turn ownership) before handing the payload to
//! the matching kernel, then merges the kernel's verdict back into the
//! document: terminal outcome, turn flip, `last_updated` stamp.
//!
//! Once `status` leaves `Active` the document is immutable; further move
//! proposals are rejected, never silently dropped.

use crate::chess::ChessState;
use crate::error::MoveError;
use crate::hangman::HangmanState;
use crate::memory::MemoryState;
use crate::moves::{PlayerMove, RoundOutcome, TurnFlow};
use crate::rps::RpsState;
use crate::seat::Seat;
use crate::tictactoe::TicTacToeState;
use crate::wordle::WordleState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account-level player identity, assigned by the social backend.
pub type PlayerId = Uuid;

/// Which game a document is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TicTacToe,
    Rps,
    Wordle,
    Hangman,
    Chess,
    Memory,
}

/// Document lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Completed,
    Abandoned,
}

/// Result of a completed game. Set iff `status == Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player(PlayerId),
    Draw,
}

/// Kernel-specific state, owned exclusively by its kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum KernelState {
    TicTacToe(TicTacToeState),
    Rps(RpsState),
    Wordle(WordleState),
    Hangman(HangmanState),
    Chess(ChessState),
    Memory(MemoryState),
}

impl KernelState {
    pub fn kind(&self) -> GameKind {
        match self {
            KernelState::TicTacToe(_) => GameKind::TicTacToe,
            KernelState::Rps(_) => GameKind::Rps,
            KernelState::Wordle(_) => GameKind::Wordle,
            KernelState::Hangman(_) => GameKind::Hangman,
            KernelState::Chess(_) => GameKind::Chess,
            KernelState::Memory(_) => GameKind::Memory,
        }
    }
}

/// One match between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub kind: GameKind,
    /// Exactly two, immutable after creation; index 0 is the first/white
    /// party.
    pub players: [PlayerId; 2],
    pub status: GameStatus,
    /// Always one of `players` while the game is active.
    pub current_turn: PlayerId,
    /// Set iff `status == Completed`.
    pub winner: Option<Winner>,
    pub created_at: u64,
    pub last_updated: u64,
    pub kernel: KernelState,
}

impl Game {
    /// Create a fresh document. The first listed player opens.
    pub fn new(id: Uuid, players: [PlayerId; 2], kernel: KernelState, now_ms: u64) -> Self {
        Self {
            id,
            kind: kernel.kind(),
            players,
            status: GameStatus::Active,
            current_turn: players[0],
            winner: None,
            created_at: now_ms,
            last_updated: now_ms,
            kernel,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Which seat a player occupies, if they are in this game.
    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        if self.players[0] == player {
            Some(Seat::First)
        } else if self.players[1] == player {
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// The player occupying a seat.
    pub fn player_at(&self, seat: Seat) -> PlayerId {
        self.players[seat.index()]
    }

    /// Validate and apply a proposed move against this snapshot.
    ///
    /// On rejection the document is left untouched.
    pub fn apply_move(
        &mut self,
        player: PlayerId,
        mov: PlayerMove,
        now_ms: u64,
    ) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameNotActive);
        }
        let seat = self.seat_of(player).ok_or(MoveError::NotYourTurn)?;

        // RPS rounds are simultaneous; every other kernel is strictly
        // turn-ordered.
        let simultaneous = matches!(self.kernel, KernelState::Rps(_));
        if !simultaneous && self.current_turn != player {
            return Err(MoveError::NotYourTurn);
        }

        let verdict = match (&mut self.kernel, mov) {
            (KernelState::TicTacToe(state), PlayerMove::Place { cell }) => {
                state.apply(seat, cell)?
            }
            (KernelState::Rps(state), PlayerMove::Throw { choice }) => state.apply(seat, choice)?,
            (KernelState::Wordle(state), PlayerMove::Guess { word }) => {
                state.apply(seat, &word, now_ms)?
            }
            (KernelState::Hangman(state), PlayerMove::TryLetter { letter }) => {
                state.apply(seat, letter)?
            }
            (KernelState::Chess(state), PlayerMove::MovePiece { from, to }) => {
                state.apply(seat, from, to)?
            }
            (KernelState::Memory(state), PlayerMove::Flip { card }) => state.apply(seat, card)?,
            _ => return Err(MoveError::MalformedMove),
        };

        match verdict.outcome {
            Some(RoundOutcome::Win(winner)) => {
                self.status = GameStatus::Completed;
                self.winner = Some(Winner::Player(self.player_at(winner)));
            }
            Some(RoundOutcome::Draw) => {
                self.status = GameStatus::Completed;
                self.winner = Some(Winner::Draw);
            }
            None => {
                if verdict.turn == TurnFlow::Opponent {
                    self.current_turn = self.player_at(seat.opponent());
                }
            }
        }
        self.last_updated = now_ms;
        Ok(())
    }

    /// Mark an active game abandoned. Abandonment sets no winner.
    pub fn abandon(&mut self, now_ms: u64) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameNotActive);
        }
        self.status = GameStatus::Abandoned;
        self.last_updated = now_ms;
        Ok(())
    }

    /// End the memorize phase of a Memory game.
    pub fn unlock_board(&mut self, now_ms: u64) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameNotActive);
        }
        match &mut self.kernel {
            KernelState::Memory(state) => {
                state.unlock();
                self.last_updated = now_ms;
                Ok(())
            }
            _ => Err(MoveError::MalformedMove),
        }
    }

    /// Take one second off the on-turn player's chess clock. Returns the
    /// player whose flag just fell, if any. A flag fall is a signal, not a
    /// terminal transition.
    pub fn tick_clock(&mut self, now_ms: u64) -> Option<PlayerId> {
        if !self.is_active() {
            return None;
        }
        let seat = self.seat_of(self.current_turn)?;
        let flag_fell = match &mut self.kernel {
            KernelState::Chess(state) => state.tick(seat),
            _ => return None,
        };
        self.last_updated = now_ms;
        flag_fell.then(|| self.player_at(seat))
    }
}
