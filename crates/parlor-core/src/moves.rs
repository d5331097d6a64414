//! Move payloads submitted by players and the verdicts kernels return.
//!
//! A [`PlayerMove`] is the raw request coming from the UI. Each variant
//! matches exactly one game type; submitting the wrong shape is rejected by
//! the move pipeline as `MalformedMove` before any kernel sees it.

use crate::chess::Square;
use crate::rps::Choice;
use crate::seat::Seat;
use serde::{Deserialize, Serialize};

/// A proposed move, one payload shape per game type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlayerMove {
    /// Tic-tac-toe: claim a cell (0..9, row-major).
    Place { cell: usize },

    /// Rock-paper-scissors: submit this round's choice.
    Throw { choice: Choice },

    /// Wordle: submit a five-letter guess.
    Guess { word: String },

    /// Hangman: try a letter against your secret word.
    TryLetter { letter: char },

    /// Chess: move the piece on `from` to `to`.
    MovePiece { from: Square, to: Square },

    /// Memory: flip the card at an index (0..16).
    Flip { card: usize },
}

/// How the turn proceeds after an accepted, non-terminal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFlow {
    /// Turn passes to the other seat.
    Opponent,
    /// The acting seat keeps the turn (RPS rounds, Memory matches,
    /// opponent out of guesses).
    Same,
}

/// Terminal result signaled by a kernel, in seat terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win(Seat),
    Draw,
}

/// What a kernel reports back for an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Set iff the move ended the game.
    pub outcome: Option<RoundOutcome>,
    /// Ignored when `outcome` is set.
    pub turn: TurnFlow,
}

impl Verdict {
    /// Game continues; turn proceeds as given.
    pub fn next(turn: TurnFlow) -> Self {
        Self {
            outcome: None,
            turn,
        }
    }

    /// The acting side (or the side named) has won.
    pub fn win(seat: Seat) -> Self {
        Self {
            outcome: Some(RoundOutcome::Win(seat)),
            turn: TurnFlow::Same,
        }
    }

    /// Game over with no winner.
    pub fn draw() -> Self {
        Self {
            outcome: Some(RoundOutcome::Draw),
            turn: TurnFlow::Same,
        }
    }
}
