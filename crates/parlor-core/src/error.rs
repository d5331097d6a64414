//! Error taxonomy for move proposals.
//!
//! Every rejection is a typed value returned to the caller; nothing here is
//! ever panicked across the store boundary. A rejected move leaves the game
//! document untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the move pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("game not found")]
    GameNotFound,

    #[error("game is not active")]
    GameNotActive,

    #[error("not your turn")]
    NotYourTurn,

    #[error("move payload does not match the game type")]
    MalformedMove,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] RuleViolation),
}

/// Kernel-specific reasons a well-formed move can still be illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleViolation {
    #[error("index is off the board")]
    OutOfRange,

    #[error("cell is already occupied")]
    CellOccupied,

    #[error("choice already submitted this round")]
    ChoiceAlreadyMade,

    #[error("guess must be exactly five letters")]
    WrongGuessLength,

    #[error("no guesses remaining")]
    OutOfGuesses,

    #[error("guess must be a single letter")]
    NotALetter,

    #[error("letter already tried")]
    LetterAlreadyTried,

    #[error("player has already finished")]
    AlreadyFinished,

    #[error("no piece on the source square")]
    EmptySquare,

    #[error("piece belongs to the opponent")]
    NotYourPiece,

    #[error("piece cannot reach that square")]
    UnreachableSquare,

    #[error("move would leave your own king in check")]
    KingLeftInCheck,

    #[error("castling is not available")]
    CastlingUnavailable,

    #[error("board is locked for memorizing")]
    BoardLocked,

    #[error("card is already matched")]
    CardAlreadyMatched,

    #[error("card is already face up")]
    CardAlreadyFlipped,
}
