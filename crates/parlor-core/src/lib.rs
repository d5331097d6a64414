//! Parlor - the rule engine behind a family of two-player social games.
//!
//! This crate provides pure, synchronous game logic: move validation, turn
//! state transitions, and terminal-condition detection for six game types
//! sharing one document lifecycle. There is no I/O here; persistence and
//! realtime delivery live in `parlor-sync`.
//!
//! # Architecture
//!
//! Each game type is an independent *kernel*: a state struct with an
//! `apply` that validates a proposed move, mutates the state, and reports a
//! [`Verdict`] (terminal outcome plus turn flow). The shared [`Game`]
//! document owns everything common to all kernels - players, status, turn
//! ownership, timestamps - and routes moves through a uniform pipeline.
//!
//! # Modules
//!
//! - [`seat`]: two-seat identity and per-seat pairs
//! - [`game`]: the shared game document and move pipeline
//! - [`moves`]: move payloads and kernel verdicts
//! - [`error`]: the move rejection taxonomy
//! - [`tictactoe`], [`rps`], [`wordle`], [`hangman`], [`chess`], [`memory`]:
//!   the six rule kernels
//! - [`words`]: the themed secret-word dictionary

pub mod chess;
pub mod error;
pub mod game;
pub mod hangman;
pub mod memory;
pub mod moves;
pub mod rps;
pub mod seat;
pub mod tictactoe;
pub mod wordle;
pub mod words;

// Re-export commonly used types
pub use chess::{ChessState, Piece, PieceKind, Square};
pub use error::{MoveError, RuleViolation};
pub use game::{Game, GameKind, GameStatus, KernelState, PlayerId, Winner};
pub use hangman::HangmanState;
pub use memory::MemoryState;
pub use moves::{PlayerMove, RoundOutcome, TurnFlow, Verdict};
pub use rps::{Choice, RpsState};
pub use seat::{PerSeat, Seat};
pub use tictactoe::TicTacToeState;
pub use wordle::{score_guess, WordleState};
