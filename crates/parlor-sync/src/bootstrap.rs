//! Invite bootstrap: builds well-formed game documents when two players
//! agree to play.
//!
//! Consent and invite plumbing live in the social layer; this module only
//! guarantees the resulting document is well-formed for its kernel.

use parlor_core::words::pick_secret_word;
use parlor_core::{
    ChessState, Game, GameKind, HangmanState, KernelState, MemoryState, PlayerId, RpsState,
    TicTacToeState, WordleState,
};
use rand::Rng;
use uuid::Uuid;

/// Create a new game document of the requested kind. The first listed
/// player is the first/white party and opens the game.
pub fn new_game(kind: GameKind, players: [PlayerId; 2], now_ms: u64) -> Game {
    let mut rng = rand::thread_rng();
    new_game_with_rng(kind, players, now_ms, &mut rng)
}

/// Deterministic variant for tests and replays.
pub fn new_game_with_rng<R: Rng>(
    kind: GameKind,
    players: [PlayerId; 2],
    now_ms: u64,
    rng: &mut R,
) -> Game {
    let kernel = match kind {
        GameKind::TicTacToe => KernelState::TicTacToe(TicTacToeState::new()),
        GameKind::Rps => KernelState::Rps(RpsState::new()),
        GameKind::Wordle => KernelState::Wordle(WordleState::new(pick_secret_word(rng))),
        GameKind::Hangman => KernelState::Hangman(HangmanState::new(
            pick_secret_word(rng),
            pick_secret_word(rng),
        )),
        GameKind::Chess => KernelState::Chess(ChessState::new()),
        GameKind::Memory => KernelState::Memory(MemoryState::new(rng)),
    };
    Game::new(Uuid::new_v4(), players, kernel, now_ms)
}
