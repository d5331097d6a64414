//! Integration tests for the Parlor rule engine.
//!
//! These drive complete matches through the shared move pipeline the way
//! the coordination layer does: one `apply_move` per accepted move, always
//! against the current document.

use parlor_core::*;
use uuid::Uuid;

fn new_game(kernel: KernelState) -> (Game, PlayerId, PlayerId) {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let game = Game::new(Uuid::new_v4(), [a, b], kernel, 1_000);
    (game, a, b)
}

fn sq(s: &str) -> Square {
    chess::parse_square(s).unwrap()
}

#[test]
fn tictactoe_top_row_victory() {
    let (mut game, a, b) = new_game(KernelState::TicTacToe(TicTacToeState::new()));

    for (player, cell) in [(a, 0), (b, 4), (a, 1), (b, 3), (a, 2)] {
        game.apply_move(player, PlayerMove::Place { cell }, 2_000)
            .unwrap();
    }

    let KernelState::TicTacToe(state) = &game.kernel else {
        panic!("wrong kernel");
    };
    let expect = [
        Some(Seat::First),
        Some(Seat::First),
        Some(Seat::First),
        Some(Seat::Second),
        Some(Seat::Second),
        None,
        None,
        None,
        None,
    ];
    assert_eq!(state.board, expect);
    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner, Some(Winner::Player(a)));
}

#[test]
fn tictactoe_marker_count_only_grows() {
    let (mut game, a, b) = new_game(KernelState::TicTacToe(TicTacToeState::new()));
    let mut previous = 0;
    for (player, cell) in [(a, 4), (b, 0), (a, 8), (b, 2)] {
        game.apply_move(player, PlayerMove::Place { cell }, 2_000)
            .unwrap();
        let KernelState::TicTacToe(state) = &game.kernel else {
            panic!("wrong kernel");
        };
        let filled = state.board.iter().filter(|c| c.is_some()).count();
        assert!(filled > previous);
        previous = filled;
    }
}

#[test]
fn wordle_two_pass_feedback_for_rater_against_paper() {
    let (mut game, a, _b) = new_game(KernelState::Wordle(WordleState::new("PAPER")));

    game.apply_move(
        a,
        PlayerMove::Guess {
            word: "RATER".into(),
        },
        2_000,
    )
    .unwrap();

    let KernelState::Wordle(state) = &game.kernel else {
        panic!("wrong kernel");
    };
    let record = &state.guesses.first[0];
    assert_eq!(record.feedback.greens, vec![1, 3, 4]);
    // The secret's only R sits at index 4 and was consumed by a green, so
    // the leading R gets nothing.
    assert!(record.feedback.yellows.is_empty());
    assert_eq!(game.status, GameStatus::Active);
}

#[test]
fn wordle_correct_guess_ends_the_match() {
    let (mut game, a, b) = new_game(KernelState::Wordle(WordleState::new("FLUSH")));

    game.apply_move(
        a,
        PlayerMove::Guess {
            word: "DRAIN".into(),
        },
        2_000,
    )
    .unwrap();
    assert_eq!(game.current_turn, b);
    game.apply_move(
        b,
        PlayerMove::Guess {
            word: "FLUSH".into(),
        },
        2_001,
    )
    .unwrap();

    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner, Some(Winner::Player(b)));
}

#[test]
fn hangman_lives_never_increase() {
    let (mut game, a, b) = new_game(KernelState::Hangman(HangmanState::new("PIPE", "SOAP")));

    let mut last_lives = (u8::MAX, u8::MAX);
    for (player, letter) in [(a, 'P'), (b, 'Z'), (a, 'Q'), (b, 'S'), (a, 'I'), (b, 'O')] {
        game.apply_move(player, PlayerMove::TryLetter { letter }, 2_000)
            .unwrap();
        let KernelState::Hangman(state) = &game.kernel else {
            panic!("wrong kernel");
        };
        let lives = (state.lives.first, state.lives.second);
        assert!(lives.0 <= last_lives.0 && lives.1 <= last_lives.1);
        last_lives = lives;
    }
}

#[test]
fn hangman_full_reveal_beats_a_hung_opponent() {
    let (mut game, a, b) = new_game(KernelState::Hangman(HangmanState::new("PIE", "SOAP")));

    // A reveals P-I-E while B guesses only wrong letters.
    for (player, letter) in [(a, 'P'), (b, 'Z'), (a, 'I'), (b, 'X'), (a, 'E')] {
        game.apply_move(player, PlayerMove::TryLetter { letter }, 2_000)
            .unwrap();
    }
    // A is finished; B keeps burning lives until hung.
    for letter in ['Q', 'R', 'T', 'U'] {
        game.apply_move(b, PlayerMove::TryLetter { letter }, 2_001)
            .unwrap();
    }

    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner, Some(Winner::Player(a)));
}

#[test]
fn chess_scholars_mate() {
    let (mut game, a, b) = new_game(KernelState::Chess(ChessState::new()));

    let script = [
        (a, "e2", "e4"),
        (b, "e7", "e5"),
        (a, "f1", "c4"),
        (b, "b8", "c6"),
        (a, "d1", "h5"),
        (b, "g8", "f6"),
        (a, "h5", "f7"),
    ];
    for (player, from, to) in script {
        game.apply_move(
            player,
            PlayerMove::MovePiece {
                from: sq(from),
                to: sq(to),
            },
            2_000,
        )
        .unwrap();
    }

    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner, Some(Winner::Player(a)));
    let KernelState::Chess(state) = &game.kernel else {
        panic!("wrong kernel");
    };
    assert_eq!(state.moves.last().unwrap(), "h5-f7#");
}

#[test]
fn chess_rejects_a_self_check_and_keeps_the_turn() {
    let (mut game, a, b) = new_game(KernelState::Chess(ChessState::new()));

    for (player, from, to) in [
        (a, "e2", "e4"),
        (b, "e7", "e5"),
        (a, "d2", "d4"),
        (b, "d8", "h4"),
    ] {
        game.apply_move(
            player,
            PlayerMove::MovePiece {
                from: sq(from),
                to: sq(to),
            },
            2_000,
        )
        .unwrap();
    }

    // f2-f3 would open the e1-h4 diagonal onto the king.
    let result = game.apply_move(
        a,
        PlayerMove::MovePiece {
            from: sq("f2"),
            to: sq("f3"),
        },
        2_001,
    );
    assert_eq!(
        result,
        Err(MoveError::IllegalMove(RuleViolation::KingLeftInCheck))
    );
    assert_eq!(game.current_turn, a);
    assert_eq!(game.status, GameStatus::Active);
}

#[test]
fn memory_match_keeps_turn_and_miss_passes_it() {
    let deck: Vec<u8> = (0..8).flat_map(|v| [v, v]).collect();
    let (mut game, a, b) = new_game(KernelState::Memory(MemoryState::with_deck(deck)));

    assert_eq!(
        game.apply_move(a, PlayerMove::Flip { card: 0 }, 2_000),
        Err(MoveError::IllegalMove(RuleViolation::BoardLocked))
    );
    game.unlock_board(2_001).unwrap();

    // A matches the first pair and keeps the turn.
    game.apply_move(a, PlayerMove::Flip { card: 0 }, 2_002)
        .unwrap();
    game.apply_move(a, PlayerMove::Flip { card: 1 }, 2_003)
        .unwrap();
    assert_eq!(game.current_turn, a);

    // A misses; turn passes to B.
    game.apply_move(a, PlayerMove::Flip { card: 2 }, 2_004)
        .unwrap();
    game.apply_move(a, PlayerMove::Flip { card: 4 }, 2_005)
        .unwrap();
    assert_eq!(game.current_turn, b);
}

#[test]
fn document_round_trips_through_json() {
    let (game, _a, _b) = new_game(KernelState::Chess(ChessState::new()));
    let encoded = serde_json::to_string(&game).unwrap();
    let decoded: Game = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, game);
}
