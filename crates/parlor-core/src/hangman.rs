//! Hangman kernel: two independent puzzles raced side by side.
//!
//! Each seat gets its own secret word at creation and guesses letters
//! against it, tracking its own guessed set and lives. Turns still
//! alternate, but a seat that has finished (fully revealed its word or run
//! out of lives) is skipped. The game completes once both seats are
//! finished.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::{PerSeat, Seat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Wrong guesses allowed before a seat is hung.
pub const STARTING_LIVES: u8 = 6;

/// Hangman game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangmanState {
    /// Each seat's private secret word, uppercase ASCII.
    pub words: PerSeat<String>,
    /// Letters each seat has tried against its own word.
    pub guessed: PerSeat<BTreeSet<char>>,
    pub lives: PerSeat<u8>,
    /// Set once a seat has either revealed its word or lost all lives.
    pub finished: PerSeat<bool>,
}

impl HangmanState {
    pub fn new(first_word: impl Into<String>, second_word: impl Into<String>) -> Self {
        Self {
            words: PerSeat::new(
                first_word.into().to_ascii_uppercase(),
                second_word.into().to_ascii_uppercase(),
            ),
            guessed: PerSeat::default(),
            lives: PerSeat::splat(STARTING_LIVES),
            finished: PerSeat::splat(false),
        }
    }

    /// Whether every unique letter of the seat's word has been guessed.
    pub fn revealed(&self, seat: Seat) -> bool {
        let guessed = self.guessed.get(seat);
        self.words
            .get(seat)
            .chars()
            .all(|letter| guessed.contains(&letter))
    }

    /// Try a letter against the acting seat's own word.
    pub fn apply(&mut self, seat: Seat, letter: char) -> Result<Verdict, RuleViolation> {
        if !letter.is_ascii_alphabetic() {
            return Err(RuleViolation::NotALetter);
        }
        let letter = letter.to_ascii_uppercase();
        if *self.finished.get(seat) {
            return Err(RuleViolation::AlreadyFinished);
        }
        if self.guessed.get(seat).contains(&letter) {
            return Err(RuleViolation::LetterAlreadyTried);
        }

        self.guessed.get_mut(seat).insert(letter);
        if !self.words.get(seat).contains(letter) {
            *self.lives.get_mut(seat) -= 1;
        }

        if self.revealed(seat) || *self.lives.get(seat) == 0 {
            self.finished.set(seat, true);
        }

        if *self.finished.get(seat) && *self.finished.get(seat.opponent()) {
            return Ok(self.resolve());
        }

        // A finished opponent is skipped; a finished mover hands over.
        let turn = if *self.finished.get(seat.opponent()) {
            TurnFlow::Same
        } else {
            TurnFlow::Opponent
        };
        Ok(Verdict::next(turn))
    }

    /// Both seats are done: a sole full reveal wins outright, otherwise more
    /// remaining lives wins, otherwise a draw.
    fn resolve(&self) -> Verdict {
        match (self.revealed(Seat::First), self.revealed(Seat::Second)) {
            (true, false) => Verdict::win(Seat::First),
            (false, true) => Verdict::win(Seat::Second),
            _ => {
                let first = *self.lives.get(Seat::First);
                let second = *self.lives.get(Seat::Second);
                if first > second {
                    Verdict::win(Seat::First)
                } else if second > first {
                    Verdict::win(Seat::Second)
                } else {
                    Verdict::draw()
                }
            }
        }
    }
}
