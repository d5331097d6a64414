//! Memory-match kernel.
//!
//! Sixteen cards holding eight shuffled pairs. The board opens locked, with
//! every card face up for memorizing; the coordination layer unlocks it when
//! the memorize phase ends. A turn flips up to two cards: a matching pair
//! scores and keeps the turn, a miss flips both back and passes it.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::{PerSeat, Seat};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cards on the board.
pub const CARD_COUNT: usize = 16;

/// Distinct symbols, two cards each.
pub const PAIR_COUNT: usize = 8;

/// Memory game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryState {
    /// Face value (0..8) of each card position.
    pub cards: Vec<u8>,
    /// Cards currently face up in this turn (at most two).
    pub flipped: Vec<usize>,
    /// Card positions already matched away.
    pub matched: Vec<usize>,
    pub scores: PerSeat<u8>,
    /// True during the initial memorize phase; no flips allowed.
    pub locked: bool,
}

impl MemoryState {
    /// A freshly shuffled, locked board.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut cards: Vec<u8> = (0..PAIR_COUNT as u8)
            .flat_map(|value| [value, value])
            .collect();
        cards.shuffle(rng);
        Self::with_deck(cards)
    }

    /// Build from a known deck layout (tests and replays).
    ///
    /// Panics if the deck does not hold exactly [`CARD_COUNT`] cards.
    pub fn with_deck(cards: Vec<u8>) -> Self {
        assert_eq!(cards.len(), CARD_COUNT, "deck must hold {CARD_COUNT} cards");
        Self {
            cards,
            flipped: Vec::new(),
            matched: Vec::new(),
            scores: PerSeat::default(),
            locked: true,
        }
    }

    /// End the memorize phase.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Flip the card at `card` for the acting seat.
    pub fn apply(&mut self, seat: Seat, card: usize) -> Result<Verdict, RuleViolation> {
        if self.locked {
            return Err(RuleViolation::BoardLocked);
        }
        if card >= CARD_COUNT {
            return Err(RuleViolation::OutOfRange);
        }
        if self.matched.contains(&card) {
            return Err(RuleViolation::CardAlreadyMatched);
        }
        if self.flipped.contains(&card) {
            return Err(RuleViolation::CardAlreadyFlipped);
        }

        self.flipped.push(card);
        if self.flipped.len() < 2 {
            return Ok(Verdict::next(TurnFlow::Same));
        }

        let (a, b) = (self.flipped[0], self.flipped[1]);
        self.flipped.clear();

        if self.cards[a] != self.cards[b] {
            // Miss: both flip back, turn passes.
            return Ok(Verdict::next(TurnFlow::Opponent));
        }

        self.matched.push(a);
        self.matched.push(b);
        *self.scores.get_mut(seat) += 1;

        if self.matched.len() == CARD_COUNT {
            let first = self.scores.first;
            let second = self.scores.second;
            return Ok(if first > second {
                Verdict::win(Seat::First)
            } else if second > first {
                Verdict::win(Seat::Second)
            } else {
                Verdict::draw()
            });
        }
        // Matched pair: same player continues.
        Ok(Verdict::next(TurnFlow::Same))
    }
}
