//! Wordle kernel: both players race to guess the same secret word.
//!
//! Feedback uses the standard two-pass scoring so duplicate letters are never
//! over-counted: pass 1 takes exact-position matches (greens) out of the
//! secret, pass 2 awards a yellow only while an unconsumed copy of the letter
//! remains.
//!
//! A correct guess wins immediately. If both players burn through all their
//! guesses, the game resolves by comparing final guesses: more greens, then
//! more yellows, then the earlier finish timestamp, then a draw.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::{PerSeat, Seat};
use serde::{Deserialize, Serialize};

/// Secret word length.
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed per player.
pub const MAX_GUESSES: usize = 6;

/// Per-guess feedback as index sets into the guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Feedback {
    /// Indices guessed in the exact position.
    pub greens: Vec<usize>,
    /// Indices whose letter occurs elsewhere in the green-reduced secret.
    pub yellows: Vec<usize>,
}

/// One recorded guess with its feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: String,
    pub feedback: Feedback,
}

/// Wordle game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleState {
    /// The shared secret, uppercase ASCII.
    pub word: String,
    /// Each seat's ordered guess history.
    pub guesses: PerSeat<Vec<GuessRecord>>,
    pub max_guesses: usize,
    /// Stamped when a seat guesses the word or uses its last guess.
    pub finish_times: PerSeat<Option<u64>>,
}

/// Score `guess` against `secret` with the two-pass algorithm.
///
/// Pass 1 marks greens and consumes those secret letters. Pass 2 walks the
/// remaining guess letters in order, consuming one unconsumed secret letter
/// per yellow, so greens + yellows for a letter never exceed its multiplicity
/// in the secret.
pub fn score_guess(guess: &str, secret: &str) -> Feedback {
    let guess: Vec<char> = guess.chars().collect();
    let mut remaining: Vec<Option<char>> = secret.chars().map(Some).collect();
    let mut feedback = Feedback::default();

    for (i, &letter) in guess.iter().enumerate() {
        if remaining[i] == Some(letter) {
            feedback.greens.push(i);
            remaining[i] = None;
        }
    }

    for (i, &letter) in guess.iter().enumerate() {
        if feedback.greens.contains(&i) {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(letter)) {
            feedback.yellows.push(i);
            *slot = None;
        }
    }

    feedback
}

impl WordleState {
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into().to_ascii_uppercase();
        debug_assert_eq!(word.chars().count(), WORD_LENGTH);
        Self {
            word,
            guesses: PerSeat::default(),
            max_guesses: MAX_GUESSES,
            finish_times: PerSeat::splat(None),
        }
    }

    /// Record a guess for the acting seat.
    pub fn apply(&mut self, seat: Seat, guess: &str, now_ms: u64) -> Result<Verdict, RuleViolation> {
        let guess = guess.trim().to_ascii_uppercase();
        if guess.chars().count() != WORD_LENGTH {
            return Err(RuleViolation::WrongGuessLength);
        }
        if self.guesses.get(seat).len() >= self.max_guesses {
            return Err(RuleViolation::OutOfGuesses);
        }

        let feedback = score_guess(&guess, &self.word);
        let correct = guess == self.word;
        self.guesses.get_mut(seat).push(GuessRecord { guess, feedback });

        let exhausted = self.guesses.get(seat).len() == self.max_guesses;
        if (correct || exhausted) && self.finish_times.get(seat).is_none() {
            self.finish_times.set(seat, Some(now_ms));
        }

        if correct {
            return Ok(Verdict::win(seat));
        }
        if self.out_of_guesses(seat) && self.out_of_guesses(seat.opponent()) {
            return Ok(self.resolve_exhausted());
        }

        // Skip an opponent who has no guesses left.
        let turn = if self.out_of_guesses(seat.opponent()) {
            TurnFlow::Same
        } else {
            TurnFlow::Opponent
        };
        Ok(Verdict::next(turn))
    }

    fn out_of_guesses(&self, seat: Seat) -> bool {
        self.guesses.get(seat).len() >= self.max_guesses
    }

    /// Tie-break once both seats have used every guess without a match:
    /// final-guess greens, then yellows, then earlier finish time.
    fn resolve_exhausted(&self) -> Verdict {
        let final_of = |seat: Seat| {
            self.guesses
                .get(seat)
                .last()
                .map(|record| {
                    (
                        record.feedback.greens.len(),
                        record.feedback.yellows.len(),
                    )
                })
                .unwrap_or((0, 0))
        };
        let (first_greens, first_yellows) = final_of(Seat::First);
        let (second_greens, second_yellows) = final_of(Seat::Second);

        if first_greens != second_greens {
            return Verdict::win(if first_greens > second_greens {
                Seat::First
            } else {
                Seat::Second
            });
        }
        if first_yellows != second_yellows {
            return Verdict::win(if first_yellows > second_yellows {
                Seat::First
            } else {
                Seat::Second
            });
        }
        match (self.finish_times.first, self.finish_times.second) {
            (Some(a), Some(b)) if a < b => Verdict::win(Seat::First),
            (Some(a), Some(b)) if b < a => Verdict::win(Seat::Second),
            _ => Verdict::draw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::RoundOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn scoring_marks_exact_matches_green() {
        let feedback = score_guess("RATER", "PAPER");
        assert_eq!(feedback.greens, vec![1, 3, 4]);
        // The leading R's only copy in the secret was consumed by the green
        // at index 4, so it earns no yellow.
        assert_eq!(feedback.yellows, Vec::<usize>::new());
    }

    #[test]
    fn scoring_never_double_counts_duplicates() {
        let feedback = score_guess("PAPER", "APPLE");
        assert_eq!(feedback.greens, vec![2]);
        // One P is green; only one P remains in the secret for a yellow.
        assert_eq!(feedback.yellows, vec![0, 1, 3]);
    }

    #[test]
    fn scoring_is_idempotent() {
        let first = score_guess("DRAIN", "FLUSH");
        let second = score_guess("DRAIN", "FLUSH");
        assert_eq!(first, second);
    }

    #[test]
    fn correct_guess_wins_immediately() {
        let mut state = WordleState::new("FLUSH");
        let verdict = state.apply(Seat::Second, "flush", 42).unwrap();
        assert_eq!(verdict.outcome, Some(RoundOutcome::Win(Seat::Second)));
        assert_eq!(state.finish_times.second, Some(42));
    }

    #[test]
    fn rejects_wrong_length_and_exhausted_seat() {
        let mut state = WordleState::new("FLUSH");
        assert_eq!(
            state.apply(Seat::First, "PIPE", 0),
            Err(RuleViolation::WrongGuessLength)
        );
        for i in 0..MAX_GUESSES {
            state.apply(Seat::First, "DRAIN", i as u64).unwrap();
        }
        assert_eq!(
            state.apply(Seat::First, "DRAIN", 99),
            Err(RuleViolation::OutOfGuesses)
        );
    }

    #[test]
    fn exhaustion_resolves_by_final_guess_greens() {
        let mut state = WordleState::new("FLUSH");
        let mut outcome = None;
        for i in 0..MAX_GUESSES {
            // First's final guess shares F-L-U-S with the secret.
            state.apply(Seat::First, "FLUSK", i as u64 * 2).unwrap();
            let verdict = state.apply(Seat::Second, "DRAIN", i as u64 * 2 + 1).unwrap();
            outcome = verdict.outcome;
        }
        assert_eq!(outcome, Some(RoundOutcome::Win(Seat::First)));
    }

    #[test]
    fn turn_stays_with_the_seat_still_guessing() {
        let mut state = WordleState::new("FLUSH");
        for i in 0..MAX_GUESSES {
            state.apply(Seat::First, "DRAIN", i as u64).unwrap();
        }
        // First is out of guesses; Second keeps the turn after each miss.
        let verdict = state.apply(Seat::Second, "SEWER", 50).unwrap();
        assert_eq!(verdict.outcome, None);
        assert_eq!(verdict.turn, TurnFlow::Same);
    }

    #[test]
    fn exhaustion_tie_breaks_on_finish_time() {
        let mut state = WordleState::new("FLUSH");
        let mut outcome = None;
        for i in 0..MAX_GUESSES {
            state.apply(Seat::First, "DRAIN", i as u64).unwrap();
            let verdict = state.apply(Seat::Second, "DRAIN", 100 + i as u64).unwrap();
            outcome = verdict.outcome;
        }
        // Identical feedback both sides; First finished earlier.
        assert_eq!(outcome, Some(RoundOutcome::Win(Seat::First)));
    }
}
