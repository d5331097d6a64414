//! Rock-paper-scissors kernel (toilet edition: poop, toilet paper, plunger).
//!
//! The one kernel where both players act in the same round: submissions are
//! independent and simultaneous, so the move pipeline waives the turn check
//! for this game type. A round resolves only once both choices are in.
//!
//! A tied round resets both choices so the players throw again; an RPS game
//! therefore never completes as a draw.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::{PerSeat, Seat};
use serde::{Deserialize, Serialize};

/// A round choice. The beats-relation is the fixed cycle
/// poop > toilet paper > plunger > poop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Poop,
    ToiletPaper,
    Plunger,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Poop, Choice::ToiletPaper, Choice::Plunger];

    /// Whether this choice beats `other`. For distinct choices exactly one
    /// direction holds; a choice never beats itself.
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Poop, Choice::ToiletPaper)
                | (Choice::ToiletPaper, Choice::Plunger)
                | (Choice::Plunger, Choice::Poop)
        )
    }
}

/// RPS round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RpsState {
    /// This round's submissions; `None` until the seat has thrown.
    pub choices: PerSeat<Option<Choice>>,
}

impl RpsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the acting seat's choice, resolving the round if both are in.
    pub fn apply(&mut self, seat: Seat, choice: Choice) -> Result<Verdict, RuleViolation> {
        if self.choices.get(seat).is_some() {
            return Err(RuleViolation::ChoiceAlreadyMade);
        }
        self.choices.set(seat, Some(choice));

        let (first, second) = match (self.choices.first, self.choices.second) {
            (Some(a), Some(b)) => (a, b),
            // Waiting on the other player.
            _ => return Ok(Verdict::next(TurnFlow::Same)),
        };

        if first == second {
            // Tied round: throw again.
            self.choices = PerSeat::splat(None);
            return Ok(Verdict::next(TurnFlow::Same));
        }

        let winner = if first.beats(second) {
            Seat::First
        } else {
            Seat::Second
        };
        Ok(Verdict::win(winner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::RoundOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn beats_relation_is_a_total_cycle() {
        for a in Choice::ALL {
            assert!(!a.beats(a));
            for b in Choice::ALL {
                if a != b {
                    assert_ne!(a.beats(b), b.beats(a), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn round_waits_for_both_choices() {
        let mut state = RpsState::new();
        let verdict = state.apply(Seat::First, Choice::Plunger).unwrap();
        assert_eq!(verdict.outcome, None);
        assert_eq!(
            state.apply(Seat::First, Choice::Poop),
            Err(RuleViolation::ChoiceAlreadyMade)
        );
    }

    #[test]
    fn decisive_round_names_the_winner() {
        let mut state = RpsState::new();
        state.apply(Seat::First, Choice::ToiletPaper).unwrap();
        let verdict = state.apply(Seat::Second, Choice::Plunger).unwrap();
        assert_eq!(verdict.outcome, Some(RoundOutcome::Win(Seat::First)));
    }

    #[test]
    fn tied_round_resets_for_a_rethrow() {
        let mut state = RpsState::new();
        state.apply(Seat::Second, Choice::Poop).unwrap();
        let verdict = state.apply(Seat::First, Choice::Poop).unwrap();
        assert_eq!(verdict.outcome, None);
        assert_eq!(state.choices, PerSeat::splat(None));
        // Both seats can throw again.
        state.apply(Seat::First, Choice::Plunger).unwrap();
        let verdict = state.apply(Seat::Second, Choice::ToiletPaper).unwrap();
        assert_eq!(verdict.outcome, Some(RoundOutcome::Win(Seat::Second)));
    }
}
