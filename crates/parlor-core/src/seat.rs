//! Seat identity for two-player games.
//!
//! Every game in Parlor has exactly two parties. The kernels never deal in
//! account-level player ids; they see only which *seat* is acting. The
//! [`Game`](crate::Game) document owns the mapping from seat to player id.

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
///
/// `First` is the fixed "first/white" party: the player listed first when the
/// game was created. Turn order, chess color, and tie-breaking all key off
/// this distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// Both seats, first party first.
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    /// The other seat.
    pub const fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Index into a two-element array (`First` = 0).
    pub const fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// A pair of values, one per seat.
///
/// Used for everything the document tracks per player: RPS choices, Wordle
/// guess histories, Hangman lives, chess clocks, Memory scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PerSeat<T> {
    pub first: T,
    pub second: T,
}

impl<T> PerSeat<T> {
    pub fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::First => &mut self.first,
            Seat::Second => &mut self.second,
        }
    }

    pub fn set(&mut self, seat: Seat, value: T) {
        *self.get_mut(seat) = value;
    }
}

impl<T: Clone> PerSeat<T> {
    /// Both seats initialized to the same value.
    pub fn splat(value: T) -> Self {
        Self {
            first: value.clone(),
            second: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        for seat in Seat::BOTH {
            assert_eq!(seat.opponent().opponent(), seat);
        }
    }

    #[test]
    fn per_seat_access() {
        let mut pair = PerSeat::new(1, 2);
        assert_eq!(*pair.get(Seat::First), 1);
        assert_eq!(*pair.get(Seat::Second), 2);
        pair.set(Seat::Second, 5);
        assert_eq!(pair.second, 5);
    }
}
