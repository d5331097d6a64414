//! Tic-tac-toe kernel.
//!
//! Nine cells, eight winning lines. The simplest of the kernels and the
//! reference for how the others are shaped: a state struct, an `apply` that
//! validates and mutates, and a terminal scan.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::Seat;
use serde::{Deserialize, Serialize};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TicTacToeState {
    /// Row-major cells; `None` is empty.
    pub board: [Option<Seat>; CELLS],
}

impl TicTacToeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the acting seat's marker at `cell`.
    pub fn apply(&mut self, seat: Seat, cell: usize) -> Result<Verdict, RuleViolation> {
        if cell >= CELLS {
            return Err(RuleViolation::OutOfRange);
        }
        if self.board[cell].is_some() {
            return Err(RuleViolation::CellOccupied);
        }

        self.board[cell] = Some(seat);

        if let Some(winner) = self.winner() {
            return Ok(Verdict::win(winner));
        }
        if self.is_full() {
            return Ok(Verdict::draw());
        }
        Ok(Verdict::next(TurnFlow::Opponent))
    }

    /// Scan the 8 lines for three equal non-empty markers.
    pub fn winner(&self) -> Option<Seat> {
        for line in WIN_LINES {
            if let Some(seat) = self.board[line[0]] {
                if self.board[line[1]] == Some(seat) && self.board[line[2]] == Some(seat) {
                    return Some(seat);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().all(|cell| cell.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::RoundOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_out_of_range_and_occupied() {
        let mut state = TicTacToeState::new();
        assert_eq!(
            state.apply(Seat::First, 9),
            Err(RuleViolation::OutOfRange)
        );
        state.apply(Seat::First, 4).unwrap();
        assert_eq!(
            state.apply(Seat::Second, 4),
            Err(RuleViolation::CellOccupied)
        );
    }

    #[test]
    fn detects_row_column_and_diagonal_wins() {
        for line in WIN_LINES {
            let mut state = TicTacToeState::new();
            for &cell in &line {
                state.board[cell] = Some(Seat::Second);
            }
            assert_eq!(state.winner(), Some(Seat::Second), "line {line:?}");
        }
    }

    #[test]
    fn no_winner_on_mixed_line() {
        let mut state = TicTacToeState::new();
        state.board[0] = Some(Seat::First);
        state.board[1] = Some(Seat::Second);
        state.board[2] = Some(Seat::First);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let mut state = TicTacToeState::new();
        // X O X / X O O / O X X - no monochromatic line
        let layout = [
            Seat::First,
            Seat::Second,
            Seat::First,
            Seat::First,
            Seat::Second,
            Seat::Second,
            Seat::Second,
            Seat::First,
            Seat::First,
        ];
        for (cell, seat) in layout.into_iter().enumerate().take(8) {
            state.board[cell] = Some(seat);
        }
        let verdict = state.apply(Seat::First, 8).unwrap();
        assert_eq!(verdict.outcome, Some(RoundOutcome::Draw));
    }
}
