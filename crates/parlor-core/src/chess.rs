//! Chess kernel.
//!
//! The board is a dense 8x8 array of optional pieces, indexed
//! `board[rank][file]` with rank 0 as the first party's back rank (the first
//! party plays the white pieces). Legality is computed in three layers:
//!
//! 1. pseudo-legal generation per piece (no en passant),
//! 2. castling from explicit per-seat rights flags updated with every move
//!    (the notation log is display-only history),
//! 3. a check filter that applies each candidate to a copied board and
//!    rejects it if the mover's own king is attacked afterwards.
//!
//! Checkmate is in-check plus an empty filtered move set over every piece of
//! that color; no legal move while not in check is stalemate, a draw. Pawns
//! reaching the last rank promote to queens.
//!
//! Moves are logged in long algebraic form (`e2-e4`, `O-O`, `O-O-O`) with a
//! `+`/`#` suffix for check and mate. Per-seat clocks count down a second at
//! a time via [`ChessState::tick`]; a flag fall is surfaced as a signal, not
//! a terminal transition.

use crate::error::RuleViolation;
use crate::moves::{TurnFlow, Verdict};
use crate::seat::{PerSeat, Seat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board edge length.
pub const BOARD_SIZE: u8 = 8;

/// Starting clock per player, in seconds.
pub const STARTING_CLOCK_SECS: u32 = 600;

/// Piece kind, color-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board. `Seat::First` plays white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Seat,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Seat) -> Self {
        Self { kind, color }
    }

    /// Letter code: uppercase for the first party, lowercase for the second.
    pub fn code(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.color {
            Seat::First => c,
            Seat::Second => c.to_ascii_lowercase(),
        }
    }
}

/// A board coordinate: file 0..8 (a..h), rank 0..8 (1..8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    pub const fn on_board(&self) -> bool {
        self.file < BOARD_SIZE && self.rank < BOARD_SIZE
    }

    /// Offset by (file, rank) deltas; `None` if it leaves the board.
    fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..BOARD_SIZE as i8).contains(&file) && (0..BOARD_SIZE as i8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

/// Dense board, `board[rank][file]`.
pub type Board = [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    King,
    Queen,
}

/// Explicit has-moved flags, updated transactionally with each applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CastlingRights {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

/// Chess game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessState {
    pub board: Board,
    /// Long algebraic move log, display-only.
    pub moves: Vec<String>,
    pub rights: PerSeat<CastlingRights>,
    /// Seconds left on each clock.
    pub time_remaining: PerSeat<u32>,
}

/// Back rank for a color (where its king starts).
const fn back_rank(color: Seat) -> u8 {
    match color {
        Seat::First => 0,
        Seat::Second => 7,
    }
}

/// Pawn push direction for a color.
const fn pawn_dir(color: Seat) -> i8 {
    match color {
        Seat::First => 1,
        Seat::Second => -1,
    }
}

fn piece_at(board: &Board, sq: Square) -> Option<Piece> {
    board[sq.rank as usize][sq.file as usize]
}

fn set_piece(board: &mut Board, sq: Square, piece: Option<Piece>) {
    board[sq.rank as usize][sq.file as usize] = piece;
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Walk rays from `from`, stopping at the first occupied square (inclusive
/// if it holds an opponent piece).
fn ray_moves(board: &Board, from: Square, color: Seat, rays: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in rays {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match piece_at(board, next) {
                None => out.push(next),
                Some(piece) => {
                    if piece.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Pseudo-legal destinations for the piece on `from`: movement rules only,
/// before any check filtering. Castling is handled separately.
pub fn pseudo_moves(board: &Board, from: Square) -> Vec<Square> {
    let piece = match piece_at(board, from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let mut out = Vec::new();

    match piece.kind {
        PieceKind::Pawn => {
            let dir = pawn_dir(piece.color);
            if let Some(one) = from.offset(0, dir) {
                if piece_at(board, one).is_none() {
                    out.push(one);
                    let start_rank = match piece.color {
                        Seat::First => 1,
                        Seat::Second => 6,
                    };
                    if from.rank == start_rank {
                        if let Some(two) = from.offset(0, dir * 2) {
                            if piece_at(board, two).is_none() {
                                out.push(two);
                            }
                        }
                    }
                }
            }
            for df in [-1, 1] {
                if let Some(diag) = from.offset(df, dir) {
                    if matches!(piece_at(board, diag), Some(p) if p.color != piece.color) {
                        out.push(diag);
                    }
                }
            }
        }
        PieceKind::Knight => {
            for (df, dr) in KNIGHT_OFFSETS {
                if let Some(to) = from.offset(df, dr) {
                    if !matches!(piece_at(board, to), Some(p) if p.color == piece.color) {
                        out.push(to);
                    }
                }
            }
        }
        PieceKind::Bishop => ray_moves(board, from, piece.color, &BISHOP_RAYS, &mut out),
        PieceKind::Rook => ray_moves(board, from, piece.color, &ROOK_RAYS, &mut out),
        PieceKind::Queen => {
            ray_moves(board, from, piece.color, &BISHOP_RAYS, &mut out);
            ray_moves(board, from, piece.color, &ROOK_RAYS, &mut out);
        }
        PieceKind::King => {
            for (df, dr) in KING_OFFSETS {
                if let Some(to) = from.offset(df, dr) {
                    if !matches!(piece_at(board, to), Some(p) if p.color == piece.color) {
                        out.push(to);
                    }
                }
            }
        }
    }

    out
}

/// Squares attacked by the piece on `from`. Same as pseudo-legal moves
/// except pawns: diagonals attack regardless of occupancy and pushes attack
/// nothing.
fn attacks_from(board: &Board, from: Square) -> Vec<Square> {
    let piece = match piece_at(board, from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    if piece.kind == PieceKind::Pawn {
        let dir = pawn_dir(piece.color);
        return [-1, 1]
            .iter()
            .filter_map(|&df| from.offset(df, dir))
            .collect();
    }
    pseudo_moves(board, from)
}

/// Whether `square` is attacked by any piece of `by`.
pub fn is_attacked(board: &Board, square: Square, by: Seat) -> bool {
    for rank in 0..BOARD_SIZE {
        for file in 0..BOARD_SIZE {
            let from = Square::new(file, rank);
            if matches!(piece_at(board, from), Some(p) if p.color == by)
                && attacks_from(board, from).contains(&square)
            {
                return true;
            }
        }
    }
    false
}

/// Locate a color's king.
pub fn king_square(board: &Board, color: Seat) -> Option<Square> {
    for rank in 0..BOARD_SIZE {
        for file in 0..BOARD_SIZE {
            let sq = Square::new(file, rank);
            if piece_at(board, sq) == Some(Piece::new(PieceKind::King, color)) {
                return Some(sq);
            }
        }
    }
    None
}

/// Whether `color`'s king is currently attacked.
pub fn is_in_check(board: &Board, color: Seat) -> bool {
    match king_square(board, color) {
        Some(king) => is_attacked(board, king, color.opponent()),
        None => false,
    }
}

/// Apply `from -> to` to a copy of the board: relocates the piece, moves the
/// rook on a castle (king travelling two files), and promotes a pawn
/// reaching the last rank to a queen.
fn apply_to_board(board: &Board, from: Square, to: Square) -> Board {
    let mut next = *board;
    let mut piece = match piece_at(&next, from) {
        Some(p) => p,
        None => return next,
    };

    if piece.kind == PieceKind::King && from.file.abs_diff(to.file) == 2 {
        let rank = from.rank;
        let (rook_from, rook_to) = if to.file > from.file {
            (Square::new(7, rank), Square::new(5, rank))
        } else {
            (Square::new(0, rank), Square::new(3, rank))
        };
        let rook = piece_at(&next, rook_from);
        set_piece(&mut next, rook_from, None);
        set_piece(&mut next, rook_to, rook);
    }

    if piece.kind == PieceKind::Pawn && to.rank == back_rank(piece.color.opponent()) {
        piece.kind = PieceKind::Queen;
    }

    set_piece(&mut next, from, None);
    set_piece(&mut next, to, Some(piece));
    next
}

impl ChessState {
    pub fn new() -> Self {
        Self {
            board: initial_board(),
            moves: Vec::new(),
            rights: PerSeat::default(),
            time_remaining: PerSeat::splat(STARTING_CLOCK_SECS),
        }
    }

    /// Castling eligibility for one side: rights intact, rook in place,
    /// squares between empty, king neither in check nor crossing an
    /// attacked square. The destination square is covered by the check
    /// filter after application.
    fn can_castle(&self, color: Seat, side: CastleSide) -> bool {
        let rights = self.rights.get(color);
        let rank = back_rank(color);

        let (rook_moved, rook_file, between, transit) = match side {
            CastleSide::King => (rights.kingside_rook_moved, 7, vec![5, 6], 5),
            CastleSide::Queen => (rights.queenside_rook_moved, 0, vec![1, 2, 3], 3),
        };
        if rights.king_moved || rook_moved {
            return false;
        }
        if piece_at(&self.board, Square::new(rook_file, rank))
            != Some(Piece::new(PieceKind::Rook, color))
        {
            return false;
        }
        if between
            .iter()
            .any(|&file| piece_at(&self.board, Square::new(file, rank)).is_some())
        {
            return false;
        }
        if is_in_check(&self.board, color) {
            return false;
        }
        !is_attacked(&self.board, Square::new(transit, rank), color.opponent())
    }

    /// Fully legal destinations for the piece on `from`: pseudo-legal moves
    /// plus eligible castles, filtered so the mover's king is never left in
    /// check.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Square> {
        let piece = match piece_at(&self.board, from) {
            Some(p) => p,
            None => return Vec::new(),
        };

        let mut candidates = pseudo_moves(&self.board, from);

        if piece.kind == PieceKind::King && from == king_start(piece.color) {
            let rank = back_rank(piece.color);
            if self.can_castle(piece.color, CastleSide::King) {
                candidates.push(Square::new(6, rank));
            }
            if self.can_castle(piece.color, CastleSide::Queen) {
                candidates.push(Square::new(2, rank));
            }
        }

        candidates
            .into_iter()
            .filter(|&to| {
                let next = apply_to_board(&self.board, from, to);
                !is_in_check(&next, piece.color)
            })
            .collect()
    }

    /// Whether `color` has any legal move at all.
    pub fn has_any_legal_move(&self, color: Seat) -> bool {
        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let from = Square::new(file, rank);
                if matches!(piece_at(&self.board, from), Some(p) if p.color == color)
                    && !self.legal_moves_from(from).is_empty()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Validate and apply `from -> to` for the acting seat.
    pub fn apply(&mut self, seat: Seat, from: Square, to: Square) -> Result<Verdict, RuleViolation> {
        if !from.on_board() || !to.on_board() {
            return Err(RuleViolation::OutOfRange);
        }
        let piece = piece_at(&self.board, from).ok_or(RuleViolation::EmptySquare)?;
        if piece.color != seat {
            return Err(RuleViolation::NotYourPiece);
        }

        let is_castle = piece.kind == PieceKind::King
            && from == king_start(seat)
            && from.file.abs_diff(to.file) == 2
            && from.rank == to.rank;

        if !self.legal_moves_from(from).contains(&to) {
            if is_castle {
                return Err(RuleViolation::CastlingUnavailable);
            }
            if pseudo_moves(&self.board, from).contains(&to) {
                return Err(RuleViolation::KingLeftInCheck);
            }
            return Err(RuleViolation::UnreachableSquare);
        }

        self.board = apply_to_board(&self.board, from, to);
        self.update_rights(seat, piece, from, to);

        let opponent = seat.opponent();
        let in_check = is_in_check(&self.board, opponent);
        let has_reply = self.has_any_legal_move(opponent);

        let mut notation = if is_castle {
            if to.file == 6 { "O-O".to_string() } else { "O-O-O".to_string() }
        } else {
            format!("{from}-{to}")
        };
        if in_check {
            notation.push(if has_reply { '+' } else { '#' });
        }
        self.moves.push(notation);

        if !has_reply {
            if in_check {
                return Ok(Verdict::win(seat));
            }
            // Stalemate.
            return Ok(Verdict::draw());
        }
        Ok(Verdict::next(TurnFlow::Opponent))
    }

    /// Keep the has-moved flags in step with the applied move. A rook is
    /// also considered gone from its corner when captured there.
    fn update_rights(&mut self, seat: Seat, piece: Piece, from: Square, to: Square) {
        let rights = self.rights.get_mut(seat);
        match piece.kind {
            PieceKind::King => rights.king_moved = true,
            PieceKind::Rook => {
                let rank = back_rank(seat);
                if from == Square::new(0, rank) {
                    rights.queenside_rook_moved = true;
                } else if from == Square::new(7, rank) {
                    rights.kingside_rook_moved = true;
                }
            }
            _ => {}
        }

        let opponent = seat.opponent();
        let opp_rank = back_rank(opponent);
        let opp_rights = self.rights.get_mut(opponent);
        if to == Square::new(0, opp_rank) {
            opp_rights.queenside_rook_moved = true;
        } else if to == Square::new(7, opp_rank) {
            opp_rights.kingside_rook_moved = true;
        }
    }

    /// Tick one second off `seat`'s clock. Returns `true` on flag fall (the
    /// clock just reached zero). Flag fall does not end the game here; the
    /// coordination layer decides how to surface it.
    pub fn tick(&mut self, seat: Seat) -> bool {
        let clock = self.time_remaining.get_mut(seat);
        if *clock == 0 {
            return false;
        }
        *clock -= 1;
        *clock == 0
    }
}

impl Default for ChessState {
    fn default() -> Self {
        Self::new()
    }
}

/// The king's starting square for a color.
const fn king_start(color: Seat) -> Square {
    Square::new(4, back_rank(color))
}

/// Standard starting position.
pub fn initial_board() -> Board {
    use PieceKind::*;
    let mut board: Board = [[None; 8]; 8];
    let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

    for (file, &kind) in back.iter().enumerate() {
        board[0][file] = Some(Piece::new(kind, Seat::First));
        board[7][file] = Some(Piece::new(kind, Seat::Second));
    }
    for file in 0..8 {
        board[1][file] = Some(Piece::new(Pawn, Seat::First));
        board[6][file] = Some(Piece::new(Pawn, Seat::Second));
    }
    board
}

/// Parse `"e4"`-style coordinates, mainly for tests and display tooling.
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let file = (file as u8).checked_sub(b'a')?;
    let rank = (rank as u8).checked_sub(b'1')?;
    let sq = Square::new(file, rank);
    sq.on_board().then_some(sq)
}
