// This file is part of the chessmatch library.
// Copyright (C) 2017-2025 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

use crate::{
    color::Color,
    mask::Mask,
    movegen::{self, BoardView},
    position::Position,
    role::Role,
};

/// Identifies a piece for the lifetime of a match, independent of where it
/// stands or whether it has been captured.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PieceId(pub u8);

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceId {}

/// A chess piece with [`Color`], [`Role`], the position it occupies and
/// the number of moves it has made.
///
/// The position is stamped by [`Grid::place_piece()`](crate::Grid::place_piece)
/// and cleared by [`Grid::remove_piece()`](crate::Grid::remove_piece).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    id: PieceId,
    color: Color,
    role: Role,
    position: Option<Position>,
    move_count: u32,
}

impl Piece {
    /// A new piece that has not moved and is not on any grid.
    pub const fn new(id: PieceId, color: Color, role: Role) -> Piece {
        Piece {
            id,
            color,
            role,
            position: None,
            move_count: 0,
        }
    }

    /// Sets the move counter, e.g. to mark a pawn as no longer eligible
    /// for its double step in a custom setup.
    #[must_use]
    pub fn with_move_count(mut self, move_count: u32) -> Piece {
        self.move_count = move_count;
        self
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    #[inline]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Gets the English letter, uppercase for White.
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    pub(crate) fn decrease_move_count(&mut self) {
        self.move_count -= 1;
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Squares this piece could occupy after one move, ignoring whether
    /// the move would leave its own king attacked.
    ///
    /// A piece that is not on the grid has no moves.
    pub fn possible_moves(&self, view: &BoardView<'_>) -> Mask {
        let grid = view.grid;
        let mut moves = Mask::new(grid.rows(), grid.columns());
        let Some(from) = self.position else {
            return moves;
        };

        match self.role {
            Role::Pawn => movegen::pawn_moves(view, from, self, &mut moves),
            Role::Knight => {
                movegen::step_moves(grid, from, self.color, &movegen::KNIGHT_DELTAS, &mut moves)
            }
            Role::Bishop => {
                movegen::slide_moves(grid, from, self.color, &movegen::BISHOP_DELTAS, &mut moves)
            }
            Role::Rook => {
                movegen::slide_moves(grid, from, self.color, &movegen::ROOK_DELTAS, &mut moves)
            }
            Role::Queen => {
                movegen::slide_moves(grid, from, self.color, &movegen::ROOK_DELTAS, &mut moves);
                movegen::slide_moves(grid, from, self.color, &movegen::BISHOP_DELTAS, &mut moves);
            }
            Role::King => {
                movegen::step_moves(grid, from, self.color, &movegen::KING_DELTAS, &mut moves);
                movegen::castling_moves(grid, from, self, &mut moves);
            }
        }

        moves
    }

    /// Tests if `target` is among the [possible moves](Piece::possible_moves).
    pub fn possible_move(&self, view: &BoardView<'_>, target: Position) -> bool {
        self.possible_moves(view).contains(target)
    }

    /// Tests if the piece has any [possible move](Piece::possible_moves).
    pub fn has_any_possible_move(&self, view: &BoardView<'_>) -> bool {
        self.possible_moves(view).any()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.role)
    }
}
