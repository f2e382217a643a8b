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

use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{coordinate::Coordinate, piece::Piece, position::Position, role::Role};

/// A move from one grid position to another.
///
/// # Display
///
/// `Move` is displayed as source and target coordinate, followed by the
/// promotion role, e.g. `E7E8Q`. Positions outside of chess notation are
/// displayed as `(row, column)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Role a pawn turns into when reaching the last row.
    pub promotion: Option<Role>,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[must_use]
    pub const fn with_promotion(self, promotion: Role) -> Move {
        Move {
            promotion: Some(promotion),
            ..self
        }
    }

    /// A move between two notation coordinates.
    pub fn from_coordinates(from: Coordinate, to: Coordinate) -> Move {
        Move::new(from.to_position(), to.to_position())
    }

    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

fn write_position(f: &mut fmt::Formatter<'_>, position: Position) -> fmt::Result {
    match Coordinate::from_position(position) {
        Ok(coordinate) => write!(f, "{coordinate}"),
        Err(_) => write!(f, "{position}"),
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_position(f, self.from)?;
        write_position(f, self.to)?;
        if let Some(role) = self.promotion {
            f.write_char(role.upper_char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space to hold the legal
/// moves of any position with at most 16 pieces per side.
pub type MoveList = ArrayVec<Move, 512>;

bitflags! {
    /// What happened when a move was played.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MoveFlags: u8 {
        /// A piece was captured, possibly en passant.
        const CAPTURE = 1;
        /// A pawn captured en passant.
        const EN_PASSANT = 1 << 1;
        /// The king castled and the rook jumped over it.
        const CASTLE = 1 << 2;
        /// A pawn reached the last row and was promoted.
        const PROMOTION = 1 << 3;
        /// A pawn advanced two rows.
        const DOUBLE_STEP = 1 << 4;
        /// The opponent king is attacked.
        const CHECK = 1 << 5;
        /// The opponent has no legal move out of check.
        const CHECKMATE = 1 << 6;
    }
}

/// Record of the most recently committed move.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Played {
    /// The moved piece as it stands after the move.
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
    pub flags: MoveFlags,
}

impl Played {
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_check(&self) -> bool {
        self.flags.contains(MoveFlags::CHECK)
    }

    pub fn is_checkmate(&self) -> bool {
        self.flags.contains(MoveFlags::CHECKMATE)
    }

    /// The move that was played, including the promotion role.
    pub fn to_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self
                .flags
                .contains(MoveFlags::PROMOTION)
                .then(|| self.piece.role()),
        }
    }
}
