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

/// A zero-based `(row, column)` index into a [`Grid`](crate::Grid).
///
/// Row 0 is the top of the board as seen by White, i.e. the eighth rank.
/// Coordinates are signed so that walking off the board produces a value
/// that [`Grid::position_exists()`](crate::Grid::position_exists) rejects,
/// instead of wrapping around.
///
/// # Examples
///
/// ```
/// use chessmatch::Position;
///
/// let pos = Position::new(6, 4);
/// assert_eq!(pos.offset(-2, 0), Position::new(4, 4));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, column: i32) -> Position {
        Position { row, column }
    }

    /// Shifts the position by the given deltas. The result is not
    /// necessarily on the board.
    #[inline]
    #[must_use]
    pub const fn offset(self, drow: i32, dcolumn: i32) -> Position {
        Position {
            row: self.row + drow,
            column: self.column + dcolumn,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
