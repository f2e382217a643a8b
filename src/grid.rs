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

//! Piece placement on a rectangular grid.
//!
//! # Examples
//!
//! ```
//! use chessmatch::{Color, Grid, Piece, PieceId, Position, Role};
//!
//! let mut grid = Grid::new(8, 8)?;
//! let knight = Piece::new(PieceId(0), Color::White, Role::Knight);
//! grid.place_piece(knight, Position::new(7, 1))?;
//!
//! assert!(grid.has_piece(Position::new(7, 1))?);
//! assert_eq!(grid.piece(Position::new(7, 1))?.map(|p| p.role()), Some(Role::Knight));
//! assert!(grid.piece(Position::new(8, 1)).is_err());
//! # Ok::<_, chessmatch::BoardError>(())
//! ```

use std::{
    error::Error,
    fmt::{self, Write as _},
};

use crate::{color::Color, piece::Piece, position::Position};

/// Error when accessing or constructing a [`Grid`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// There must be at least one row and one column.
    InvalidDimensions {
        #[allow(missing_docs)]
        rows: usize,
        #[allow(missing_docs)]
        columns: usize,
    },
    /// The position is not on the grid.
    OutOfBounds {
        #[allow(missing_docs)]
        position: Position,
    },
    /// A piece was placed on an occupied cell.
    CellOccupied {
        #[allow(missing_docs)]
        position: Position,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDimensions { rows, columns } => write!(
                f,
                "cannot create {rows}x{columns} board: there must be at least 1 row and 1 column"
            ),
            BoardError::OutOfBounds { position } => {
                write!(f, "position {position} is not on the board")
            }
            BoardError::CellOccupied { position } => {
                write!(f, "there is already a piece on position {position}")
            }
        }
    }
}

impl Error for BoardError {}

/// A fixed-size grid where each cell holds at most one [`Piece`].
///
/// The grid owns the pieces placed on it.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Piece>>,
}

impl Grid {
    /// An empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if either dimension is 0.
    pub fn new(rows: usize, columns: usize) -> Result<Grid, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        Ok(Grid {
            rows,
            columns,
            cells: vec![None; rows * columns],
        })
    }

    /// An empty 8×8 board.
    pub fn chessboard() -> Grid {
        Grid {
            rows: 8,
            columns: 8,
            cells: vec![None; 64],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Tests if the position is on the grid.
    pub fn position_exists(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.row).ok()?;
        let column = usize::try_from(position.column).ok()?;
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    fn checked_index(&self, position: Position) -> Result<usize, BoardError> {
        self.index(position)
            .ok_or(BoardError::OutOfBounds { position })
    }

    /// Gets the piece on a position, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is not on the grid.
    pub fn piece(&self, position: Position) -> Result<Option<&Piece>, BoardError> {
        let i = self.checked_index(position)?;
        Ok(self.cells[i].as_ref())
    }

    /// Tests if a position holds a piece.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is not on the grid.
    pub fn has_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece(position)?.is_some())
    }

    /// Tests if the position exists and holds a piece of the opponent of
    /// `color`.
    pub fn is_opponent_piece(&self, position: Position, color: Color) -> bool {
        self.index(position)
            .and_then(|i| self.cells[i].as_ref())
            .map_or(false, |piece| piece.color() != color)
    }

    /// Puts a piece on an empty cell and stamps its position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is not on the
    /// grid, or [`BoardError::CellOccupied`] if it already holds a piece.
    pub fn place_piece(&mut self, mut piece: Piece, position: Position) -> Result<(), BoardError> {
        let i = self.checked_index(position)?;
        if self.cells[i].is_some() {
            return Err(BoardError::CellOccupied { position });
        }
        piece.set_position(Some(position));
        self.cells[i] = Some(piece);
        Ok(())
    }

    /// Takes the piece from a cell, clearing its position. Removing from an
    /// empty cell returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is not on the grid.
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<Piece>, BoardError> {
        let i = self.checked_index(position)?;
        Ok(self.cells[i].take().map(|mut piece| {
            piece.set_position(None);
            piece
        }))
    }

    /// Iterates over all placed pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    /// Iterates over the pieces of one color in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color() == color)
    }

    /// Copies the cells into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Option<Piece>>> {
        self.cells.chunks(self.columns).map(<[Option<Piece>]>::to_vec).collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for (column, cell) in row.iter().enumerate() {
                f.write_char(cell.as_ref().map_or('.', Piece::char))?;
                f.write_char(if column + 1 < self.columns { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{piece::PieceId, role::Role};

    fn pawn(id: u8, color: Color) -> Piece {
        Piece::new(PieceId(id), color, Role::Pawn)
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 8),
            Err(BoardError::InvalidDimensions { rows: 0, columns: 8 })
        );
        assert!(Grid::new(8, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_place_and_remove() {
        let mut grid = Grid::new(8, 8).unwrap();
        let pos = Position::new(6, 0);
        grid.place_piece(pawn(0, Color::White), pos).unwrap();
        assert_eq!(grid.piece(pos).unwrap().and_then(Piece::position), Some(pos));

        assert_eq!(
            grid.place_piece(pawn(1, Color::Black), pos),
            Err(BoardError::CellOccupied { position: pos })
        );
        assert_eq!(grid.piece(pos).unwrap().map(Piece::id), Some(PieceId(0)));

        let removed = grid.remove_piece(pos).unwrap().expect("piece");
        assert_eq!(removed.id(), PieceId(0));
        assert_eq!(removed.position(), None);
        assert_eq!(grid.remove_piece(pos), Ok(None));
        assert!(!grid.has_piece(pos).unwrap());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(8, 8).unwrap();
        for position in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(8, 0),
            Position::new(0, 8),
        ] {
            assert!(!grid.position_exists(position));
            assert_eq!(grid.piece(position), Err(BoardError::OutOfBounds { position }));
            assert!(grid.has_piece(position).is_err());
            assert!(grid.remove_piece(position).is_err());
            assert!(grid.place_piece(pawn(0, Color::White), position).is_err());
            assert!(!grid.is_opponent_piece(position, Color::White));
        }
    }

    #[test]
    fn test_piece_and_has_piece_agree() {
        let mut grid = Grid::new(3, 5).unwrap();
        grid.place_piece(pawn(0, Color::White), Position::new(0, 4)).unwrap();
        grid.place_piece(pawn(1, Color::Black), Position::new(2, 1)).unwrap();
        for row in 0..3 {
            for column in 0..5 {
                let position = Position::new(row, column);
                assert_eq!(
                    grid.has_piece(position).unwrap(),
                    grid.piece(position).unwrap().is_some()
                );
            }
        }
        assert_eq!(grid.pieces().count(), 2);
        assert_eq!(grid.pieces_of(Color::Black).count(), 1);
        assert!(grid.is_opponent_piece(Position::new(2, 1), Color::White));
        assert!(!grid.is_opponent_piece(Position::new(2, 1), Color::Black));
        assert!(!grid.is_opponent_piece(Position::new(1, 1), Color::White));
    }

    #[test]
    fn test_debug() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.place_piece(Piece::new(PieceId(0), Color::White, Role::King), Position::new(1, 2))
            .unwrap();
        grid.place_piece(Piece::new(PieceId(1), Color::Black, Role::Rook), Position::new(0, 0))
            .unwrap();
        assert_eq!(format!("{grid:?}"), "r . .\n. . K\n");
    }
}
