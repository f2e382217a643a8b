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

use std::{error::Error, fmt};

use crate::{
    color::Color,
    coordinate::Coordinate,
    grid::{BoardError, Grid},
    piece::{Piece, PieceId},
    position::Position,
    role::Role,
};

/// Maximum number of pieces per side in a setup.
pub const MAX_PIECES_PER_SIDE: usize = 16;

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A piece to be put on the board when a match starts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Placement {
    pub position: Position,
    pub color: Color,
    pub role: Role,
    /// Number of moves the piece is considered to have made. Pawns off
    /// their starting row and rooks or kings that may no longer castle
    /// should have a nonzero count.
    pub move_count: u32,
}

/// A not necessarily legal starting position for a
/// [`Match`](crate::Match).
///
/// Pieces are assigned ids in placement order.
///
/// # Examples
///
/// ```
/// use chessmatch::{Color, Coordinate, Match, Role, Setup};
///
/// let mut setup = Setup::empty();
/// setup
///     .put(Coordinate::new('E', 1)?, Color::White, Role::King)
///     .put(Coordinate::new('E', 8)?, Color::Black, Role::King)
///     .put(Coordinate::new('A', 7)?, Color::White, Role::Pawn);
///
/// let game = Match::from_setup(&setup)?;
/// assert_eq!(game.current_player(), Color::White);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Setup {
    pub placements: Vec<Placement>,
    /// Side to move.
    pub turn: Color,
}

impl Setup {
    /// No pieces, White to move.
    pub fn empty() -> Setup {
        Setup {
            placements: Vec::new(),
            turn: Color::White,
        }
    }

    /// The standard starting position, White pieces first.
    pub fn standard() -> Setup {
        let mut setup = Setup::empty();
        for color in [Color::White, Color::Black] {
            let (back, pawns) = color.fold((7, 6), (0, 1));
            for (column, role) in (0..).zip(BACK_RANK) {
                setup.put_position(Position::new(back, column), color, role, 0);
            }
            for column in 0..8 {
                setup.put_position(Position::new(pawns, column), color, Role::Pawn, 0);
            }
        }
        setup
    }

    /// Adds an unmoved piece.
    pub fn put(&mut self, coordinate: Coordinate, color: Color, role: Role) -> &mut Setup {
        self.put_moved(coordinate, color, role, 0)
    }

    /// Adds a piece with a move counter.
    pub fn put_moved(
        &mut self,
        coordinate: Coordinate,
        color: Color,
        role: Role,
        move_count: u32,
    ) -> &mut Setup {
        self.put_position(coordinate.to_position(), color, role, move_count)
    }

    /// Adds a piece by grid position.
    pub fn put_position(
        &mut self,
        position: Position,
        color: Color,
        role: Role,
        move_count: u32,
    ) -> &mut Setup {
        self.placements.push(Placement {
            position,
            color,
            role,
            move_count,
        });
        self
    }

    pub fn with_turn(&mut self, turn: Color) -> &mut Setup {
        self.turn = turn;
        self
    }

    /// Checks the piece counts that do not depend on placement on a board.
    pub(crate) fn validate_material(&self) -> Result<(), SetupError> {
        for color in Color::ALL {
            let pieces = self.placements.iter().filter(|p| p.color == color);
            if pieces.clone().count() > MAX_PIECES_PER_SIDE {
                return Err(SetupError::TooManyPieces { color });
            }
            match pieces.filter(|p| p.role == Role::King).count() {
                0 => return Err(SetupError::MissingKing { color }),
                1 => (),
                _ => return Err(SetupError::TooManyKings { color }),
            }
        }
        Ok(())
    }

    /// Places every piece on a fresh 8×8 grid, numbering them in
    /// placement order.
    pub(crate) fn to_grid(&self) -> Result<Grid, SetupError> {
        let mut grid = Grid::chessboard();
        for (i, placement) in self.placements.iter().enumerate() {
            let id = u8::try_from(i).map_err(|_| SetupError::TooManyPieces {
                color: placement.color,
            })?;
            let piece = Piece::new(PieceId(id), placement.color, placement.role)
                .with_move_count(placement.move_count);
            grid.place_piece(piece, placement.position)?;
        }
        Ok(grid)
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup::standard()
    }
}

/// Reasons for a [`Setup`] not being accepted by a match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetupError {
    /// A placement is not on the board.
    Board(BoardError),
    /// Two placements share a position.
    DuplicatePlacement {
        #[allow(missing_docs)]
        position: Position,
    },
    /// A side has no king.
    MissingKing {
        #[allow(missing_docs)]
        color: Color,
    },
    /// A side has more than one king.
    TooManyKings {
        #[allow(missing_docs)]
        color: Color,
    },
    /// A side has more than [`MAX_PIECES_PER_SIDE`] pieces.
    TooManyPieces {
        #[allow(missing_docs)]
        color: Color,
    },
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Board(err) => write!(f, "invalid setup: {err}"),
            SetupError::DuplicatePlacement { position } => {
                write!(f, "invalid setup: more than one piece on {position}")
            }
            SetupError::MissingKing { color } => write!(f, "invalid setup: {color} has no king"),
            SetupError::TooManyKings { color } => {
                write!(f, "invalid setup: {color} has more than one king")
            }
            SetupError::TooManyPieces { color } => write!(
                f,
                "invalid setup: {color} has more than {MAX_PIECES_PER_SIDE} pieces"
            ),
            SetupError::OppositeCheck => {
                f.write_str("invalid setup: the side not to move is in check")
            }
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SetupError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for SetupError {
    fn from(err: BoardError) -> SetupError {
        match err {
            BoardError::CellOccupied { position } => SetupError::DuplicatePlacement { position },
            err => SetupError::Board(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard() {
        let setup = Setup::standard();
        assert_eq!(setup.placements.len(), 32);
        assert_eq!(setup.turn, Color::White);
        assert_eq!(setup.validate_material(), Ok(()));

        let e1 = setup
            .placements
            .iter()
            .find(|p| p.position == Position::new(7, 4))
            .expect("white king");
        assert_eq!((e1.color, e1.role), (Color::White, Role::King));

        let d8 = setup
            .placements
            .iter()
            .find(|p| p.position == Position::new(0, 3))
            .expect("black queen");
        assert_eq!((d8.color, d8.role), (Color::Black, Role::Queen));

        assert!(setup
            .placements
            .iter()
            .filter(|p| p.position.row == 1)
            .all(|p| p.color == Color::Black && p.role == Role::Pawn));
    }

    #[test]
    fn test_to_grid() {
        let grid = Setup::standard().to_grid().expect("standard layout");
        assert_eq!(grid.pieces().count(), 32);

        let mut setup = Setup::standard();
        setup.put(Coordinate::new('E', 1).unwrap(), Color::White, Role::Queen);
        assert!(matches!(
            setup.to_grid(),
            Err(SetupError::Board(BoardError::CellOccupied { .. }))
        ));
    }

    #[test]
    fn test_kings() {
        let mut setup = Setup::empty();
        setup.put(Coordinate::new('E', 1).unwrap(), Color::White, Role::King);
        assert_eq!(
            setup.validate_material(),
            Err(SetupError::MissingKing {
                color: Color::Black
            })
        );
        setup.put(Coordinate::new('E', 8).unwrap(), Color::Black, Role::King);
        assert_eq!(setup.validate_material(), Ok(()));
        setup.put(Coordinate::new('D', 1).unwrap(), Color::White, Role::King);
        assert_eq!(
            setup.validate_material(),
            Err(SetupError::TooManyKings {
                color: Color::White
            })
        );
    }

    #[test]
    fn test_too_many_pieces() {
        let mut setup = Setup::standard();
        setup.put(Coordinate::new('E', 4).unwrap(), Color::Black, Role::Queen);
        assert_eq!(
            setup.validate_material(),
            Err(SetupError::TooManyPieces {
                color: Color::Black
            })
        );
    }
}
