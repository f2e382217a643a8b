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

//! Movement geometry of the individual piece types.
//!
//! All generators are pseudo-legal: they respect blocking and capture rules
//! but do not care whether the mover's own king ends up attacked.
//!
//! # Example
//!
//! ```
//! use chessmatch::{movegen::BoardView, Color, Grid, Piece, PieceId, Position, Role};
//!
//! let mut grid = Grid::new(8, 8)?;
//! grid.place_piece(Piece::new(PieceId(0), Color::White, Role::Bishop), Position::new(6, 2))?;
//! grid.place_piece(Piece::new(PieceId(1), Color::White, Role::Pawn), Position::new(5, 3))?;
//! grid.place_piece(Piece::new(PieceId(2), Color::Black, Role::Pawn), Position::new(5, 1))?;
//!
//! let bishop = grid.piece(Position::new(6, 2))?.copied().expect("bishop");
//! let moves = bishop.possible_moves(&BoardView::new(&grid));
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . 1 . P . . . .
//! // . . B . . . . .
//! // . 1 . 1 . . . .
//! assert!(moves.contains(Position::new(5, 1)));
//! assert!(!moves.contains(Position::new(5, 3)));
//! assert!(!moves.contains(Position::new(4, 0)));
//! assert_eq!(moves.count(), 3);
//! # Ok::<_, chessmatch::BoardError>(())
//! ```

use crate::{
    color::Color, grid::Grid, mask::Mask, piece::Piece, position::Position, role::Role,
};

pub(crate) const ROOK_DELTAS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
pub(crate) const BISHOP_DELTAS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];
pub(crate) const KING_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub(crate) const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Read-only view of the board handed to move generation.
///
/// Besides the grid this carries the en passant square: the square a pawn
/// passed over with its double step on the immediately preceding move.
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    pub grid: &'a Grid,
    pub en_passant: Option<Position>,
}

impl<'a> BoardView<'a> {
    pub fn new(grid: &'a Grid) -> BoardView<'a> {
        BoardView {
            grid,
            en_passant: None,
        }
    }

    #[must_use]
    pub fn with_en_passant(mut self, en_passant: Option<Position>) -> BoardView<'a> {
        self.en_passant = en_passant;
        self
    }
}

fn is_empty(grid: &Grid, position: Position) -> bool {
    grid.piece(position).map_or(false, |piece| piece.is_none())
}

/// Walks each ray until it leaves the grid or hits a piece. The blocking
/// square is included only if it holds an opponent piece.
pub(crate) fn slide_moves(
    grid: &Grid,
    from: Position,
    color: Color,
    deltas: &[(i32, i32)],
    moves: &mut Mask,
) {
    for &(drow, dcolumn) in deltas {
        let mut to = from.offset(drow, dcolumn);
        while is_empty(grid, to) {
            moves.set(to);
            to = to.offset(drow, dcolumn);
        }
        if grid.is_opponent_piece(to, color) {
            moves.set(to);
        }
    }
}

/// Single steps to squares that are on the grid and empty or held by an
/// opponent.
pub(crate) fn step_moves(
    grid: &Grid,
    from: Position,
    color: Color,
    deltas: &[(i32, i32)],
    moves: &mut Mask,
) {
    for &(drow, dcolumn) in deltas {
        let to = from.offset(drow, dcolumn);
        if is_empty(grid, to) || grid.is_opponent_piece(to, color) {
            moves.set(to);
        }
    }
}

pub(crate) fn pawn_moves(view: &BoardView<'_>, from: Position, pawn: &Piece, moves: &mut Mask) {
    let grid = view.grid;
    let color = pawn.color();
    let forward = color.forward();

    let single = from.offset(forward, 0);
    if is_empty(grid, single) {
        moves.set(single);

        let double = single.offset(forward, 0);
        if pawn.move_count() == 0 && is_empty(grid, double) {
            moves.set(double);
        }
    }

    for dcolumn in [-1, 1] {
        let to = from.offset(forward, dcolumn);
        if grid.is_opponent_piece(to, color) {
            moves.set(to);
        } else if view.en_passant == Some(to) {
            let beside = from.offset(0, dcolumn);
            let victim = grid.piece(beside).ok().flatten();
            if victim.map_or(false, |p| p.role() == Role::Pawn && p.color() != color) {
                moves.set(to);
            }
        }
    }
}

/// Tests if a piece is an unmoved rook of the given color.
fn is_castling_rook(piece: Option<&Piece>, color: Color) -> bool {
    piece.map_or(false, |p| {
        p.role() == Role::Rook && p.color() == color && p.move_count() == 0
    })
}

/// Marks the king's destination for each castling that is possible by
/// geometry alone: unmoved king, unmoved rook of the same color at the end
/// of the king's row, nothing in between. Attacks on the king's path are
/// checked when the move is played.
pub(crate) fn castling_moves(grid: &Grid, from: Position, king: &Piece, moves: &mut Mask) {
    if king.move_count() != 0 {
        return;
    }

    let last_column = grid.columns() as i32 - 1;
    for (direction, rook_column) in [(-1, 0), (1, last_column)] {
        if (rook_column - from.column).abs() < 3 {
            continue;
        }
        let rook = grid.piece(Position::new(from.row, rook_column)).ok().flatten();
        if !is_castling_rook(rook, king.color()) {
            continue;
        }
        let mut between = from.offset(0, direction);
        let mut clear = true;
        while between.column != rook_column {
            if !is_empty(grid, between) {
                clear = false;
                break;
            }
            between = between.offset(0, direction);
        }
        if clear {
            moves.set(from.offset(0, 2 * direction));
        }
    }
}

/// Position of the rook that castles together with a king moving from
/// `king_from` to `king_to`, and the square it lands on.
pub(crate) fn castling_rook(
    grid: &Grid,
    king_from: Position,
    king_to: Position,
) -> (Position, Position) {
    let direction = (king_to.column - king_from.column).signum();
    let rook_column = if direction < 0 { 0 } else { grid.columns() as i32 - 1 };
    (
        Position::new(king_from.row, rook_column),
        king_from.offset(0, direction),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceId;

    struct Builder {
        grid: Grid,
        next: u8,
    }

    impl Builder {
        fn new() -> Builder {
            Builder {
                grid: Grid::new(8, 8).unwrap(),
                next: 0,
            }
        }

        fn put(
            mut self,
            color: Color,
            role: Role,
            row: i32,
            column: i32,
            move_count: u32,
        ) -> Builder {
            let piece = Piece::new(PieceId(self.next), color, role).with_move_count(move_count);
            self.next += 1;
            self.grid.place_piece(piece, Position::new(row, column)).unwrap();
            self
        }

        fn moves_at(&self, row: i32, column: i32, en_passant: Option<Position>) -> Mask {
            let view = BoardView::new(&self.grid).with_en_passant(en_passant);
            let piece = self.grid.piece(Position::new(row, column)).unwrap().unwrap();
            piece.possible_moves(&view)
        }
    }

    fn positions(moves: &Mask) -> Vec<(i32, i32)> {
        moves.iter().map(|p| (p.row, p.column)).collect()
    }

    #[test]
    fn test_rook_rays_stop_at_first_piece() {
        let b = Builder::new()
            .put(Color::White, Role::Rook, 4, 4, 0)
            .put(Color::White, Role::Pawn, 2, 4, 1)
            .put(Color::Black, Role::Knight, 4, 6, 0)
            .put(Color::Black, Role::Pawn, 4, 7, 1);
        let moves = b.moves_at(4, 4, None);
        // Up: blocked by own pawn, which is excluded.
        assert!(moves.contains(Position::new(3, 4)));
        assert!(!moves.contains(Position::new(2, 4)));
        assert!(!moves.contains(Position::new(1, 4)));
        // Right: capture the knight, nothing beyond.
        assert!(moves.contains(Position::new(4, 5)));
        assert!(moves.contains(Position::new(4, 6)));
        assert!(!moves.contains(Position::new(4, 7)));
        // Down and left run to the edge.
        assert!(moves.contains(Position::new(7, 4)));
        assert!(moves.contains(Position::new(4, 0)));
        assert_eq!(moves.count(), 1 + 2 + 3 + 4);
    }

    #[test]
    fn test_bishop_and_queen() {
        let b = Builder::new()
            .put(Color::Black, Role::Bishop, 0, 0, 0)
            .put(Color::Black, Role::Queen, 7, 7, 0)
            .put(Color::White, Role::Knight, 3, 3, 0);
        assert_eq!(positions(&b.moves_at(0, 0, None)), vec![(1, 1), (2, 2), (3, 3)]);
        let queen = b.moves_at(7, 7, None);
        // Seven squares along the rank, seven along the file, and the
        // diagonal up to and including the knight.
        assert_eq!(queen.count(), 7 + 7 + 4);
        assert!(queen.contains(Position::new(3, 3)));
        assert!(!queen.contains(Position::new(2, 2)));
    }

    #[test]
    fn test_knight() {
        let b = Builder::new()
            .put(Color::White, Role::Knight, 7, 1, 0)
            .put(Color::White, Role::Pawn, 6, 3, 0)
            .put(Color::Black, Role::Pawn, 5, 0, 1);
        assert_eq!(positions(&b.moves_at(7, 1, None)), vec![(5, 0), (5, 2)]);

        let b = Builder::new().put(Color::Black, Role::Knight, 4, 4, 0);
        assert_eq!(b.moves_at(4, 4, None).count(), 8);
    }

    #[test]
    fn test_king_steps() {
        let b = Builder::new()
            .put(Color::White, Role::King, 7, 0, 1)
            .put(Color::White, Role::Pawn, 6, 0, 0)
            .put(Color::Black, Role::Pawn, 6, 1, 1);
        assert_eq!(positions(&b.moves_at(7, 0, None)), vec![(6, 1), (7, 1)]);
    }

    #[test]
    fn test_pawn_pushes() {
        let b = Builder::new()
            .put(Color::White, Role::Pawn, 6, 0, 0)
            .put(Color::White, Role::Pawn, 6, 1, 1)
            .put(Color::Black, Role::Pawn, 1, 2, 0)
            .put(Color::Black, Role::Rook, 3, 2, 0)
            .put(Color::White, Role::Pawn, 6, 3, 0)
            .put(Color::Black, Role::Bishop, 5, 3, 0);
        assert_eq!(positions(&b.moves_at(6, 0, None)), vec![(4, 0), (5, 0)]);
        assert_eq!(positions(&b.moves_at(6, 1, None)), vec![(5, 1)]);
        // The double step needs both squares empty.
        assert_eq!(positions(&b.moves_at(1, 2, None)), vec![(2, 2)]);
        // Blocked straight ahead, no diagonal victims.
        assert!(b.moves_at(6, 3, None).is_empty());
    }

    #[test]
    fn test_pawn_captures() {
        let b = Builder::new()
            .put(Color::Black, Role::Pawn, 3, 3, 1)
            .put(Color::White, Role::Knight, 4, 2, 0)
            .put(Color::Black, Role::Knight, 4, 4, 0)
            .put(Color::White, Role::Pawn, 4, 3, 1);
        assert_eq!(positions(&b.moves_at(3, 3, None)), vec![(4, 2)]);
    }

    #[test]
    fn test_en_passant() {
        let b = Builder::new()
            .put(Color::White, Role::Pawn, 3, 4, 2)
            .put(Color::Black, Role::Pawn, 3, 3, 1)
            .put(Color::Black, Role::Knight, 3, 5, 0);
        assert_eq!(positions(&b.moves_at(3, 4, None)), vec![(2, 4)]);
        assert_eq!(
            positions(&b.moves_at(3, 4, Some(Position::new(2, 3)))),
            vec![(2, 3), (2, 4)]
        );
        // Only pawns can be taken en passant.
        assert_eq!(
            positions(&b.moves_at(3, 4, Some(Position::new(2, 5)))),
            vec![(2, 4)]
        );
    }

    #[test]
    fn test_castling_geometry() {
        let b = Builder::new()
            .put(Color::White, Role::King, 7, 4, 0)
            .put(Color::White, Role::Rook, 7, 7, 0)
            .put(Color::White, Role::Rook, 7, 0, 0)
            .put(Color::White, Role::Knight, 7, 1, 0);
        let moves = b.moves_at(7, 4, None);
        assert!(moves.contains(Position::new(7, 6)));
        assert!(!moves.contains(Position::new(7, 2)));

        let b = Builder::new()
            .put(Color::White, Role::King, 7, 4, 0)
            .put(Color::White, Role::Rook, 7, 7, 1)
            .put(Color::White, Role::Rook, 7, 0, 0);
        let moves = b.moves_at(7, 4, None);
        assert!(!moves.contains(Position::new(7, 6)));
        assert!(moves.contains(Position::new(7, 2)));

        let b = Builder::new()
            .put(Color::Black, Role::King, 0, 4, 1)
            .put(Color::Black, Role::Rook, 0, 7, 0);
        assert!(!b.moves_at(0, 4, None).contains(Position::new(0, 6)));

        let b = Builder::new()
            .put(Color::Black, Role::King, 0, 4, 0)
            .put(Color::White, Role::Rook, 0, 7, 0);
        assert!(!b.moves_at(0, 4, None).contains(Position::new(0, 6)));
    }

    #[test]
    fn test_castling_rook() {
        let grid = Grid::new(8, 8).unwrap();
        assert_eq!(
            castling_rook(&grid, Position::new(7, 4), Position::new(7, 6)),
            (Position::new(7, 7), Position::new(7, 5))
        );
        assert_eq!(
            castling_rook(&grid, Position::new(0, 4), Position::new(0, 2)),
            (Position::new(0, 0), Position::new(0, 3))
        );
    }
}
