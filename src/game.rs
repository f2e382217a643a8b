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

//! A chess match between two players.
//!
//! Moves are validated against the pseudo-legal move sets of the pieces,
//! then executed speculatively. A move that leaves the mover's own king
//! attacked is rolled back and rejected.
//!
//! # Examples
//!
//! ```
//! use chessmatch::{Color, Coordinate, Match, MoveError};
//!
//! let mut game = Match::new();
//!
//! let e2 = Coordinate::new('E', 2)?;
//! let e4 = Coordinate::new('E', 4)?;
//! assert_eq!(game.perform_move(e2, e4)?, None);
//! assert_eq!(game.turn(), 2);
//! assert_eq!(game.current_player(), Color::Black);
//!
//! // It is not White's turn.
//! let d2 = Coordinate::new('D', 2)?;
//! let d4 = Coordinate::new('D', 4)?;
//! assert_eq!(game.perform_move(d2, d4), Err(MoveError::WrongOwner));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt};

use tracing::{debug, error, info, trace};

use crate::{
    color::Color,
    coordinate::Coordinate,
    grid::{BoardError, Grid},
    m::{Move, MoveFlags, MoveList, Played},
    mask::Mask,
    movegen::{self, BoardView},
    piece::Piece,
    position::Position,
    role::Role,
    setup::{Setup, SetupError},
};

/// Error when a move cannot be performed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// The match has ended in checkmate.
    MatchOver,
    /// There is no piece on the source position.
    NoPieceAtSource,
    /// The piece on the source position belongs to the other player.
    WrongOwner,
    /// The piece on the source position cannot move at all.
    NoLegalMoves,
    /// The piece cannot reach the target position.
    IllegalTarget,
    /// The move would leave the own king attacked, or the king would
    /// castle out of or through check.
    SelfCheck,
    /// Pawns can only be promoted to knight, bishop, rook or queen.
    InvalidPromotion {
        #[allow(missing_docs)]
        role: Role,
    },
    /// Grid access failed during execution.
    Board(BoardError),
    /// A side has lost its king.
    MissingKing {
        #[allow(missing_docs)]
        color: Color,
    },
}

impl MoveError {
    /// Errors that signal a broken match state rather than a rejected
    /// move.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            MoveError::MissingKing { .. }
                | MoveError::Board(BoardError::CellOccupied { .. })
                | MoveError::Board(BoardError::InvalidDimensions { .. })
        )
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::MatchOver => f.write_str("the match is over"),
            MoveError::NoPieceAtSource => f.write_str("there is no piece on the source position"),
            MoveError::WrongOwner => f.write_str("the chosen piece is not yours"),
            MoveError::NoLegalMoves => {
                f.write_str("there are no possible moves for the chosen piece")
            }
            MoveError::IllegalTarget => {
                f.write_str("the chosen piece cannot move to the target position")
            }
            MoveError::SelfCheck => f.write_str("you cannot put yourself in check"),
            MoveError::InvalidPromotion { role } => write!(f, "cannot promote to {role}"),
            MoveError::Board(err) => write!(f, "board error: {err}"),
            MoveError::MissingKing { color } => write!(f, "there is no {color} king on the board"),
        }
    }
}

impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> MoveError {
        MoveError::Board(err)
    }
}

/// Everything needed to take back one executed move.
#[derive(Debug)]
struct Undo {
    from: Position,
    to: Position,
    captured: Option<Piece>,
    captured_at: Position,
    castle: Option<(Position, Position)>,
    promoted: bool,
}

impl Undo {
    fn flags(&self) -> MoveFlags {
        let mut flags = MoveFlags::empty();
        flags.set(MoveFlags::CAPTURE, self.captured.is_some());
        flags.set(MoveFlags::EN_PASSANT, self.captured_at != self.to);
        flags.set(MoveFlags::CASTLE, self.castle.is_some());
        flags.set(MoveFlags::PROMOTION, self.promoted);
        flags
    }
}

/// A chess match on an 8×8 grid.
///
/// White moves first. The match ends when a player is checkmated; after
/// that every move fails with [`MoveError::MatchOver`].
#[derive(Clone, Debug)]
pub struct Match {
    grid: Grid,
    turn: u32,
    current_player: Color,
    check: bool,
    checkmate: bool,
    captured: Vec<Piece>,
    en_passant: Option<Position>,
    promoted: Option<Position>,
    last_move: Option<Played>,
}

impl Default for Match {
    fn default() -> Match {
        Match::new()
    }
}

impl Match {
    /// A match in the standard starting position.
    pub fn new() -> Match {
        let grid = Setup::standard().to_grid();
        debug_assert!(grid.is_ok(), "standard layout does not fit the board");
        Match::with_grid(grid.unwrap_or_else(|_| Grid::chessboard()), Color::White)
    }

    /// Starts a match from a custom position.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if a placement is off the board or
    /// duplicated, a side does not have exactly one king or more than
    /// 16 pieces, or the side not to move is in check.
    pub fn from_setup(setup: &Setup) -> Result<Match, SetupError> {
        setup.validate_material()?;

        let mut game = Match::with_grid(setup.to_grid()?, setup.turn);
        if game.is_attacked(!setup.turn).map_err(|_| SetupError::OppositeCheck)? {
            return Err(SetupError::OppositeCheck);
        }
        game.check = game
            .is_attacked(setup.turn)
            .map_err(|_| SetupError::MissingKing { color: setup.turn })?;
        if game.check {
            game.checkmate = game
                .test_checkmate(setup.turn)
                .map_err(|_| SetupError::MissingKing { color: setup.turn })?;
        }
        debug!(turn = %setup.turn, check = game.check, "match set up");
        Ok(game)
    }

    fn with_grid(grid: Grid, current_player: Color) -> Match {
        Match {
            grid,
            turn: 1,
            current_player,
            check: false,
            checkmate: false,
            captured: Vec::new(),
            en_passant: None,
            promoted: None,
            last_move: None,
        }
    }

    /// Turn number, starting at 1 and increased after every committed move
    /// that does not end the match.
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Whether the last committed move attacked the opponent king.
    #[inline]
    pub fn check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Copies the board into nested rows, rank 8 first.
    pub fn pieces(&self) -> Vec<Vec<Option<Piece>>> {
        self.grid.to_rows()
    }

    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.grid.piece(coordinate.to_position()).ok().flatten().copied()
    }

    /// Pieces of one color still on the board.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.pieces_of(color)
    }

    /// All captured pieces in the order they were taken.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Pieces captured by `color`.
    pub fn captured_by(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.captured.iter().filter(move |piece| piece.color() != color)
    }

    /// The square a pawn passed over with a double step on the last move.
    /// An opponent pawn may capture onto it on the very next move only.
    pub fn en_passant_vulnerable(&self) -> Option<Coordinate> {
        self.en_passant.and_then(|pos| Coordinate::from_position(pos).ok())
    }

    /// Position of the pawn promoted by the last move.
    pub fn promoted(&self) -> Option<Coordinate> {
        self.promoted.and_then(|pos| Coordinate::from_position(pos).ok())
    }

    pub fn last_move(&self) -> Option<&Played> {
        self.last_move.as_ref()
    }

    fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.grid).with_en_passant(self.en_passant)
    }

    /// The pseudo-legal moves of the piece on `source`, whichever side it
    /// belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoPieceAtSource`] if the square is empty.
    pub fn possible_moves(&self, source: Coordinate) -> Result<Mask, MoveError> {
        let piece = self
            .grid
            .piece(source.to_position())?
            .ok_or(MoveError::NoPieceAtSource)?;
        Ok(piece.possible_moves(&self.view()))
    }

    /// Moves the piece on `source` to `target`, promoting to a queen if a
    /// pawn reaches the last row. Returns the captured piece, if any.
    ///
    /// # Errors
    ///
    /// Fails without changing the match if it is over, the source does not
    /// hold a movable piece of the current player, the target is not
    /// reachable, or the move would leave the own king attacked.
    ///
    /// If the opponent has no king, which only a hand-built grid can cause,
    /// the move is still committed and the opponent counts as not in check.
    pub fn perform_move(
        &mut self,
        source: Coordinate,
        target: Coordinate,
    ) -> Result<Option<Piece>, MoveError> {
        self.play(&Move::from_coordinates(source, target))
    }

    /// Like [`Match::perform_move()`], promoting to `role`.
    ///
    /// # Errors
    ///
    /// Additionally fails with [`MoveError::InvalidPromotion`] if `role` is
    /// a pawn or king.
    pub fn perform_move_with_promotion(
        &mut self,
        source: Coordinate,
        target: Coordinate,
        role: Role,
    ) -> Result<Option<Piece>, MoveError> {
        self.play(&Move::from_coordinates(source, target).with_promotion(role))
    }

    /// Plays a move given by grid positions.
    ///
    /// # Errors
    ///
    /// See [`Match::perform_move()`].
    pub fn play(&mut self, m: &Move) -> Result<Option<Piece>, MoveError> {
        let _span = tracing::debug_span!("play", %m, turn = self.turn).entered();
        let result = self.try_play(m);
        match &result {
            Ok(_) => (),
            Err(err) if err.is_internal() => error!(%err, "match state is broken"),
            Err(err) => debug!(%err, "move rejected"),
        }
        result
    }

    fn try_play(&mut self, m: &Move) -> Result<Option<Piece>, MoveError> {
        if self.checkmate {
            return Err(MoveError::MatchOver);
        }
        if let Some(role) = m.promotion {
            if !role.is_promotion_target() {
                return Err(MoveError::InvalidPromotion { role });
            }
        }

        let piece = *self.grid.piece(m.from)?.ok_or(MoveError::NoPieceAtSource)?;
        if piece.color() != self.current_player {
            return Err(MoveError::WrongOwner);
        }
        let view = self.view();
        let moves = piece.possible_moves(&view);
        if !moves.any() {
            return Err(MoveError::NoLegalMoves);
        }
        if !moves.contains(m.to) {
            return Err(MoveError::IllegalTarget);
        }

        let undo = self.try_move(m.from, m.to, m.promotion)?;
        Ok(self.commit(piece, undo))
    }

    /// Finishes a move that passed the self-check test: records special
    /// move state, detects check and checkmate, and hands over the turn.
    ///
    /// The move is already on the board, so a failed check or checkmate
    /// test is logged at `error` level and counts as no check and no mate.
    fn commit(&mut self, piece: Piece, undo: Undo) -> Option<Piece> {
        let mover = piece.color();
        let double_step = piece.role() == Role::Pawn && (undo.to.row - undo.from.row).abs() == 2;
        self.en_passant = double_step.then(|| undo.from.offset(mover.forward(), 0));
        self.promoted = undo.promoted.then_some(undo.to);

        let mut flags = undo.flags();
        flags.set(MoveFlags::DOUBLE_STEP, double_step);

        self.check = self.is_attacked(!mover).unwrap_or_else(|err| {
            error!(%err, "cannot test for check");
            false
        });
        if self.check {
            flags |= MoveFlags::CHECK;
            self.checkmate = self.test_checkmate(!mover).unwrap_or_else(|err| {
                error!(%err, "cannot test for checkmate");
                false
            });
        }

        if self.checkmate {
            flags |= MoveFlags::CHECKMATE;
            info!(winner = %mover, turn = self.turn, "checkmate");
        } else {
            if self.check {
                info!(king = %mover.opponent(), turn = self.turn, "check");
            }
            self.turn += 1;
            self.current_player = !self.current_player;
        }

        let moved = self.grid.piece(undo.to).ok().flatten().copied().unwrap_or(piece);
        self.last_move = Some(Played {
            piece: moved,
            from: undo.from,
            to: undo.to,
            captured: undo.captured,
            flags,
        });
        debug!(from = %undo.from, to = %undo.to, ?flags, "move committed");
        undo.captured
    }

    /// Executes a pseudo-legal move and keeps it if the mover's king is
    /// safe. Otherwise the board is restored and the move rejected.
    fn try_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<Role>,
    ) -> Result<Undo, MoveError> {
        let piece = *self.grid.piece(from)?.ok_or(MoveError::NoPieceAtSource)?;
        let color = piece.color();

        if piece.role() == Role::King && (to.column - from.column).abs() == 2 {
            if self.is_attacked(color)? {
                return Err(MoveError::SelfCheck);
            }
            let passed = from.offset(0, (to.column - from.column).signum());
            let undo = self.make_move(from, passed, None)?;
            let attacked = self.is_attacked(color);
            self.undo_move(undo)?;
            if attacked? {
                return Err(MoveError::SelfCheck);
            }
        }

        let undo = self.make_move(from, to, promotion)?;
        match self.is_attacked(color) {
            Ok(false) => Ok(undo),
            Ok(true) => {
                self.undo_move(undo)?;
                Err(MoveError::SelfCheck)
            }
            Err(err) => {
                self.undo_move(undo)?;
                Err(err)
            }
        }
    }

    /// Tests a pseudo-legal move without changing the match.
    fn is_safe(&mut self, from: Position, to: Position) -> Result<bool, MoveError> {
        match self.try_move(from, to, None) {
            Ok(undo) => {
                self.undo_move(undo)?;
                Ok(true)
            }
            Err(MoveError::SelfCheck) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn make_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<Role>,
    ) -> Result<Undo, MoveError> {
        let mut piece = self
            .grid
            .remove_piece(from)?
            .ok_or(MoveError::NoPieceAtSource)?;
        piece.increase_move_count();

        let mut captured_at = to;
        if piece.role() == Role::Pawn
            && from.column != to.column
            && !self.grid.has_piece(to)?
        {
            captured_at = Position::new(from.row, to.column);
        }
        let captured = self.grid.remove_piece(captured_at)?;

        let promoted = piece.role() == Role::Pawn && to.row == self.last_row(piece.color());
        if promoted {
            piece.set_role(promotion.unwrap_or(Role::Queen));
        }
        self.grid.place_piece(piece, to)?;

        let mut castle = None;
        if piece.role() == Role::King && (to.column - from.column).abs() == 2 {
            let (rook_from, rook_to) = movegen::castling_rook(&self.grid, from, to);
            let mut rook = self
                .grid
                .remove_piece(rook_from)?
                .ok_or(MoveError::NoPieceAtSource)?;
            rook.increase_move_count();
            self.grid.place_piece(rook, rook_to)?;
            castle = Some((rook_from, rook_to));
        }

        if let Some(captured) = captured {
            self.captured.push(captured);
        }

        trace!(%from, %to, capture = captured.is_some(), "executed");
        Ok(Undo {
            from,
            to,
            captured,
            captured_at,
            castle,
            promoted,
        })
    }

    fn undo_move(&mut self, undo: Undo) -> Result<(), MoveError> {
        let mut piece = self
            .grid
            .remove_piece(undo.to)?
            .ok_or(MoveError::NoPieceAtSource)?;
        piece.decrease_move_count();
        if undo.promoted {
            piece.set_role(Role::Pawn);
        }
        self.grid.place_piece(piece, undo.from)?;

        if let Some((rook_from, rook_to)) = undo.castle {
            let mut rook = self
                .grid
                .remove_piece(rook_to)?
                .ok_or(MoveError::NoPieceAtSource)?;
            rook.decrease_move_count();
            self.grid.place_piece(rook, rook_from)?;
        }

        if let Some(captured) = undo.captured {
            if let Some(i) = self.captured.iter().rposition(|p| p.id() == captured.id()) {
                self.captured.remove(i);
            }
            self.grid.place_piece(captured, undo.captured_at)?;
        }

        trace!(from = %undo.from, to = %undo.to, "rolled back");
        Ok(())
    }

    fn last_row(&self, color: Color) -> i32 {
        color.fold(0, self.grid.rows() as i32 - 1)
    }

    fn king(&self, color: Color) -> Result<Position, MoveError> {
        self.grid
            .pieces_of(color)
            .find(|piece| piece.role() == Role::King)
            .and_then(Piece::position)
            .ok_or(MoveError::MissingKing { color })
    }

    /// Tests if any opponent piece can move onto the king of `color`.
    fn is_attacked(&self, color: Color) -> Result<bool, MoveError> {
        let king = self.king(color)?;
        let view = self.view();
        Ok(self
            .grid
            .pieces_of(!color)
            .any(|piece| piece.possible_move(&view, king)))
    }

    /// Tests if `color`, currently in check, has no move that resolves it.
    fn test_checkmate(&mut self, color: Color) -> Result<bool, MoveError> {
        for (from, moves) in self.candidates(color) {
            for to in moves.iter() {
                if self.is_safe(from, to)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn candidates(&self, color: Color) -> Vec<(Position, Mask)> {
        let view = self.view();
        self.grid
            .pieces_of(color)
            .filter_map(|piece| Some((piece.position()?, piece.possible_moves(&view))))
            .collect()
    }

    /// All legal moves of the current player. Moves onto the last row by a
    /// pawn are listed once per promotion role.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        if self.checkmate {
            return moves;
        }

        let last_row = self.last_row(self.current_player);
        let mut scratch = self.clone();
        for (from, targets) in self.candidates(self.current_player) {
            let pawn = self
                .grid
                .piece(from)
                .ok()
                .flatten()
                .map_or(false, |piece| piece.role() == Role::Pawn);
            for to in targets.iter() {
                match scratch.is_safe(from, to) {
                    Ok(true) => (),
                    Ok(false) => continue,
                    Err(err) => {
                        error!(%err, %from, %to, "cannot test move");
                        continue;
                    }
                }
                if pawn && to.row == last_row {
                    for role in Role::PROMOTIONS {
                        moves.push(Move::new(from, to).with_promotion(role));
                    }
                } else {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Tests if [`Match::play()`] would accept the move.
    pub fn is_legal(&self, m: &Move) -> bool {
        self.clone().try_play(m).is_ok()
    }

    /// The current player is not in check but has no legal move. The
    /// match continues; a stalemate is only reported.
    pub fn is_stalemate(&self) -> bool {
        !self.check && !self.checkmate && self.legal_moves().is_empty()
    }
}
