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

use crate::position::Position;

/// A boolean matrix with one cell per grid position, as produced by move
/// generation.
///
/// # Examples
///
/// ```
/// use chessmatch::{Mask, Position};
///
/// let mut mask = Mask::new(8, 8);
/// mask.set(Position::new(5, 0));
/// assert!(mask.contains(Position::new(5, 0)));
/// assert!(!mask.contains(Position::new(9, 0)));
/// assert_eq!(mask.count(), 1);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Mask {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// An all-false mask of the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Mask {
        Mask {
            rows,
            columns,
            cells: vec![false; rows * columns],
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

    fn index(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.row).ok()?;
        let column = usize::try_from(position.column).ok()?;
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    /// Tests a cell. Positions outside of the mask are never contained.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).map_or(false, |i| self.cells[i])
    }

    /// Tests a cell by unsigned indices.
    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.cells[row * self.columns + column]
    }

    /// Marks a cell. Positions outside of the mask are ignored.
    #[inline]
    pub fn set(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = true;
        }
    }

    /// Clears a cell. Positions outside of the mask are ignored.
    pub fn clear(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = false;
        }
    }

    pub fn any(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    pub fn is_empty(&self) -> bool {
        !self.any()
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterates over marked positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(move |(i, _)| Position::new((i / columns) as i32, (i % columns) as i32))
    }

    /// Copies the mask into nested rows, the layout a renderer iterates.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.columns == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.columns).map(<[bool]>::to_vec).collect()
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                f.write_char(if self.get(row, column) { '1' } else { '.' })?;
                f.write_char(if column + 1 < self.columns { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}
