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

//! Chess notation coordinates and their mapping onto grid positions.
//!
//! The rank axis is inverted: rank 8 is row 0 and rank 1 is row 7.
//!
//! # Examples
//!
//! ```
//! use chessmatch::{Coordinate, Position};
//!
//! let e2 = Coordinate::new('E', 2)?;
//! assert_eq!(e2.to_position(), Position::new(6, 4));
//! assert_eq!(Coordinate::from_position(Position::new(6, 4))?, e2);
//!
//! let a8: Coordinate = "a8".parse()?;
//! assert_eq!(a8.to_position(), Position::new(0, 0));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::position::Position;

/// Number of files and ranks covered by chess notation.
pub const NOTATION_SIZE: u8 = 8;

/// A square in chess notation: file letter `A`-`H` and rank `1`-`8`.
///
/// The file is always stored in uppercase. With the `serde` feature a
/// coordinate is (de)serialized as a `(file, rank)` pair and validated like
/// [`Coordinate::new`].
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(char, u8)", into = "(char, u8)")
)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Coordinate {
    file: char,
    rank: u8,
}

impl Coordinate {
    /// Validates a file letter and rank number. Lowercase files are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinate`] unless the file is in `A..=H` and the
    /// rank in `1..=8`.
    pub fn new(file: char, rank: u8) -> Result<Coordinate, InvalidCoordinate> {
        let file = file.to_ascii_uppercase();
        if ('A'..='H').contains(&file) && (1..=NOTATION_SIZE).contains(&rank) {
            Ok(Coordinate { file, rank })
        } else {
            Err(InvalidCoordinate { file, rank })
        }
    }

    #[inline]
    pub const fn file(self) -> char {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Maps the coordinate to its grid position.
    pub fn to_position(self) -> Position {
        Position::new(
            i32::from(NOTATION_SIZE) - i32::from(self.rank),
            self.file as i32 - 'A' as i32,
        )
    }

    /// Maps a grid position back to notation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinate`] if the position is outside of the
    /// 8×8 area covered by chess notation.
    pub fn from_position(position: Position) -> Result<Coordinate, InvalidCoordinate> {
        let size = i32::from(NOTATION_SIZE);
        let in_range = |v: i32| (0..size).contains(&v);
        if in_range(position.row) && in_range(position.column) {
            // Both values are in 0..8, so the casts cannot truncate.
            Coordinate::new(
                char::from(b'A' + position.column as u8),
                NOTATION_SIZE - position.row as u8,
            )
        } else {
            Err(InvalidCoordinate {
                file: '?',
                rank: 0,
            })
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl From<Coordinate> for Position {
    fn from(coordinate: Coordinate) -> Position {
        coordinate.to_position()
    }
}

impl TryFrom<(char, u8)> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from((file, rank): (char, u8)) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(file, rank)
    }
}

impl From<Coordinate> for (char, u8) {
    fn from(coordinate: Coordinate) -> (char, u8) {
        (coordinate.file, coordinate.rank)
    }
}

impl TryFrom<Position> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(position: Position) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::from_position(position)
    }
}

/// Error when constructing a coordinate outside of `A1`-`H8`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidCoordinate {
    file: char,
    rank: u8,
}

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid coordinate {}{}: valid values are from A1 to H8",
            self.file, self.rank
        )
    }
}

impl Error for InvalidCoordinate {}

/// Error when parsing an invalid coordinate string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseCoordinateError;

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid coordinate")
    }
}

impl Error for ParseCoordinateError {}

impl From<InvalidCoordinate> for ParseCoordinateError {
    fn from(_: InvalidCoordinate) -> ParseCoordinateError {
        ParseCoordinateError
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Coordinate, ParseCoordinateError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseCoordinateError);
        }
        let rank = btoi::btou::<u8>(&bytes[1..]).map_err(|_| ParseCoordinateError)?;
        Ok(Coordinate::new(char::from(bytes[0]), rank)?)
    }
}
