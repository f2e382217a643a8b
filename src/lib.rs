//! A chess rules engine: piece movement on a grid, turn order, check and
//! checkmate.
//!
//! # Examples
//!
//! Play moves by coordinate:
//!
//! ```
//! use chessmatch::{Color, Match};
//!
//! let mut game = Match::new();
//! game.perform_move("E2".parse()?, "E4".parse()?)?;
//! assert_eq!(game.current_player(), Color::Black);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Moves that would leave the own king attacked are rejected and leave the
//! match untouched:
//!
//! ```
//! use chessmatch::{Match, MoveError};
//!
//! let mut game = Match::new();
//! for (from, to) in [("D2", "D4"), ("E7", "E6"), ("C2", "C4"), ("F8", "B4")] {
//!     game.perform_move(from.parse()?, to.parse()?)?;
//! }
//! assert!(game.check());
//! assert_eq!(
//!     game.perform_move("A2".parse()?, "A3".parse()?),
//!     Err(MoveError::SelfCheck)
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Detect the end of a match:
//!
//! ```
//! use chessmatch::Match;
//!
//! let mut game = Match::new();
//! for (from, to) in [("F2", "F3"), ("E7", "E5"), ("G2", "G4"), ("D8", "H4")] {
//!     game.perform_move(from.parse()?, to.parse()?)?;
//! }
//! assert!(game.checkmate());
//! assert!(game.legal_moves().is_empty());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   value types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for [`Color`], [`Role`] and [`PieceId`].
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.

#![doc(html_root_url = "https://docs.rs/chessmatch/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod color;
mod coordinate;
mod game;
mod grid;
mod m;
mod mask;
mod piece;
mod position;
mod role;
mod setup;

pub mod movegen;
pub mod perft;

pub use color::{Color, ParseColorError};
pub use coordinate::{Coordinate, InvalidCoordinate, ParseCoordinateError, NOTATION_SIZE};
pub use game::{Match, MoveError};
pub use grid::{BoardError, Grid};
pub use m::{Move, MoveFlags, MoveList, Played};
pub use mask::Mask;
pub use movegen::BoardView;
pub use perft::perft;
pub use piece::{Piece, PieceId};
pub use position::Position;
pub use role::Role;
pub use setup::{Placement, Setup, SetupError, MAX_PIECES_PER_SIDE};
