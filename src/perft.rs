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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use chessmatch::{perft, Match};
//!
//! let game = Match::new();
//! assert_eq!(perft(&game, 1), 20);
//! assert_eq!(perft(&game, 2), 400);
//! ```

use tracing::{debug, error};

use crate::{game::Match, m::Move};

fn child(game: &Match, m: &Move) -> Option<Match> {
    let mut child = game.clone();
    match child.play(m) {
        Ok(_) => Some(child),
        Err(err) => {
            error!(%m, %err, "generated move was rejected");
            None
        }
    }
}

/// Counts legal move paths of a given length.
///
/// Paths ending in mate or stalemate early are not counted. Useful for
/// comparing, testing and debugging move generation correctness and
/// performance.
pub fn perft(game: &Match, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = game.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .filter_map(|m| child(game, m))
                .map(|child| perft(&child, depth - 1))
                .sum()
        }
    }
}

/// Like [`perft()`], but also logs the perft of each child at debug level.
pub fn debug_perft(game: &Match, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        game.legal_moves()
            .iter()
            .filter_map(|m| {
                let child = child(game, m)?;
                let nodes = perft(&child, depth - 1);
                debug!(%m, depth = depth - 1, nodes, "perft");
                Some(nodes)
            })
            .sum()
    }
}
