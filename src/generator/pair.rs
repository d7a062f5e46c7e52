/*
pair.rs

Copyright 2025 Hervé Quatremain

This file is part of Dotlink.

Dotlink is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Dotlink is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Dotlink. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Endpoint pairs that the player must connect.

use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

use super::cell::Cell;
use crate::config::MAX_PAIRS;

/// Display color of a pair.
///
/// The pair with ID `n` uses the color with representation `n`. There are as many colors as the
/// maximum number of pairs in a puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(usize)]
pub enum PairColor {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Cyan,
    Magenta,
    Brown,
}

impl PairColor {
    /// Return the color for the given pair ID. IDs beyond the palette wrap around.
    pub fn for_pair(pair_id: usize) -> Self {
        Self::from_repr(pair_id % MAX_PAIRS).unwrap_or(Self::Red)
    }

    /// Color components, between 0 and 255.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        match self {
            PairColor::Red => (224, 27, 36, 255),
            PairColor::Blue => (28, 113, 216, 255),
            PairColor::Green => (46, 194, 126, 255),
            PairColor::Yellow => (245, 194, 17, 255),
            PairColor::Orange => (255, 120, 0, 255),
            PairColor::Cyan => (51, 209, 228, 255),
            PairColor::Magenta => (192, 97, 203, 255),
            PairColor::Brown => (134, 94, 60, 255),
        }
    }

    /// One-letter tag used in text representations.
    pub fn tag(&self) -> char {
        match self {
            PairColor::Red => 'R',
            PairColor::Blue => 'B',
            PairColor::Green => 'G',
            PairColor::Yellow => 'Y',
            PairColor::Orange => 'O',
            PairColor::Cyan => 'C',
            PairColor::Magenta => 'M',
            PairColor::Brown => 'W',
        }
    }
}

/// One puzzle requirement: connect `start` to `end`.
///
/// Only the endpoints are visible to the player. The path that proves the pair can be connected
/// is kept in the [`crate::generator::puzzles::Puzzle`] object.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PairSpec {
    /// Pair identifier, which is also the index of the pair in the puzzle.
    pub id: usize,

    /// First endpoint.
    pub start: Cell,

    /// Second endpoint. Always different from `start`.
    pub end: Cell,

    /// Display color.
    pub color: PairColor,
}

impl PairSpec {
    /// Create a [`PairSpec`] object. The color is derived from the pair ID.
    pub fn new(id: usize, start: Cell, end: Cell) -> Self {
        Self {
            id,
            start,
            end,
            color: PairColor::for_pair(id),
        }
    }

    /// Whether the cell is one of the two endpoints.
    pub fn is_endpoint(&self, cell: Cell) -> bool {
        self.start == cell || self.end == cell
    }

    /// Given one endpoint, return the other one.
    pub fn opposite(&self, cell: Cell) -> Option<Cell> {
        if cell == self.start {
            Some(self.end)
        } else if cell == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_colors_follow_pair_ids() {
        assert_eq!(PairColor::for_pair(0), PairColor::Red);
        assert_eq!(PairColor::for_pair(7), PairColor::Brown);
        assert_eq!(PairColor::for_pair(8), PairColor::Red);
    }

    #[test]
    fn test_one_color_per_pair() {
        let colors: HashSet<PairColor> = (0..MAX_PAIRS).map(PairColor::for_pair).collect();
        assert_eq!(colors.len(), MAX_PAIRS);
        assert_eq!(PairColor::for_pair(MAX_PAIRS), PairColor::for_pair(0));
        assert_eq!(PairColor::for_pair(MAX_PAIRS + 3), PairColor::for_pair(3));
    }

    #[test]
    fn test_opposite() {
        let p = PairSpec::new(1, Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(p.opposite(Cell::new(0, 0)), Some(Cell::new(2, 2)));
        assert_eq!(p.opposite(Cell::new(2, 2)), Some(Cell::new(0, 0)));
        assert_eq!(p.opposite(Cell::new(1, 1)), None);
        assert_eq!(p.color, PairColor::Blue);
    }
}
