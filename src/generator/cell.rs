/*
cell.rs

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

//! Cells of the Dotlink board.
//!
//! The board is a rectangular grid of `width x height` cells.
//! Cell `(0, 0)` is the top left corner; `x` grows to the right and `y` grows downward.
//! Two cells are adjacent when they share a side (4-directional adjacency).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a step between two adjacent cells.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Board cell.
///
/// Equality, ordering, and hashing use the `(x, y)` coordinate tuple.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Cell {
    /// Create a [`Cell`] object.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the two cells share a side.
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Return the direction of the step from this cell to the given adjacent cell, or None if
    /// the cells are not adjacent.
    pub fn direction_to(&self, other: Cell) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }
        if other.x > self.x {
            Some(Direction::Right)
        } else if other.x < self.x {
            Some(Direction::Left)
        } else if other.y > self.y {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }

    /// Return the adjacent cell in the given direction, or None if it would be outside a board
    /// of the given size.
    pub fn step(&self, direction: Direction, width: usize, height: usize) -> Option<Cell> {
        match direction {
            Direction::Up if self.y > 0 => Some(Cell::new(self.x, self.y - 1)),
            Direction::Down if self.y + 1 < height => Some(Cell::new(self.x, self.y + 1)),
            Direction::Left if self.x > 0 => Some(Cell::new(self.x - 1, self.y)),
            Direction::Right if self.x + 1 < width => Some(Cell::new(self.x + 1, self.y)),
            _ => None,
        }
    }

    /// Return the adjacent cells that are inside a board of the given size.
    pub fn neighbors(&self, width: usize, height: usize) -> Vec<Cell> {
        [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
        .iter()
        .filter_map(|d| self.step(*d, width, height))
        .collect()
    }

    /// Position of the cell in a row-major vector for a board of the given width.
    pub fn index(&self, width: usize) -> usize {
        self.y * width + self.x
    }

    /// Inverse of [`Cell::index`].
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }
}
