/*
path.rs

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

//! Path connecting the two endpoints of a pair.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cell::{Cell, Direction};

/// Path object.
///
/// The object is serialized as the plain list of its cells.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<Cell>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Cell>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Path {}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Self::from_cells(&cells)
    }
}

impl From<Path> for Vec<Cell> {
    fn from(path: Path) -> Self {
        path.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a list of cells.
    pub fn from_cells(cells: &[Cell]) -> Self {
        Self {
            path: cells.to_vec(),
            visited: cells.iter().copied().collect(),
        }
    }

    /// Create a [`Path`] object from a list of `(x, y)` tuples.
    pub fn from_coordinates(coordinates: &[(usize, usize)]) -> Self {
        let cells: Vec<Cell> = coordinates.iter().map(|(x, y)| Cell::new(*x, *y)).collect();
        Self::from_cells(&cells)
    }

    /// Remove all the cells from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.visited.clear();
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: Cell) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path and return it.
    pub fn pop(&mut self) -> Option<Cell> {
        let c: Cell = self.path.pop()?;
        // A path built with `from_cells` might list a cell twice (it is then invalid). Keep the
        // cell in the visited set while another copy remains.
        if !self.path.contains(&c) {
            self.visited.remove(&c);
        }
        Some(c)
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of steps between the first and the last cell.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the ordered cells.
    pub fn cells(&self) -> &[Cell] {
        &self.path
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Cell> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Cell> {
        self.path.last().copied()
    }

    /// Return the direction of the last step, if the path has at least two cells.
    pub fn last_direction(&self) -> Option<Direction> {
        let l: usize = self.path.len();
        if l < 2 {
            return None;
        }
        self.path[l - 2].direction_to(self.path[l - 1])
    }

    /// Number of direction changes along the path.
    pub fn turns(&self) -> usize {
        let directions: Vec<Option<Direction>> = self
            .path
            .windows(2)
            .map(|w| w[0].direction_to(w[1]))
            .collect();
        directions.windows(2).filter(|d| d[0] != d[1]).count()
    }

    /// Whether consecutive cells are adjacent and no cell is repeated.
    pub fn is_simple(&self) -> bool {
        self.visited.len() == self.path.len()
            && self.path.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Whether the path is simple and connects `start` to `end`.
    pub fn is_valid_between(&self, start: Cell, end: Cell) -> bool {
        self.get_first() == Some(start) && self.get_last() == Some(end) && self.is_simple()
    }
}
