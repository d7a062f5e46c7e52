/*
board.rs

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

//! Occupancy of the board cells.
//!
//! Each cell is either free or claimed by exactly one pair.
//! The generator uses a [`BoardState`] to keep the walks of the different pairs apart, and the
//! session uses another one to record the paths that the player committed.

use log::debug;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::path::Path;

/// Represent the occupancy of the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Row-major list of the cells. `None` is a free cell, `Some(id)` a cell claimed by the pair
    /// `id`.
    cells: Vec<Option<usize>>,
}

impl BoardState {
    /// Create a [`BoardState`] object where all the cells are free.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Release all the cells.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Whether the cell is on the board.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Return the ID of the pair that claimed the cell, or None if the cell is free or outside
    /// the board.
    pub fn owner(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[cell.index(self.width)]
    }

    /// Whether the cell is on the board and not claimed.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.cells[cell.index(self.width)].is_none()
    }

    /// Claim a free cell for the given pair.
    ///
    /// Return `false`, and leave the board untouched, if the cell is outside the board or
    /// already claimed by another pair.
    pub fn claim(&mut self, cell: Cell, pair_id: usize) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        let i: usize = cell.index(self.width);
        match self.cells[i] {
            Some(owner) => owner == pair_id,
            None => {
                self.cells[i] = Some(pair_id);
                true
            }
        }
    }

    /// Claim all the cells of the path for the given pair.
    ///
    /// The operation is all or nothing: if one cell cannot be claimed, the board is not modified
    /// and the method returns `false`.
    pub fn claim_path(&mut self, path: &Path, pair_id: usize) -> bool {
        if path
            .cells()
            .iter()
            .any(|c| !self.in_bounds(*c) || self.owner(*c).is_some_and(|o| o != pair_id))
        {
            debug!("Cannot claim the path of pair {pair_id}: cells already in use");
            return false;
        }
        for c in path.cells() {
            self.cells[c.index(self.width)] = Some(pair_id);
        }
        true
    }

    /// Release all the cells claimed by the given pair.
    pub fn release_pair(&mut self, pair_id: usize) {
        for c in self.cells.iter_mut().filter(|c| **c == Some(pair_id)) {
            *c = None;
        }
    }

    /// Number of claimed cells.
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Ratio of claimed cells over the total number of cells.
    pub fn fill_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.claimed_count() as f64 / self.cells.len() as f64
    }

    /// Return the free cells in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| Cell::from_index(i, self.width))
            .collect()
    }

    /// Return the free cells adjacent to the given cell.
    pub fn free_neighbors(&self, cell: Cell) -> Vec<Cell> {
        cell.neighbors(self.width, self.height)
            .into_iter()
            .filter(|c| self.is_free(*c))
            .collect()
    }

    /// Return the cells claimed by the given pair, in row-major order.
    pub fn cells_of(&self, pair_id: usize) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Some(pair_id))
            .map(|(i, _)| Cell::from_index(i, self.width))
            .collect()
    }
}
