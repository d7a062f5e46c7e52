/*
random_path.rs

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

//! Generate a random path for one pair.
//!
//! The path is a random walk over the free cells of a [`BoardState`].
//! At each step the walk prefers to turn rather than to continue straight, so that generated
//! pairs are not trivially connected by straight lines.
//! The walk never visits a cell twice and stops after at most `max_len` cells, so it always
//! terminates.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::board::BoardState;
use super::cell::{Cell, Direction};
use super::path::Path;

/// Weight of a step that changes direction.
const TURN_WEIGHT: u32 = 3;

/// Weight of a step that keeps the direction of the previous step.
const STRAIGHT_WEIGHT: u32 = 1;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// No free cell admits a walk of the minimum length.
    NoPath,
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Minimum number of cells in the path, endpoints included.
    min_len: usize,

    /// Maximum number of cells in the path, endpoints included.
    max_len: usize,

    /// Smallest target length. The walk is not required to reach it; it ends earlier at a dead
    /// end if the path is already `min_len` cells long.
    target_min: usize,

    /// Number of walks it took to generate the last random path.
    pub iteration: usize,
}

impl RandomPath {
    /// Create the object.
    ///
    /// `max_len` is raised to `min_len` if it is smaller.
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self {
            min_len,
            max_len: max_len.max(min_len),
            target_min: min_len,
            iteration: 0,
        }
    }

    /// Set the smallest target length, clamped between the minimum and maximum lengths.
    pub fn target_min(mut self, target_min: usize) -> Self {
        self.target_min = target_min.clamp(self.min_len, self.max_len);
        self
    }

    /// Generate and return a random path over the free cells of the board.
    ///
    /// The target length is randomly selected between the smallest target length and the
    /// maximum length. The walk ends early if it reaches a dead end; the path is accepted if it
    /// is at least `min_len` cells long. Every free cell is tried as a starting cell, in random
    /// order, before giving up.
    ///
    /// # Errors
    ///
    /// The method returns [`RandomPathError::NoPath`] when no free cell admits a walk of the
    /// minimum length.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        board: &BoardState,
        rng: &mut R,
    ) -> Result<Path, RandomPathError> {
        self.iteration = 0;

        let mut starts: Vec<Cell> = board.free_cells();
        if starts.len() < self.min_len {
            debug!(
                "Only {} free cells left, {} required",
                starts.len(),
                self.min_len
            );
            return Err(RandomPathError::NoPath);
        }
        starts.shuffle(rng);

        let target: usize = rng.random_range(self.target_min..=self.max_len);
        debug!(
            "Target length = {target} (range {}..={})  Free cells = {}",
            self.target_min,
            self.max_len,
            starts.len()
        );

        for start in starts {
            self.iteration += 1;
            let path: Path = self.walk(start, target, board, rng);
            if path.len() >= self.min_len {
                debug!(
                    "Path from {start} to {:?}: {} cells, {} turns (iteration {})",
                    path.get_last(),
                    path.len(),
                    path.turns(),
                    self.iteration
                );
                return Ok(path);
            }
            debug!(
                "    Back: walk from {start} too short ({} cells)",
                path.len()
            );
        }
        Err(RandomPathError::NoPath)
    }

    /// Walk from the starting cell until the target length or a dead end is reached.
    fn walk<R: Rng + ?Sized>(
        &self,
        start: Cell,
        target: usize,
        board: &BoardState,
        rng: &mut R,
    ) -> Path {
        let mut path: Path = Path::new(target);
        path.push(start);

        while path.len() < target {
            let current: Cell = match path.get_last() {
                Some(c) => c,
                None => break,
            };
            let candidates: Vec<Cell> = board
                .free_neighbors(current)
                .into_iter()
                .filter(|c| !path.contains(*c))
                .collect();
            match Self::choose_next(current, path.last_direction(), &candidates, rng) {
                Some(next) => path.push(next),
                None => break,
            }
        }
        path
    }

    /// Select the next cell among the candidates, favoring turns.
    fn choose_next<R: Rng + ?Sized>(
        current: Cell,
        heading: Option<Direction>,
        candidates: &[Cell],
        rng: &mut R,
    ) -> Option<Cell> {
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<u32> = candidates
            .iter()
            .map(|c| match heading {
                Some(d) if current.direction_to(*c) == Some(d) => STRAIGHT_WEIGHT,
                Some(_) => TURN_WEIGHT,
                None => 1,
            })
            .collect();
        let total: u32 = weights.iter().sum();
        let mut pick: u32 = rng.random_range(0..total);
        for (c, w) in candidates.iter().zip(&weights) {
            if pick < *w {
                return Some(*c);
            }
            pick -= w;
        }
        candidates.last().copied()
    }
}
