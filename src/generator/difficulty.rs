/*
difficulty.rs

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

//! Estimate how hard a puzzle is to solve.
//!
//! The estimate combines four measures of the reference paths:
//!
//! * the board fill ratio (claimed cells over total cells),
//! * the mean number of direction changes per path,
//! * the interleaving of the paths: the number of side contacts between cells of different
//!   pairs, per board cell. Paths running side by side are easy to confuse,
//! * the mean number of steps per path.
//!
//! Each measure goes through a saturating curve (`m / (m + k)`) and is weighted. With the
//! default weights the score is in `[1, 10)`, which is the range of the minimum difficulty knob.
//! Every weight is at least [`MIN_WEIGHT`] and every curve strictly increases, so the score
//! strictly increases with each measure when the others are held fixed.
//!
//! A given board cannot reach the whole range. [`Scorer::ceiling`] bounds the score of any
//! puzzle on the board, so that the generator rejects an unreachable minimum difficulty before
//! searching.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::pair::PairSpec;
use super::path::Path;

/// Raw measures extracted from a set of paths.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
pub struct Metrics {
    /// Number of pairs.
    pub num_pairs: usize,

    /// Number of steps over all the paths.
    pub total_steps: usize,

    /// Number of direction changes over all the paths.
    pub total_turns: usize,

    /// Number of side contacts between cells that belong to different pairs.
    pub contacts: usize,

    /// Number of cells used by the paths.
    pub claimed_cells: usize,

    /// Number of cells on the board.
    pub total_cells: usize,
}

impl Metrics {
    /// Extract the measures from the reference paths of a `width x height` puzzle.
    ///
    /// `paths[i]` is the path of `pairs[i]`.
    pub fn compute(width: usize, height: usize, pairs: &[PairSpec], paths: &[Path]) -> Self {
        // Owner of each cell, so that contacts are counted without searching the paths
        let mut owners: Vec<Option<usize>> = vec![None; width * height];
        for (pair, path) in pairs.iter().zip(paths) {
            for c in path.cells() {
                if c.x < width && c.y < height {
                    owners[c.index(width)] = Some(pair.id);
                }
            }
        }

        // Count each contact once by only looking at the right and lower neighbors
        let mut contacts: usize = 0;
        for y in 0..height {
            for x in 0..width {
                let Some(o) = owners[Cell::new(x, y).index(width)] else {
                    continue;
                };
                for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let other: Option<usize> = owners[Cell::new(nx, ny).index(width)];
                    if other.is_some_and(|n| n != o) {
                        contacts += 1;
                    }
                }
            }
        }

        Self {
            num_pairs: pairs.len().min(paths.len()),
            total_steps: paths.iter().map(|p| p.steps()).sum(),
            total_turns: paths.iter().map(|p| p.turns()).sum(),
            contacts,
            claimed_cells: owners.iter().filter(|o| o.is_some()).count(),
            total_cells: width * height,
        }
    }

    /// Claimed cells over total cells.
    pub fn fill_ratio(&self) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.claimed_cells as f64 / self.total_cells as f64
    }

    /// Mean number of direction changes per path.
    pub fn turns_per_pair(&self) -> f64 {
        if self.num_pairs == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.num_pairs as f64
    }

    /// Mean number of steps per path.
    pub fn steps_per_pair(&self) -> f64 {
        if self.num_pairs == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.num_pairs as f64
    }

    /// Contacts between pairs per board cell.
    pub fn interleaving(&self) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.contacts as f64 / self.total_cells as f64
    }
}

/// Smallest weight of a measure.
pub const MIN_WEIGHT: f64 = 0.01;

/// Weights of the measures in the final score.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Weights {
    pub fill: f64,
    pub turns: f64,
    pub interleaving: f64,
    pub length: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            fill: 3.0,
            turns: 3.0,
            interleaving: 2.0,
            length: 1.0,
        }
    }
}

/// Difficulty scorer.
///
/// Scoring has no hidden state: the same paths always give the same score.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(from = "Weights", into = "Weights")]
pub struct Scorer {
    weights: Weights,
}

impl From<Weights> for Scorer {
    fn from(weights: Weights) -> Self {
        Self::with_weights(weights)
    }
}

impl From<Scorer> for Weights {
    fn from(scorer: Scorer) -> Self {
        scorer.weights
    }
}

impl Scorer {
    /// Create a [`Scorer`] object with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Scorer`] object with custom weights.
    ///
    /// Weights below [`MIN_WEIGHT`] are raised to it, so that the score strictly increases when
    /// a measure grows. Infinite and NaN weights are replaced by the default ones.
    pub fn with_weights(weights: Weights) -> Self {
        let default: Weights = Weights::default();
        let floor = |w: f64, d: f64| if w.is_finite() { w.max(MIN_WEIGHT) } else { d };
        Self {
            weights: Weights {
                fill: floor(weights.fill, default.fill),
                turns: floor(weights.turns, default.turns),
                interleaving: floor(weights.interleaving, default.interleaving),
                length: floor(weights.length, default.length),
            },
        }
    }

    /// Return the weights.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Score the reference paths of a `width x height` puzzle.
    pub fn score(&self, width: usize, height: usize, pairs: &[PairSpec], paths: &[Path]) -> f64 {
        self.score_metrics(&Metrics::compute(width, height, pairs, paths))
    }

    /// Score already extracted measures.
    pub fn score_metrics(&self, m: &Metrics) -> f64 {
        let turns: f64 = m.turns_per_pair();
        let interleaving: f64 = m.interleaving();
        let length: f64 = m.steps_per_pair();

        1.0 + self.weights.fill * m.fill_ratio()
            + self.weights.turns * turns / (turns + 2.0)
            + self.weights.interleaving * interleaving / (interleaving + 1.0)
            + self.weights.length * length / (length + 4.0)
    }

    /// Highest score that a `width x height` puzzle with `num_pairs` pairs can reach.
    ///
    /// For each possible number of steps, the bound assumes that the paths fill their cells,
    /// turn at every inner cell, and touch another pair on every board adjacency that is not a
    /// step. Real puzzles stay below it.
    pub fn ceiling(&self, width: usize, height: usize, num_pairs: usize) -> f64 {
        let total_cells: usize = width * height;
        if total_cells == 0 || num_pairs == 0 {
            return 1.0;
        }
        let adjacencies: usize = (width - 1) * height + width * (height - 1);

        // Each path has at least one step, and its cells are its steps plus one
        (num_pairs..=total_cells.saturating_sub(num_pairs))
            .map(|steps| Metrics {
                num_pairs,
                total_steps: steps,
                total_turns: steps - num_pairs,
                contacts: adjacencies.saturating_sub(steps),
                claimed_cells: steps + num_pairs,
                total_cells,
            })
            .map(|m| self.score_metrics(&m))
            .fold(1.0, f64::max)
    }
}
