/*
puzzles.rs

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

//! Puzzle representation and generation parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Duration;

use super::board::BoardState;
use super::cell::Cell;
use super::difficulty::Scorer;
use super::pair::PairSpec;
use super::path::Path;
use crate::config::{
    MAX_BOARD_SIZE, MAX_DIFFICULTY, MAX_PAIRS, MIN_BOARD_SIZE, MIN_DIFFICULTY, MIN_PAIRS,
    MIN_PATH_CELLS,
};

/// Puzzle difficulty level, used to select a [`GeneratorConfig`] preset.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash, ValueEnum, Default,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Configuration knob out of its range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Board width outside [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    Width(usize),

    /// Board height outside [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    Height(usize),

    /// Number of pairs outside [`MIN_PAIRS`]..=[`MAX_PAIRS`].
    NumPairs(usize),

    /// Minimum difficulty outside [`MIN_DIFFICULTY`]..=[`MAX_DIFFICULTY`].
    MinDifficulty(f64),

    /// The maximum number of attempts is zero.
    MaxAttempts,

    /// The timeout is zero.
    Timeout,

    /// The pairs cannot fit on the board: each pair needs at least [`MIN_PATH_CELLS`] cells.
    BoardTooSmall { cells: usize, required: usize },

    /// No puzzle on the board can score the minimum difficulty (see [`Scorer::ceiling`]).
    UnreachableDifficulty { requested: f64, ceiling: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Width(w) => write!(
                f,
                "board width {w} is not between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}"
            ),
            ConfigError::Height(h) => write!(
                f,
                "board height {h} is not between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}"
            ),
            ConfigError::NumPairs(n) => write!(
                f,
                "number of pairs {n} is not between {MIN_PAIRS} and {MAX_PAIRS}"
            ),
            ConfigError::MinDifficulty(d) => write!(
                f,
                "minimum difficulty {d} is not between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"
            ),
            ConfigError::MaxAttempts => {
                write!(f, "the maximum number of attempts must be positive")
            }
            ConfigError::Timeout => write!(f, "the generation timeout must be positive"),
            ConfigError::BoardTooSmall { cells, required } => write!(
                f,
                "the board has {cells} cells but the pairs need at least {required}"
            ),
            ConfigError::UnreachableDifficulty { requested, ceiling } => write!(
                f,
                "minimum difficulty {requested} is above the board ceiling {ceiling:.2}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Puzzle generation parameters.
///
/// All the knobs are explicit. The [`Default`] implementation is the [`Difficulty::Easy`]
/// preset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Number of endpoint pairs.
    pub num_pairs: usize,

    /// Generated puzzles score at least this difficulty.
    pub min_difficulty: f64,

    /// Number of attempts before the generator gives up.
    pub max_attempts: usize,

    /// Wall-clock budget for the generation, checked between attempts.
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::preset(Difficulty::Easy)
    }
}

impl GeneratorConfig {
    /// Return the configuration for the given difficulty level.
    pub fn preset(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                width: 5,
                height: 5,
                num_pairs: 3,
                min_difficulty: 3.0,
                max_attempts: 200,
                timeout: Duration::from_secs(2),
            },
            Difficulty::Medium => Self {
                width: 7,
                height: 7,
                num_pairs: 5,
                min_difficulty: 4.5,
                max_attempts: 500,
                timeout: Duration::from_secs(3),
            },
            Difficulty::Hard => Self {
                width: 9,
                height: 9,
                num_pairs: 7,
                min_difficulty: 5.5,
                max_attempts: 1000,
                timeout: Duration::from_secs(5),
            },
        }
    }

    /// Total number of cells on the board.
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Verify that every knob is in its range and that the pairs can fit on the board.
    ///
    /// # Errors
    ///
    /// Return the first knob found out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if !(MIN_PAIRS..=MAX_PAIRS).contains(&self.num_pairs) {
            return Err(ConfigError::NumPairs(self.num_pairs));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.min_difficulty) {
            return Err(ConfigError::MinDifficulty(self.min_difficulty));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::MaxAttempts);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Timeout);
        }
        let required: usize = self.num_pairs * MIN_PATH_CELLS;
        if required > self.num_cells() {
            return Err(ConfigError::BoardTooSmall {
                cells: self.num_cells(),
                required,
            });
        }
        Ok(())
    }

    /// Verify the knobs, and then verify that a puzzle scored by `scorer` can reach the minimum
    /// difficulty on this board.
    ///
    /// # Errors
    ///
    /// Return the first knob found out of range, or [`ConfigError::UnreachableDifficulty`].
    pub fn validate_for(&self, scorer: &Scorer) -> Result<(), ConfigError> {
        self.validate()?;
        let ceiling: f64 = scorer.ceiling(self.width, self.height, self.num_pairs);
        if self.min_difficulty > ceiling {
            return Err(ConfigError::UnreachableDifficulty {
                requested: self.min_difficulty,
                ceiling,
            });
        }
        Ok(())
    }
}

/// Invariant violated by a puzzle definition.
#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleError {
    /// The board dimensions are out of range.
    BoardSize { width: usize, height: usize },

    /// The puzzle has no pair.
    NoPairs,

    /// The puzzle has more pairs than colors.
    TooManyPairs(usize),

    /// The path of the pair has less than two cells (start and end would be the same).
    PathTooShort(usize),

    /// A cell of the pair's path is outside the board.
    CellOutOfBounds { pair: usize, cell: Cell },

    /// The path of the pair has non-adjacent steps or visits a cell twice.
    NotSimple(usize),

    /// The path of the pair uses a cell that another pair already uses.
    Overlap { pair: usize, cell: Cell },

    /// The endpoints do not match the ends of the reference path.
    EndpointMismatch(usize),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::BoardSize { width, height } => {
                write!(f, "invalid board size {width}x{height}")
            }
            PuzzleError::NoPairs => write!(f, "the puzzle has no pair"),
            PuzzleError::TooManyPairs(n) => {
                write!(f, "the puzzle has {n} pairs (maximum {MAX_PAIRS})")
            }
            PuzzleError::PathTooShort(p) => write!(f, "the path of pair {p} is too short"),
            PuzzleError::CellOutOfBounds { pair, cell } => {
                write!(f, "cell {cell} of pair {pair} is outside the board")
            }
            PuzzleError::NotSimple(p) => {
                write!(f, "the path of pair {p} is not a simple adjacent path")
            }
            PuzzleError::Overlap { pair, cell } => {
                write!(f, "cell {cell} of pair {pair} is used by another pair")
            }
            PuzzleError::EndpointMismatch(p) => {
                write!(f, "the endpoints of pair {p} do not match its path")
            }
        }
    }
}

impl Error for PuzzleError {}

/// A playable puzzle.
///
/// The pairs only expose their endpoints. The reference paths prove that the puzzle can be
/// solved and are used to compute the difficulty; they are never shown to the player unless the
/// host asks for the solution.
///
/// A deserialized puzzle goes through [`Puzzle::validate`], like the ones built by
/// [`Puzzle::from_paths`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "PuzzleData")]
pub struct Puzzle {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Endpoint pairs. `pairs[i].id == i`.
    pairs: Vec<PairSpec>,

    /// Reference path of each pair. `solution[i]` connects the endpoints of `pairs[i]`.
    solution: Vec<Path>,

    /// Difficulty score of the reference paths.
    difficulty: f64,
}

/// Serialized [`Puzzle`], before the invariants are verified.
#[derive(Deserialize)]
struct PuzzleData {
    width: usize,
    height: usize,
    pairs: Vec<PairSpec>,
    solution: Vec<Path>,
    difficulty: f64,
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = PuzzleError;

    fn try_from(data: PuzzleData) -> Result<Self, Self::Error> {
        let puzzle: Puzzle = Self {
            width: data.width,
            height: data.height,
            pairs: data.pairs,
            solution: data.solution,
            difficulty: data.difficulty,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }
}

impl Puzzle {
    /// Create a [`Puzzle`] object from the reference paths.
    ///
    /// The pair `i` connects the first and last cells of `paths[i]`.
    ///
    /// # Errors
    ///
    /// The method returns an error if the paths do not form a valid puzzle.
    pub fn from_paths(
        width: usize,
        height: usize,
        paths: Vec<Path>,
        scorer: &Scorer,
    ) -> Result<Self, PuzzleError> {
        let mut pairs: Vec<PairSpec> = Vec::with_capacity(paths.len());
        for (id, p) in paths.iter().enumerate() {
            match (p.get_first(), p.get_last()) {
                (Some(start), Some(end)) if p.len() >= 2 => {
                    pairs.push(PairSpec::new(id, start, end));
                }
                _ => return Err(PuzzleError::PathTooShort(id)),
            }
        }
        let difficulty: f64 = scorer.score(width, height, &pairs, &paths);
        let puzzle: Puzzle = Self {
            width,
            height,
            pairs,
            solution: paths,
            difficulty,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Verify the puzzle invariants: simple adjacent paths inside the board, matching
    /// endpoints, and no cell shared between pairs.
    ///
    /// # Errors
    ///
    /// Return the first violation found.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.width)
            || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.height)
        {
            return Err(PuzzleError::BoardSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.pairs.is_empty() {
            return Err(PuzzleError::NoPairs);
        }
        if self.pairs.len() > MAX_PAIRS {
            return Err(PuzzleError::TooManyPairs(self.pairs.len()));
        }

        let mut board: BoardState = BoardState::new(self.width, self.height);
        for (i, pair) in self.pairs.iter().enumerate() {
            let path: &Path = match self.solution.get(i) {
                Some(p) => p,
                None => return Err(PuzzleError::EndpointMismatch(i)),
            };
            if pair.id != i || pair.start == pair.end {
                return Err(PuzzleError::EndpointMismatch(i));
            }
            if path.len() < 2 {
                return Err(PuzzleError::PathTooShort(i));
            }
            if let Some(c) = path.cells().iter().find(|c| !board.in_bounds(**c)) {
                return Err(PuzzleError::CellOutOfBounds { pair: i, cell: *c });
            }
            if !path.is_simple() {
                return Err(PuzzleError::NotSimple(i));
            }
            if !path.is_valid_between(pair.start, pair.end) {
                return Err(PuzzleError::EndpointMismatch(i));
            }
            for c in path.cells() {
                if !board.claim(*c, i) {
                    return Err(PuzzleError::Overlap { pair: i, cell: *c });
                }
            }
        }
        Ok(())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Endpoint pairs.
    pub fn pairs(&self) -> &[PairSpec] {
        &self.pairs
    }

    /// Return the pair with the given ID.
    pub fn pair(&self, pair_id: usize) -> Option<&PairSpec> {
        self.pairs.get(pair_id)
    }

    /// Number of pairs.
    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Difficulty score.
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Reference path of the given pair.
    pub fn solution(&self, pair_id: usize) -> Option<&Path> {
        self.solution.get(pair_id)
    }

    /// Reference paths of all the pairs.
    pub fn solutions(&self) -> &[Path] {
        &self.solution
    }

    /// Return the pair that has the given cell as an endpoint.
    pub fn endpoint_owner(&self, cell: Cell) -> Option<usize> {
        self.pairs
            .iter()
            .find(|p| p.is_endpoint(cell))
            .map(|p| p.id)
    }

    /// Text representation of the board, one line per row.
    ///
    /// Endpoints use the uppercase color tag of their pair. With `show_solution`, the inner
    /// cells of the reference paths use the lowercase tag. Other cells are dots.
    pub fn to_ascii(&self, show_solution: bool) -> String {
        let mut grid: Vec<Vec<char>> = vec![vec!['.'; self.width]; self.height];
        if show_solution {
            for (pair, path) in self.pairs.iter().zip(&self.solution) {
                for c in path.cells() {
                    grid[c.y][c.x] = pair.color.tag().to_ascii_lowercase();
                }
            }
        }
        for pair in &self.pairs {
            for c in [pair.start, pair.end] {
                grid[c.y][c.x] = pair.color.tag();
            }
        }
        grid.iter()
            .map(|row| {
                row.iter()
                    .map(|c| format!("{c} "))
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Build a deterministic puzzle for the given board, which can be used when random generation
/// gives up.
///
/// The cells are ordered in a serpentine (left to right on even rows, right to left on odd rows)
/// and the sequence is cut into `num_pairs` consecutive segments of nearly equal length. Each
/// segment is the reference path of a pair, so the board is entirely filled.
///
/// # Errors
///
/// The method returns an error if the board is too small for the pairs.
pub fn fallback_puzzle(
    width: usize,
    height: usize,
    num_pairs: usize,
    scorer: &Scorer,
) -> Result<Puzzle, PuzzleError> {
    if num_pairs == 0 {
        return Err(PuzzleError::NoPairs);
    }
    let serpentine: Vec<Cell> = (0..height)
        .flat_map(|y| {
            let row: Vec<Cell> = (0..width).map(|x| Cell::new(x, y)).collect();
            if y % 2 == 0 {
                row
            } else {
                row.into_iter().rev().collect()
            }
        })
        .collect();

    let base: usize = serpentine.len() / num_pairs;
    let extra: usize = serpentine.len() % num_pairs;
    let mut paths: Vec<Path> = Vec::with_capacity(num_pairs);
    let mut offset: usize = 0;
    for i in 0..num_pairs {
        let l: usize = base + usize::from(i < extra);
        paths.push(Path::from_cells(&serpentine[offset..offset + l]));
        offset += l;
    }
    Puzzle::from_paths(width, height, paths, scorer)
}
