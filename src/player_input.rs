/*
player_input.rs

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

//! Manage the player's drags.
//!
//! The player connects a pair by dragging from one endpoint to the other.
//! The host forwards the pointer events: [`PlayerInput::begin_drag`] when the pointer is
//! pressed on an endpoint, [`PlayerInput::extend_drag`] each time the pointer enters a new cell,
//! and [`PlayerInput::end_drag`] when the pointer is released.
//!
//! Illegal moves are not errors: the methods return `false` and nothing changes, so the host
//! can forward every pointer event and ignore the rejected ones.
//! The committed paths are recorded in a [`BoardState`]; paths being dragged are not, so that
//! a reverted drag leaves the board exactly as it was.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::generator::board::BoardState;
use crate::generator::cell::Cell;
use crate::generator::pair::PairSpec;
use crate::generator::path::Path;
use crate::generator::puzzles::Puzzle;

/// Progress of a pair.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PairState {
    /// No drag in progress.
    #[default]
    Unstarted,

    /// A drag is in progress.
    InProgress,

    /// A drag is in progress and its last extension was rejected. The next accepted extension
    /// or a new drag returns the pair to [`PairState::InProgress`].
    Rejected,

    /// The pair is connected. Final until the puzzle is reset.
    Completed,
}

impl PairState {
    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, PairState::InProgress | PairState::Rejected)
    }
}

/// Result of releasing a drag.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PairResult {
    /// The drag reached the opposite endpoint and the path is committed.
    Completed,

    /// The drag is discarded.
    Reverted,
}

/// Drag status of one pair.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct PairProgress {
    state: PairState,

    /// Cells dragged so far, starting at the endpoint where the drag began. For a completed
    /// pair, the committed path.
    path: Path,
}

/// Manage the drags of all the pairs of a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Progress of each pair, indexed by pair ID.
    progress: Vec<PairProgress>,
}

impl PlayerInput {
    /// Create a [`PlayerInput`] object for a puzzle with the given number of pairs.
    pub fn new(num_pairs: usize) -> Self {
        Self {
            progress: vec![PairProgress::default(); num_pairs],
        }
    }

    /// Reset all the pairs to [`PairState::Unstarted`].
    pub fn clear(&mut self) {
        for p in self.progress.iter_mut() {
            p.state = PairState::Unstarted;
            p.path.clear();
        }
    }

    /// Return the state of the given pair.
    pub fn state(&self, pair_id: usize) -> Option<PairState> {
        self.progress.get(pair_id).map(|p| p.state)
    }

    /// Return the cells dragged so far for the given pair (the committed path once the pair is
    /// completed). The path is empty when the pair is [`PairState::Unstarted`].
    pub fn path(&self, pair_id: usize) -> Option<&Path> {
        self.progress.get(pair_id).map(|p| &p.path)
    }

    /// Number of completed pairs.
    pub fn completed_count(&self) -> usize {
        self.progress
            .iter()
            .filter(|p| p.state == PairState::Completed)
            .count()
    }

    /// Whether every pair is completed.
    pub fn is_puzzle_complete(&self) -> bool {
        !self.progress.is_empty()
            && self
                .progress
                .iter()
                .all(|p| p.state == PairState::Completed)
    }

    /// Start dragging the given pair from one of its endpoints.
    ///
    /// A drag already in progress for the pair is discarded and restarted.
    /// Return `false`, and change nothing, if the cell is not an endpoint of the pair or if the
    /// pair is already completed.
    pub fn begin_drag(&mut self, puzzle: &Puzzle, pair_id: usize, cell: Cell) -> bool {
        let pair: &PairSpec = match puzzle.pair(pair_id) {
            Some(p) => p,
            None => return false,
        };
        let progress: &mut PairProgress = match self.progress.get_mut(pair_id) {
            Some(p) => p,
            None => return false,
        };
        if progress.state == PairState::Completed || !pair.is_endpoint(cell) {
            debug!("Drag of pair {pair_id} from {cell} rejected");
            return false;
        }
        progress.path.clear();
        progress.path.push(cell);
        progress.state = PairState::InProgress;
        debug!("Drag of pair {pair_id} started at {cell}");
        true
    }

    /// Extend the drag of the given pair to the cell.
    ///
    /// The extension is accepted if the pair is being dragged, the drag has not reached the
    /// opposite endpoint yet, and the cell:
    ///
    /// * is adjacent to the last dragged cell,
    /// * is not already in the drag (no self-crossing),
    /// * is not claimed by another pair on the board,
    /// * is not an endpoint of another pair,
    /// * is not in the drag of another pair.
    ///
    /// A rejected extension only sets the pair to [`PairState::Rejected`].
    pub fn extend_drag(
        &mut self,
        puzzle: &Puzzle,
        board: &BoardState,
        pair_id: usize,
        cell: Cell,
    ) -> bool {
        let accepted: bool = self.is_extension_legal(puzzle, board, pair_id, cell);
        let Some(progress) = self.progress.get_mut(pair_id) else {
            return false;
        };
        if !progress.state.is_dragging() {
            return false;
        }
        if accepted {
            progress.path.push(cell);
            progress.state = PairState::InProgress;
        } else {
            debug!("Extension of pair {pair_id} to {cell} rejected");
            progress.state = PairState::Rejected;
        }
        accepted
    }

    /// Whether extending the drag of the pair to the cell is a legal move.
    fn is_extension_legal(
        &self,
        puzzle: &Puzzle,
        board: &BoardState,
        pair_id: usize,
        cell: Cell,
    ) -> bool {
        let (Some(pair), Some(progress)) = (puzzle.pair(pair_id), self.progress.get(pair_id))
        else {
            return false;
        };
        if !progress.state.is_dragging() {
            return false;
        }
        let (Some(first), Some(last)) = (progress.path.get_first(), progress.path.get_last())
        else {
            return false;
        };

        // The drag already reached the opposite endpoint
        if progress.path.len() > 1 && pair.opposite(first) == Some(last) {
            return false;
        }
        if !board.in_bounds(cell) || !last.is_adjacent(cell) || progress.path.contains(cell) {
            return false;
        }
        if board.owner(cell).is_some_and(|o| o != pair_id) {
            return false;
        }
        if puzzle.endpoint_owner(cell).is_some_and(|o| o != pair_id) {
            return false;
        }
        !self
            .progress
            .iter()
            .enumerate()
            .any(|(id, p)| id != pair_id && p.state.is_dragging() && p.path.contains(cell))
    }

    /// Drop the last dragged cell of the pair, for example when the pointer goes back.
    ///
    /// The endpoint where the drag started is never dropped. Return `false` if there is nothing
    /// to drop.
    pub fn retract_drag(&mut self, pair_id: usize) -> bool {
        match self.progress.get_mut(pair_id) {
            Some(p) if p.state.is_dragging() && p.path.len() > 1 => {
                p.path.pop();
                p.state = PairState::InProgress;
                true
            }
            _ => false,
        }
    }

    /// Release the drag of the pair.
    ///
    /// If the drag ends on the opposite endpoint, its cells are claimed on the board and the
    /// pair is completed. Otherwise the drag is discarded and the board is not modified.
    pub fn end_drag(
        &mut self,
        puzzle: &Puzzle,
        board: &mut BoardState,
        pair_id: usize,
    ) -> PairResult {
        let (Some(pair), Some(progress)) = (puzzle.pair(pair_id), self.progress.get_mut(pair_id))
        else {
            return PairResult::Reverted;
        };
        if !progress.state.is_dragging() {
            return PairResult::Reverted;
        }

        let connected: bool = match (progress.path.get_first(), progress.path.get_last()) {
            (Some(first), Some(last)) => {
                progress.path.len() > 1 && pair.opposite(first) == Some(last)
            }
            _ => false,
        };
        if connected && board.claim_path(&progress.path, pair_id) {
            progress.state = PairState::Completed;
            debug!(
                "Pair {pair_id} completed with {} cells",
                progress.path.len()
            );
            return PairResult::Completed;
        }

        debug!("Drag of pair {pair_id} reverted");
        progress.path.clear();
        progress.state = PairState::Unstarted;
        PairResult::Reverted
    }

    /// Whether the drags are possible on the puzzle, with `board` holding exactly the paths of
    /// the completed pairs.
    ///
    /// A restored session uses it to reject saved drags that do not match their puzzle.
    pub fn is_consistent(&self, puzzle: &Puzzle, board: &BoardState) -> bool {
        if self.progress.len() != puzzle.num_pairs() {
            return false;
        }
        let mut used: BoardState = BoardState::new(puzzle.width(), puzzle.height());
        let mut committed: BoardState = BoardState::new(puzzle.width(), puzzle.height());
        for (pair, progress) in puzzle.pairs().iter().zip(&self.progress) {
            let path: &Path = &progress.path;
            let first: Option<Cell> = path.get_first();
            let valid: bool = match progress.state {
                PairState::Unstarted => path.is_empty(),
                PairState::InProgress | PairState::Rejected => {
                    first.is_some_and(|c| pair.is_endpoint(c)) && path.is_simple()
                }
                PairState::Completed => {
                    path.len() > 1
                        && first.and_then(|c| pair.opposite(c)) == path.get_last()
                        && path.is_simple()
                }
            };
            if !valid || !used.claim_path(path, pair.id) {
                return false;
            }
            if path
                .cells()
                .iter()
                .any(|c| puzzle.endpoint_owner(*c).is_some_and(|o| o != pair.id))
            {
                return false;
            }
            if progress.state == PairState::Completed {
                committed.claim_path(path, pair.id);
            }
        }
        committed == *board
    }
}
