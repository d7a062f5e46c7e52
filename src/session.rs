/*
session.rs

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

//! Manage the status of a game in progress.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::generator::board::BoardState;
use crate::generator::cell::Cell;
use crate::generator::path::Path;
use crate::generator::puzzle_generator::{
    AttemptOutcome, GenerationError, GenerationStats, PuzzleGenerator,
};
use crate::generator::puzzles::Puzzle;
use crate::player_input::{PairResult, PairState, PlayerInput};

/// Status of the session.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No puzzle is available.
    #[default]
    NoPuzzle,

    /// A puzzle is being generated.
    Generating,

    /// A puzzle is being played.
    Ready,

    /// All the pairs of the puzzle are connected.
    AllComplete,
}

/// Result of one generation step.
#[derive(Debug, PartialEq)]
pub enum GenerationStep {
    /// The new puzzle is ready to be played.
    Ready,

    /// The generation is still in progress.
    Continue,

    /// The generation failed. The session has no puzzle.
    Failed(GenerationError),
}

/// Inconsistency found in a restored session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The state does not match the presence of a puzzle.
    State(SessionState),

    /// The board or the drags do not match the puzzle.
    Progress,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::State(s) => write!(f, "state {s:?} does not match the puzzle"),
            SessionError::Progress => write!(f, "the drags do not match the puzzle"),
        }
    }
}

impl Error for SessionError {}

/// Manage the status of the game in progress.
///
/// A deserialized session is verified: its drags and its board must match its puzzle.
#[derive(Serialize, Deserialize, Debug)]
#[serde(try_from = "SessionData")]
pub struct Session {
    state: SessionState,

    /// Puzzle being played.
    puzzle: Option<Puzzle>,

    /// Cells claimed by the completed pairs.
    board: BoardState,

    /// Drags of the player.
    player_input: PlayerInput,

    /// Telemetry of the last generation.
    stats: GenerationStats,

    /// Time when the puzzle was started. Used to compute game duration.
    #[serde(skip, default = "Instant::now")]
    start_time: Instant,
}

/// Serialized [`Session`], before its consistency is verified.
#[derive(Deserialize)]
struct SessionData {
    state: SessionState,
    puzzle: Option<Puzzle>,
    board: BoardState,
    player_input: PlayerInput,
    stats: GenerationStats,
}

impl TryFrom<SessionData> for Session {
    type Error = SessionError;

    fn try_from(data: SessionData) -> Result<Self, Self::Error> {
        let mut session: Session = Self::new();
        session.stats = data.stats;
        session.state = data.state;
        match (data.puzzle, data.state) {
            (None, SessionState::NoPuzzle | SessionState::Generating) => (),
            (Some(p), SessionState::Ready | SessionState::AllComplete) => {
                if !data.player_input.is_consistent(&p, &data.board) {
                    return Err(SessionError::Progress);
                }
                let complete: bool = data.player_input.is_puzzle_complete();
                if complete != (data.state == SessionState::AllComplete) {
                    return Err(SessionError::State(data.state));
                }
                session.puzzle = Some(p);
                session.board = data.board;
                session.player_input = data.player_input;
            }
            (_, state) => return Err(SessionError::State(state)),
        }
        Ok(session)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a [`Session`] object without puzzle.
    pub fn new() -> Self {
        Self {
            state: SessionState::NoPuzzle,
            puzzle: None,
            board: BoardState::new(0, 0),
            player_input: PlayerInput::default(),
            stats: GenerationStats::default(),
            start_time: Instant::now(),
        }
    }

    /// Create a [`Session`] object for playing the given puzzle.
    pub fn start(puzzle: Puzzle) -> Self {
        let mut session: Session = Self::new();
        session.set_puzzle(puzzle);
        session
    }

    /// Replace the puzzle and start playing it.
    fn set_puzzle(&mut self, puzzle: Puzzle) {
        self.board = BoardState::new(puzzle.width(), puzzle.height());
        self.player_input = PlayerInput::new(puzzle.num_pairs());
        self.puzzle = Some(puzzle);
        self.state = SessionState::Ready;
        self.start_time = Instant::now();
    }

    /// Discard the current puzzle.
    fn clear(&mut self) {
        self.puzzle = None;
        self.board = BoardState::new(0, 0);
        self.player_input = PlayerInput::default();
    }

    /// Generate a new puzzle and start playing it.
    ///
    /// The current puzzle is discarded first. On failure, the session has no puzzle.
    ///
    /// # Errors
    ///
    /// The method returns the error of the generator. See [`PuzzleGenerator::generate`].
    pub fn new_puzzle(&mut self, generator: &mut PuzzleGenerator) -> Result<(), GenerationError> {
        self.begin_generation();
        generator.restart();
        loop {
            match self.step_generation(generator) {
                GenerationStep::Ready => return Ok(()),
                GenerationStep::Continue => (),
                GenerationStep::Failed(e) => return Err(e),
            }
        }
    }

    /// Discard the current puzzle and enter the [`SessionState::Generating`] state.
    ///
    /// The host then calls [`Session::step_generation`] from its own loop, for example between
    /// two frames.
    pub fn begin_generation(&mut self) {
        self.clear();
        self.state = SessionState::Generating;
        self.stats = GenerationStats::default();
    }

    /// Run one generation attempt.
    ///
    /// The generation is started with [`Session::begin_generation`] if the session is not in
    /// the [`SessionState::Generating`] state.
    pub fn step_generation(&mut self, generator: &mut PuzzleGenerator) -> GenerationStep {
        if self.state != SessionState::Generating {
            self.begin_generation();
            generator.restart();
        }

        let outcome: AttemptOutcome = generator.try_one_attempt();
        self.stats = generator.stats();
        match outcome {
            AttemptOutcome::Ready(puzzle) => {
                self.set_puzzle(puzzle);
                GenerationStep::Ready
            }
            AttemptOutcome::Continue => GenerationStep::Continue,
            AttemptOutcome::Failed(e) => {
                warn!("No puzzle: {e}");
                self.state = SessionState::NoPuzzle;
                GenerationStep::Failed(e)
            }
        }
    }

    /// Restart the current puzzle with an empty board.
    ///
    /// Return `false` if the session has no puzzle.
    pub fn reset_puzzle(&mut self) -> bool {
        if self.puzzle.is_none() || self.state == SessionState::Generating {
            return false;
        }
        self.board.clear();
        self.player_input.clear();
        self.state = SessionState::Ready;
        self.start_time = Instant::now();
        debug!("Puzzle reset");
        true
    }

    /// Start dragging the given pair from one of its endpoints.
    ///
    /// See [`PlayerInput::begin_drag`]. Drags are rejected unless the session is in the
    /// [`SessionState::Ready`] state.
    pub fn begin_drag(&mut self, pair_id: usize, cell: Cell) -> bool {
        match (&self.puzzle, self.state) {
            (Some(p), SessionState::Ready) => self.player_input.begin_drag(p, pair_id, cell),
            _ => false,
        }
    }

    /// Extend the drag of the given pair to the cell. See [`PlayerInput::extend_drag`].
    pub fn extend_drag(&mut self, pair_id: usize, cell: Cell) -> bool {
        match (&self.puzzle, self.state) {
            (Some(p), SessionState::Ready) => {
                self.player_input.extend_drag(p, &self.board, pair_id, cell)
            }
            _ => false,
        }
    }

    /// Drop the last dragged cell of the pair. See [`PlayerInput::retract_drag`].
    pub fn retract_drag(&mut self, pair_id: usize) -> bool {
        self.state == SessionState::Ready && self.player_input.retract_drag(pair_id)
    }

    /// Release the drag of the pair. See [`PlayerInput::end_drag`].
    ///
    /// When the last pair is completed, the session enters the [`SessionState::AllComplete`]
    /// state.
    pub fn end_drag(&mut self, pair_id: usize) -> PairResult {
        let Some(p) = &self.puzzle else {
            return PairResult::Reverted;
        };
        if self.state != SessionState::Ready {
            return PairResult::Reverted;
        }
        let res: PairResult = self.player_input.end_drag(p, &mut self.board, pair_id);
        if res == PairResult::Completed && self.player_input.is_puzzle_complete() {
            self.state = SessionState::AllComplete;
            info!("Puzzle solved in {}s", self.start_time.elapsed().as_secs());
        }
        res
    }

    /// Whether all the pairs of the puzzle are connected.
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::AllComplete
    }

    /// Return the status of the session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Return the puzzle being played.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Return the cells claimed by the completed pairs.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Return the state of the given pair.
    pub fn pair_state(&self, pair_id: usize) -> Option<PairState> {
        self.player_input.state(pair_id)
    }

    /// Return the cells dragged so far for the given pair, or its committed path.
    pub fn drag_path(&self, pair_id: usize) -> Option<&Path> {
        self.player_input.path(pair_id)
    }

    /// Return the number of completed pairs.
    pub fn completed_pairs(&self) -> usize {
        self.player_input.completed_count()
    }

    /// Return the telemetry of the last generation.
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Return the time spent on the current puzzle.
    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::Scorer;
    use crate::generator::puzzles::GeneratorConfig;

    // R r B
    // r r b
    // R B b
    fn puzzle() -> Puzzle {
        Puzzle::from_paths(
            3,
            3,
            vec![
                Path::from_coordinates(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)]),
                Path::from_coordinates(&[(2, 0), (2, 1), (2, 2), (1, 2)]),
            ],
            &Scorer::new(),
        )
        .unwrap()
    }

    fn connect(session: &mut Session, pair_id: usize) -> PairResult {
        let path: Path = session.puzzle().unwrap().solution(pair_id).unwrap().clone();
        let cells: &[Cell] = path.cells();
        assert!(session.begin_drag(pair_id, cells[0]));
        for c in &cells[1..] {
            assert!(session.extend_drag(pair_id, *c));
        }
        session.end_drag(pair_id)
    }

    #[test]
    fn test_new_session_has_no_puzzle() {
        let mut s = Session::new();
        assert_eq!(s.state(), SessionState::NoPuzzle);
        assert!(s.puzzle().is_none());
        assert!(!s.begin_drag(0, Cell::new(0, 0)));
        assert_eq!(s.end_drag(0), PairResult::Reverted);
        assert!(!s.reset_puzzle());
        assert!(!s.is_complete());
    }

    #[test]
    fn test_play_to_completion() {
        let mut s = Session::start(puzzle());
        assert_eq!(s.state(), SessionState::Ready);

        assert_eq!(connect(&mut s, 1), PairResult::Completed);
        assert_eq!(s.completed_pairs(), 1);
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.board().owner(Cell::new(2, 2)), Some(1));

        assert_eq!(connect(&mut s, 0), PairResult::Completed);
        assert!(s.is_complete());
        assert_eq!(s.pair_state(0), Some(PairState::Completed));

        // The session is inert until the puzzle is reset
        assert!(!s.begin_drag(0, Cell::new(0, 0)));
        assert!(s.reset_puzzle());
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.completed_pairs(), 0);
        assert_eq!(s.board().claimed_count(), 0);
        assert!(s.drag_path(0).unwrap().is_empty());
    }

    #[test]
    fn test_reverted_drag() {
        let mut s = Session::start(puzzle());
        assert!(s.begin_drag(0, Cell::new(0, 2)));
        assert!(s.extend_drag(0, Cell::new(0, 1)));
        assert!(s.extend_drag(0, Cell::new(1, 1)));
        assert!(s.retract_drag(0));
        assert_eq!(s.drag_path(0).unwrap().len(), 2);
        assert_eq!(s.end_drag(0), PairResult::Reverted);
        assert_eq!(s.pair_state(0), Some(PairState::Unstarted));
        assert_eq!(s.board().claimed_count(), 0);
    }

    #[test]
    fn test_new_puzzle() {
        let mut generator = PuzzleGenerator::with_seed(GeneratorConfig::default(), 5);
        let mut s = Session::new();
        assert_eq!(s.new_puzzle(&mut generator), Ok(()));
        assert_eq!(s.state(), SessionState::Ready);
        assert!(s.stats().attempts >= 1);

        let p: Puzzle = s.puzzle().unwrap().clone();
        for id in 0..p.num_pairs() {
            assert_eq!(connect(&mut s, id), PairResult::Completed);
        }
        assert!(s.is_complete());
    }

    #[test]
    fn test_failed_generation_leaves_no_puzzle() {
        // Random boards never reach the ceiling
        let config = GeneratorConfig {
            min_difficulty: Scorer::new().ceiling(5, 5, 3),
            max_attempts: 5,
            ..GeneratorConfig::default()
        };
        let mut generator = PuzzleGenerator::with_seed(config, 5);
        let mut s = Session::start(puzzle());
        assert_eq!(
            s.new_puzzle(&mut generator),
            Err(GenerationError::AttemptsExhausted)
        );
        assert_eq!(s.state(), SessionState::NoPuzzle);
        assert!(s.puzzle().is_none());
        assert_eq!(s.stats().attempts, 5);
    }

    #[test]
    fn test_step_generation() {
        let mut generator = PuzzleGenerator::with_seed(GeneratorConfig::default(), 9);
        let mut s = Session::start(puzzle());
        s.begin_generation();
        assert_eq!(s.state(), SessionState::Generating);
        assert!(s.puzzle().is_none());
        assert!(!s.begin_drag(0, Cell::new(0, 0)));
        assert!(!s.reset_puzzle());

        let mut steps: usize = 0;
        loop {
            steps += 1;
            match s.step_generation(&mut generator) {
                GenerationStep::Ready => break,
                GenerationStep::Continue => assert_eq!(s.state(), SessionState::Generating),
                GenerationStep::Failed(e) => panic!("generation failed: {e}"),
            }
        }
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.stats().attempts, steps);
    }

    #[test]
    fn test_restore_session() {
        let mut s = Session::start(puzzle());
        assert_eq!(connect(&mut s, 0), PairResult::Completed);
        assert!(s.begin_drag(1, Cell::new(2, 0)));
        assert!(s.extend_drag(1, Cell::new(2, 1)));

        let json: String = serde_json::to_string(&s).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), SessionState::Ready);
        assert_eq!(restored.completed_pairs(), 1);
        assert_eq!(restored.board(), s.board());
        assert_eq!(restored.drag_path(1), s.drag_path(1));

        let empty: String = serde_json::to_string(&Session::new()).unwrap();
        let restored: Session = serde_json::from_str(&empty).unwrap();
        assert_eq!(restored.state(), SessionState::NoPuzzle);
    }

    #[test]
    fn test_restore_rejects_inconsistent_session() {
        let mut s = Session::start(puzzle());
        assert_eq!(connect(&mut s, 0), PairResult::Completed);
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();

        // Endpoint outside the board
        let mut bad: serde_json::Value = v.clone();
        bad["puzzle"]["pairs"][0]["start"] = serde_json::json!({ "x": 9, "y": 9 });
        bad["puzzle"]["solution"][0][0] = serde_json::json!({ "x": 9, "y": 9 });
        assert!(serde_json::from_value::<Session>(bad).is_err());

        // Playing without a puzzle
        let mut bad: serde_json::Value = v.clone();
        bad["puzzle"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<Session>(bad).is_err());

        // Completed pair missing from the board
        let mut bad: serde_json::Value = v.clone();
        bad["board"] = serde_json::to_value(BoardState::new(3, 3)).unwrap();
        assert!(serde_json::from_value::<Session>(bad).is_err());

        // Pair 1 is not connected yet
        let mut bad: serde_json::Value = v;
        bad["state"] = serde_json::json!("AllComplete");
        assert!(serde_json::from_value::<Session>(bad).is_err());
    }
}
