/*
puzzle_generator.rs

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

//! Generate random puzzles.
//!
//! A generation is a sequence of attempts. Each attempt places all the pairs with
//! [`RandomPath`] walks on a fresh [`BoardState`], scores the result, and keeps it if the
//! score reaches the minimum difficulty. Attempts are repeated with new random walks until one
//! succeeds, the maximum number of attempts is reached, the timeout expires, or the host
//! cancels the generation. The timeout and the cancellation are checked between attempts.
//!
//! The host can run a generation in one call with [`PuzzleGenerator::generate`], or drive it
//! attempt by attempt with [`PuzzleGenerator::try_one_attempt`] from its own loop.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::board::BoardState;
use super::difficulty::Scorer;
use super::path::Path;
use super::puzzles::{self, ConfigError, GeneratorConfig, Puzzle};
use super::random_path::RandomPath;
use crate::config::{MIN_DIFFICULTY, MIN_PATH_CELLS};

/// Type of errors.
///
/// Except for [`GenerationError::InfeasibleConfig`], these are expected outcomes: the host
/// relaxes the constraints or uses a fallback puzzle.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The configuration cannot produce a puzzle. Detected before any attempt.
    InfeasibleConfig(ConfigError),

    /// No attempt reached the minimum difficulty.
    AttemptsExhausted,

    /// No puzzle found before the timeout.
    Timeout,

    /// The host cancelled the generation.
    Cancelled,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::InfeasibleConfig(e) => write!(f, "infeasible configuration: {e}"),
            GenerationError::AttemptsExhausted => write!(f, "maximum number of attempts reached"),
            GenerationError::Timeout => write!(f, "generation timeout"),
            GenerationError::Cancelled => write!(f, "generation cancelled"),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenerationError::InfeasibleConfig(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of one generation attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The attempt produced a puzzle. The generation is over.
    Ready(Puzzle),

    /// The attempt failed, but another one can be tried.
    Continue,

    /// The generation is over without a puzzle.
    Failed(GenerationError),
}

/// Generation telemetry.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct GenerationStats {
    /// Number of attempts used by the last generation.
    pub attempts: usize,

    /// Duration in seconds of the last generation.
    pub duration: f32,
}

/// Cancellation flag shared between the host and the generators.
///
/// Clones share the same flag. A child token is also cancelled when its parent is, but
/// cancelling the child leaves the parent untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<CancelToken>>,
}

impl CancelToken {
    /// Create a [`CancelToken`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that is cancelled when this one is.
    pub fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Request the cancellation. Generators stop before their next attempt.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether the cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }
}

/// [`PuzzleGenerator`] object.
pub struct PuzzleGenerator {
    /// Generation parameters.
    config: GeneratorConfig,

    /// Scorer used to accept or reject the attempts.
    scorer: Scorer,

    /// Random generator. Seeded for reproducible generations.
    rng: StdRng,

    /// Cancellation flag.
    cancel: CancelToken,

    /// Number of attempts in the current (or last) generation.
    pub attempts: usize,

    /// Duration in seconds of the current (or last) generation.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`PuzzleGenerator::duration`] and
    /// to enforce the timeout.
    start: Instant,

    /// Whether a generation is in progress. The next attempt after a finished generation starts
    /// a new one.
    in_progress: bool,
}

impl PuzzleGenerator {
    /// Create the object, with a random seed.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create the object with the given seed. The same seed and configuration produce the same
    /// puzzles.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Self {
        Self {
            config,
            scorer: Scorer::new(),
            rng,
            cancel: CancelToken::new(),
            attempts: 0,
            duration: 0.0,
            start: Instant::now(),
            in_progress: false,
        }
    }

    /// Replace the default scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Use a cancellation flag that the host controls.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Return the generation parameters.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Change the generation parameters. A generation in progress is abandoned.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
        self.in_progress = false;
    }

    /// Return the scorer.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Return the telemetry of the current (or last) generation.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            attempts: self.attempts,
            duration: self.duration,
        }
    }

    /// Abandon the generation in progress. The next attempt starts a new generation.
    pub fn restart(&mut self) {
        self.in_progress = false;
    }

    /// Run one attempt of the current generation, starting a new generation if none is in
    /// progress.
    ///
    /// The configuration is verified when a generation starts, including whether the board can
    /// reach the minimum difficulty. The cancellation flag, the timeout, and the number of
    /// attempts are verified before each attempt.
    pub fn try_one_attempt(&mut self) -> AttemptOutcome {
        if !self.in_progress {
            self.attempts = 0;
            self.duration = 0.0;
            self.start = Instant::now();
            if let Err(e) = self.config.validate_for(&self.scorer) {
                debug!("Invalid configuration: {e}");
                return AttemptOutcome::Failed(GenerationError::InfeasibleConfig(e));
            }
            self.in_progress = true;
        }

        let outcome: AttemptOutcome = if self.cancel.is_cancelled() {
            AttemptOutcome::Failed(GenerationError::Cancelled)
        } else if self.start.elapsed() >= self.config.timeout {
            AttemptOutcome::Failed(GenerationError::Timeout)
        } else if self.attempts >= self.config.max_attempts {
            AttemptOutcome::Failed(GenerationError::AttemptsExhausted)
        } else {
            self.attempts += 1;
            match self.attempt() {
                Some(puzzle) => AttemptOutcome::Ready(puzzle),
                None => AttemptOutcome::Continue,
            }
        };

        self.duration = self.start.elapsed().as_secs_f32();
        match &outcome {
            AttemptOutcome::Continue => (),
            AttemptOutcome::Ready(p) => {
                self.in_progress = false;
                info!(
                    "Puzzle {}x{} with {} pairs: difficulty = {:.2}  Attempts = {}  Duration = {}",
                    p.width(),
                    p.height(),
                    p.num_pairs(),
                    p.difficulty(),
                    self.attempts,
                    self.duration
                );
            }
            AttemptOutcome::Failed(e) => {
                self.in_progress = false;
                info!(
                    "Generation failed: {e}  Attempts = {}  Duration = {}",
                    self.attempts, self.duration
                );
            }
        }
        outcome
    }

    /// Generate and return a random puzzle.
    ///
    /// # Errors
    ///
    /// The method returns an error if the configuration is infeasible, if no attempt reaches
    /// the minimum difficulty, if the timeout expires, or if the generation is cancelled.
    pub fn generate(&mut self) -> Result<Puzzle, GenerationError> {
        self.restart();
        loop {
            match self.try_one_attempt() {
                AttemptOutcome::Ready(p) => return Ok(p),
                AttemptOutcome::Continue => (),
                AttemptOutcome::Failed(e) => return Err(e),
            }
        }
    }

    /// Generate a puzzle, and relax the constraints when the generation fails.
    ///
    /// When the configured generation times out or runs out of attempts, a second generation is
    /// run that accepts any difficulty. The two generations share the timeout. If the second one
    /// also fails, or if no time is left for it, a deterministic serpentine puzzle is returned
    /// (see [`puzzles::fallback_puzzle`]).
    ///
    /// # Errors
    ///
    /// The method returns an error only if the configuration is infeasible or the generation is
    /// cancelled.
    pub fn generate_with_fallback(&mut self) -> Result<Puzzle, GenerationError> {
        let start: Instant = Instant::now();
        let err: GenerationError = match self.generate() {
            Ok(p) => return Ok(p),
            Err(e @ (GenerationError::InfeasibleConfig(_) | GenerationError::Cancelled)) => {
                return Err(e);
            }
            Err(e) => e,
        };

        let remaining: Duration = self.config.timeout.saturating_sub(start.elapsed());
        let relaxed: Result<Puzzle, GenerationError> = if remaining.is_zero() {
            Err(err)
        } else {
            warn!(
                "{err} at difficulty {}: retrying at difficulty {MIN_DIFFICULTY}",
                self.config.min_difficulty
            );
            let saved: GeneratorConfig = self.config.clone();
            self.config.min_difficulty = MIN_DIFFICULTY;
            self.config.timeout = remaining;
            let res: Result<Puzzle, GenerationError> = self.generate();
            self.config = saved;
            res
        };

        match relaxed {
            Ok(p) => Ok(p),
            Err(GenerationError::Cancelled) => Err(GenerationError::Cancelled),
            Err(e) => {
                warn!("{e}: using the fallback puzzle");
                puzzles::fallback_puzzle(
                    self.config.width,
                    self.config.height,
                    self.config.num_pairs,
                    &self.scorer,
                )
                .map_err(|_| e)
            }
        }
    }

    /// One generation attempt.
    ///
    /// Return None if a pair cannot be placed or if the difficulty is too low.
    fn attempt(&mut self) -> Option<Puzzle> {
        let num_pairs: usize = self.config.num_pairs;
        let mut board: BoardState = BoardState::new(self.config.width, self.config.height);
        let mut paths: Vec<Path> = Vec::with_capacity(num_pairs);

        debug!("=== Attempt {}", self.attempts);
        for pair_id in 0..num_pairs {
            let remaining: usize = num_pairs - pair_id;
            let free: usize = board.num_cells() - board.claimed_count();

            // Keep enough free cells for the pairs that are not placed yet
            let reserved: usize = (remaining - 1) * MIN_PATH_CELLS;
            if free < reserved + MIN_PATH_CELLS {
                debug!("    Back: not enough free cells for pair {pair_id}");
                return None;
            }
            let max_len: usize = free - reserved;

            // Aim for a fair share of the free cells, so that the board gets filled
            let share: usize = free / remaining;
            let target_min: usize = (share / 2).clamp(MIN_PATH_CELLS, max_len);
            let target_max: usize = (share + share / 2).clamp(MIN_PATH_CELLS, max_len);

            let mut random_path: RandomPath =
                RandomPath::new(MIN_PATH_CELLS, target_max).target_min(target_min);
            match random_path.generate(&board, &mut self.rng) {
                Ok(path) => {
                    if !board.claim_path(&path, pair_id) {
                        warn!("Generated path for pair {pair_id} overlaps another pair");
                        return None;
                    }
                    paths.push(path);
                }
                Err(_) => {
                    debug!("    Back: no room left for pair {pair_id}");
                    return None;
                }
            }
        }

        let puzzle: Puzzle =
            match Puzzle::from_paths(self.config.width, self.config.height, paths, &self.scorer) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Generated puzzle is invalid: {e}");
                    return None;
                }
            };
        if puzzle.difficulty() < self.config.min_difficulty {
            debug!(
                "    Back: difficulty {:.2} below {:.2}",
                puzzle.difficulty(),
                self.config.min_difficulty
            );
            return None;
        }
        Some(puzzle)
    }
}

/// Generate a puzzle with a random seed.
///
/// # Errors
///
/// See [`PuzzleGenerator::generate`].
pub fn generate_puzzle(config: &GeneratorConfig) -> Result<Puzzle, GenerationError> {
    PuzzleGenerator::new(config.clone()).generate()
}

/// Generate a puzzle with several workers searching concurrently.
///
/// Each worker runs its own [`PuzzleGenerator`] on its own board, with its share of the
/// maximum number of attempts and the full timeout. The first puzzle found wins and the other
/// workers stop before their next attempt. With a seed, worker `i` uses `seed + i`; the winner
/// still depends on thread scheduling.
///
/// # Errors
///
/// When every worker fails, the method returns [`GenerationError::Cancelled`] if the host
/// cancelled the generation, [`GenerationError::Timeout`] if a worker timed out, and
/// [`GenerationError::AttemptsExhausted`] otherwise.
pub fn generate_parallel(
    config: &GeneratorConfig,
    scorer: Scorer,
    workers: usize,
    seed: Option<u64>,
    cancel: CancelToken,
) -> Result<Puzzle, GenerationError> {
    config
        .validate_for(&scorer)
        .map_err(GenerationError::InfeasibleConfig)?;

    let workers: usize = workers.clamp(1, config.max_attempts);
    let per_worker: usize = config.max_attempts.div_ceil(workers);
    let (sender, receiver) = async_channel::bounded::<Result<Puzzle, GenerationError>>(workers);
    let stop: CancelToken = cancel.child();

    let mut handles: Vec<thread::JoinHandle<()>> = Vec::with_capacity(workers);
    for w in 0..workers {
        let worker_config: GeneratorConfig = GeneratorConfig {
            max_attempts: per_worker,
            ..config.clone()
        };
        let mut generator: PuzzleGenerator = match seed {
            Some(s) => PuzzleGenerator::with_seed(worker_config, s.wrapping_add(w as u64)),
            None => PuzzleGenerator::new(worker_config),
        }
        .with_scorer(scorer)
        .with_cancel_token(stop.clone());
        let sender = sender.clone();

        handles.push(thread::spawn(move || {
            let res: Result<Puzzle, GenerationError> = generator.generate();
            debug!("Worker {w}: {} attempts", generator.attempts);
            // The receiver is closed once a winner has been selected
            let _ = sender.send_blocking(res);
        }));
    }
    drop(sender);

    let mut winner: Option<Puzzle> = None;
    let mut timed_out: bool = false;
    while let Ok(res) = receiver.recv_blocking() {
        match res {
            Ok(p) => {
                winner = Some(p);
                break;
            }
            Err(GenerationError::Timeout) => timed_out = true,
            Err(_) => (),
        }
    }

    // Stop the other workers
    stop.cancel();
    receiver.close();
    for h in handles {
        if h.join().is_err() {
            warn!("A generation worker panicked");
        }
    }

    match winner {
        Some(p) => Ok(p),
        None if cancel.is_cancelled() => Err(GenerationError::Cancelled),
        None if timed_out => Err(GenerationError::Timeout),
        None => Err(GenerationError::AttemptsExhausted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(
        width: usize,
        height: usize,
        num_pairs: usize,
        min_difficulty: f64,
    ) -> GeneratorConfig {
        GeneratorConfig {
            width,
            height,
            num_pairs,
            min_difficulty,
            max_attempts: 500,
            timeout: Duration::from_secs(10),
        }
    }

    /// Configuration whose minimum difficulty is the ceiling of the board. Random paths never
    /// fill, turn, and interleave enough to reach it.
    fn unreachable(width: usize, height: usize, num_pairs: usize) -> GeneratorConfig {
        let ceiling: f64 = Scorer::new().ceiling(width, height, num_pairs);
        config(width, height, num_pairs, ceiling)
    }

    #[test]
    fn test_generate_easy() {
        let mut generator = PuzzleGenerator::with_seed(config(5, 5, 3, 3.0), 42);
        let puzzle: Puzzle = generator.generate().unwrap();

        assert_eq!(puzzle.num_pairs(), 3);
        assert_eq!(puzzle.validate(), Ok(()));
        assert!(puzzle.difficulty() >= 3.0);
        assert!(generator.stats().attempts >= 1);
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let a: Puzzle = PuzzleGenerator::with_seed(config(6, 6, 4, 2.0), 5)
            .generate()
            .unwrap();
        let b: Puzzle = PuzzleGenerator::with_seed(config(6, 6, 4, 2.0), 5)
            .generate()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_presets_generate() {
        for d in [
            puzzles::Difficulty::Easy,
            puzzles::Difficulty::Medium,
            puzzles::Difficulty::Hard,
        ] {
            let c: GeneratorConfig = GeneratorConfig {
                timeout: Duration::from_secs(30),
                ..GeneratorConfig::preset(d)
            };
            let p: Puzzle = PuzzleGenerator::with_seed(c.clone(), 1).generate().unwrap();
            assert!(p.difficulty() >= c.min_difficulty, "{d}");
        }
    }

    #[test]
    fn test_infeasible_config_makes_no_attempt() {
        let mut generator = PuzzleGenerator::with_seed(config(3, 3, 8, 1.0), 0);
        match generator.generate() {
            Err(GenerationError::InfeasibleConfig(ConfigError::BoardTooSmall { .. })) => (),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(generator.attempts, 0);
    }

    #[test]
    fn test_difficulty_above_ceiling_makes_no_attempt() {
        for (w, h, n) in [(3, 3, 2), (5, 5, 3), (10, 10, 2), (10, 10, 8)] {
            let mut generator = PuzzleGenerator::with_seed(config(w, h, n, 9.0), 0);
            let res: Result<Puzzle, GenerationError> = generator.generate();
            assert!(
                matches!(res, Err(GenerationError::InfeasibleConfig(_))),
                "{w}x{h} with {n} pairs"
            );
            assert_eq!(generator.attempts, 0);
        }
    }

    #[test]
    fn test_generated_scores_stay_below_ceiling() {
        let mut generator = PuzzleGenerator::with_seed(config(6, 6, 3, 1.0), 11);
        let ceiling: f64 = generator.scorer().ceiling(6, 6, 3);
        for _ in 0..20 {
            let p: Puzzle = generator.generate().unwrap();
            assert!(p.difficulty() <= ceiling);
        }
    }

    #[test]
    fn test_unreachable_difficulty_exhausts_attempts() {
        let c: GeneratorConfig = GeneratorConfig {
            max_attempts: 20,
            ..unreachable(4, 4, 2)
        };
        let mut generator = PuzzleGenerator::with_seed(c, 3);
        let res: Result<Puzzle, GenerationError> = generator.generate();
        assert_eq!(res, Err(GenerationError::AttemptsExhausted));
        assert_eq!(generator.attempts, 20);
    }

    #[test]
    fn test_timeout() {
        let c: GeneratorConfig = GeneratorConfig {
            max_attempts: usize::MAX,
            timeout: Duration::from_millis(50),
            ..unreachable(10, 10, 8)
        };
        let mut generator = PuzzleGenerator::with_seed(c, 3);
        assert_eq!(generator.generate(), Err(GenerationError::Timeout));
        assert!(generator.duration >= 0.05);
    }

    #[test]
    fn test_cancel_before_next_attempt() {
        let cancel = CancelToken::new();
        let mut generator = PuzzleGenerator::with_seed(unreachable(5, 5, 3), 3)
            .with_cancel_token(cancel.clone());
        let outcome: AttemptOutcome = generator.try_one_attempt();
        assert!(matches!(outcome, AttemptOutcome::Continue));
        cancel.cancel();
        assert!(matches!(
            generator.try_one_attempt(),
            AttemptOutcome::Failed(GenerationError::Cancelled)
        ));
        assert_eq!(generator.attempts, 1);
    }

    #[test]
    fn test_incremental_attempts() {
        let mut generator = PuzzleGenerator::with_seed(config(5, 5, 3, 1.0), 9);
        // Any placement scores at least 1, so the first successful placement wins
        let mut steps: usize = 0;
        let puzzle: Puzzle = loop {
            steps += 1;
            match generator.try_one_attempt() {
                AttemptOutcome::Ready(p) => break p,
                AttemptOutcome::Continue => (),
                AttemptOutcome::Failed(e) => panic!("unexpected failure {e}"),
            }
        };
        assert_eq!(steps, generator.attempts);
        assert_eq!(puzzle.validate(), Ok(()));

        // The next call starts a new generation
        assert!(matches!(
            generator.try_one_attempt(),
            AttemptOutcome::Ready(_) | AttemptOutcome::Continue
        ));
        assert_eq!(generator.attempts, 1);
    }

    #[test]
    fn test_fallback_on_unreachable_difficulty() {
        let c: GeneratorConfig = GeneratorConfig {
            max_attempts: 10,
            ..unreachable(5, 5, 3)
        };
        let mut generator = PuzzleGenerator::with_seed(c.clone(), 4);
        let puzzle: Puzzle = generator.generate_with_fallback().unwrap();
        assert_eq!(puzzle.num_pairs(), 3);
        assert_eq!(puzzle.validate(), Ok(()));
        // The configuration is restored after the relaxed generation
        assert_eq!(generator.config(), &c);
    }

    #[test]
    fn test_fallback_puzzle_when_no_time_is_left() {
        // The first generation uses the whole timeout, so the relaxed one cannot run
        let c: GeneratorConfig = GeneratorConfig {
            max_attempts: usize::MAX,
            timeout: Duration::from_millis(50),
            ..unreachable(5, 5, 3)
        };
        let mut generator = PuzzleGenerator::with_seed(c.clone(), 4);
        let puzzle: Puzzle = generator.generate_with_fallback().unwrap();

        let serpentine: Puzzle = puzzles::fallback_puzzle(5, 5, 3, &Scorer::new()).unwrap();
        assert_eq!(puzzle, serpentine);
        assert_eq!(generator.config(), &c);
    }

    #[test]
    fn test_fallback_keeps_infeasible_error() {
        let mut generator = PuzzleGenerator::with_seed(config(3, 3, 8, 1.0), 0);
        assert!(matches!(
            generator.generate_with_fallback(),
            Err(GenerationError::InfeasibleConfig(_))
        ));
    }

    #[test]
    fn test_child_cancel_token() {
        let parent = CancelToken::new();
        let child: CancelToken = parent.child();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        let child: CancelToken = parent.child();
        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_parallel_generation() {
        let cancel = CancelToken::new();
        let p: Puzzle = generate_parallel(
            &config(7, 7, 5, 4.0),
            Scorer::new(),
            4,
            Some(17),
            cancel.clone(),
        )
        .unwrap();
        // Stopping the losing workers does not cancel the host token
        assert!(!cancel.is_cancelled());
        assert_eq!(p.num_pairs(), 5);
        assert_eq!(p.validate(), Ok(()));
        assert!(p.difficulty() >= 4.0);
    }

    #[test]
    fn test_parallel_generation_failures() {
        let c: GeneratorConfig = GeneratorConfig {
            max_attempts: 8,
            ..unreachable(4, 4, 2)
        };
        assert_eq!(
            generate_parallel(&c, Scorer::new(), 3, Some(1), CancelToken::new()),
            Err(GenerationError::AttemptsExhausted)
        );

        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            generate_parallel(&config(5, 5, 3, 3.0), Scorer::new(), 2, None, cancel),
            Err(GenerationError::Cancelled)
        );
    }
}
