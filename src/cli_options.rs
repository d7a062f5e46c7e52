/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator.
//! In command-line mode, Dotlink generates random puzzles and prints them, with their
//! solution, as text or JSON.
//!
//! # Examples
//!
//! Generate a puzzle at the medium difficulty level:
//!
//! ```text
//! $ dotlink -f medium --solution
//! # Sat Oct 17 10:12:31 2026
//! Puzzle 1: 7x7, 5 pairs, difficulty 4.87
//! R r r r B b b
//! G g g r r r b
//! ...
//! ```
//!
//! Generate ten 6x6 puzzles with four pairs on four workers, and print some statistics:
//!
//! ```text
//! $ dotlink --width 6 --height 6 --pairs 4 -c 10 -w 4 -s
//! ```

use chrono::{DateTime, Local};
use clap::Parser;
use log::{LevelFilter, debug};
use serde::Serialize;
use std::time::{Duration, Instant};

use dotlink::config::COPYRIGHT_NOTICE;
use dotlink::generator::difficulty::Scorer;
use dotlink::generator::puzzle_generator::{self, CancelToken, GenerationError, PuzzleGenerator};
use dotlink::generator::puzzles::{Difficulty, GeneratorConfig, Puzzle};

/// Build random Dotlink puzzles for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Difficulty preset. The other options override its parameters
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Number of pairs
    #[arg(short, long)]
    pairs: Option<usize>,

    /// Minimum difficulty score, between 1 and 10. Scores above the board's ceiling are rejected
    #[arg(short, long)]
    min_difficulty: Option<f64>,

    /// Maximum number of attempts per puzzle
    #[arg(short = 'a', long)]
    max_attempts: Option<usize>,

    /// Timeout in seconds per puzzle
    #[arg(short, long)]
    timeout: Option<f64>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Number of workers searching concurrently
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Seed for reproducible generations
    #[arg(long)]
    seed: Option<u64>,

    /// Relax the difficulty, and then use a predefined puzzle, when the generation fails.
    /// Sequential generation only
    #[arg(long, default_value_t = false, conflicts_with = "workers")]
    fallback: bool,

    /// Print the reference solution
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Print the puzzles in JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Build the generation parameters from the preset and the overriding options.
    fn config(&self) -> GeneratorConfig {
        let preset: GeneratorConfig = GeneratorConfig::preset(self.difficulty);
        GeneratorConfig {
            width: self.width.unwrap_or(preset.width),
            height: self.height.unwrap_or(preset.height),
            num_pairs: self.pairs.unwrap_or(preset.num_pairs),
            min_difficulty: self.min_difficulty.unwrap_or(preset.min_difficulty),
            max_attempts: self.max_attempts.unwrap_or(preset.max_attempts),
            // Negative, NaN, and overflowing values are reported as a zero timeout
            timeout: match self.timeout {
                Some(t) => Duration::try_from_secs_f64(t).unwrap_or(Duration::ZERO),
                None => preset.timeout,
            },
        }
    }
}

/// Puzzles printed with `--json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    generated: String,
    config: &'a GeneratorConfig,
    puzzles: &'a [Puzzle],
}

/// Generation statistics printed with `--summary`.
#[derive(Default)]
struct Summary {
    total: f32,
    max: f32,
    attempts: usize,
    errors: usize,
}

/// Generate one puzzle, either with the sequential generator or with parallel workers.
fn generate_one(
    args: &Args,
    config: &GeneratorConfig,
    generator: &mut PuzzleGenerator,
    index: usize,
) -> Result<Puzzle, GenerationError> {
    if args.workers > 1 {
        let seed: Option<u64> = args
            .seed
            .map(|s| s.wrapping_add((index * args.workers) as u64));
        return puzzle_generator::generate_parallel(
            config,
            *generator.scorer(),
            args.workers,
            seed,
            CancelToken::new(),
        );
    }
    if args.fallback {
        generator.generate_with_fallback()
    } else {
        generator.generate()
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    let config: GeneratorConfig = args.config();
    if let Err(e) = config.validate_for(&Scorer::new()) {
        eprintln!("Error: {e}");
        return 2;
    }
    debug!("Configuration: {config:?}");

    let mut generator: PuzzleGenerator = match args.seed {
        Some(s) => PuzzleGenerator::with_seed(config.clone(), s),
        None => PuzzleGenerator::new(config.clone()),
    };

    let mut puzzles: Vec<Puzzle> = Vec::with_capacity(args.count);
    let mut summary: Summary = Summary::default();
    for i in 0..args.count {
        debug!("Puzzle {i}");
        let start: Instant = Instant::now();
        let ret: Result<Puzzle, GenerationError> = generate_one(&args, &config, &mut generator, i);
        let duration: f32 = start.elapsed().as_secs_f32();
        summary.total += duration;
        summary.max = summary.max.max(duration);
        if args.workers <= 1 {
            summary.attempts += generator.attempts;
        }

        match ret {
            Ok(p) => puzzles.push(p),
            Err(e) => {
                summary.errors += 1;
                eprintln!("Puzzle {}: {e}", i + 1);
            }
        }
    }

    let now: DateTime<Local> = Local::now();
    if args.json {
        let output = JsonOutput {
            generated: format!("{}", now.format("%c")),
            config: &config,
            puzzles: &puzzles,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: cannot serialize the puzzles: {e}");
                return 1;
            }
        }
    } else {
        println!("# {}", now.format("%c"));
        for (i, p) in puzzles.iter().enumerate() {
            println!(
                "Puzzle {}: {}x{}, {} pairs, difficulty {:.2}",
                i + 1,
                p.width(),
                p.height(),
                p.num_pairs(),
                p.difficulty()
            );
            println!("{}\n", p.to_ascii(args.solution));
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        let count: f32 = args.count as f32;
        let difficulty: f64 = if puzzles.is_empty() {
            0.0
        } else {
            puzzles.iter().map(|p| p.difficulty()).sum::<f64>() / puzzles.len() as f64
        };
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
average difficulty = {:.2}
            errors = {}",
            summary.total,
            summary.total / count,
            summary.max,
            if args.workers <= 1 {
                format!("{}", summary.attempts / args.count)
            } else {
                String::from("n/a")
            },
            difficulty,
            summary.errors
        );
    }

    if summary.errors > 0 { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotlink::generator::puzzles::ConfigError;

    fn args(line: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(line.iter().copied())
    }

    #[test]
    fn test_options_override_the_preset() {
        let a: Args = args(&["dotlink", "-f", "hard", "-p", "4"]).unwrap();
        let config: GeneratorConfig = a.config();
        assert_eq!(config.width, 9);
        assert_eq!(config.num_pairs, 4);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_timeout() {
        for t in ["1e30", "-1", "0", "NaN"] {
            let option: String = format!("--timeout={t}");
            let a: Args = args(&["dotlink", option.as_str()]).unwrap();
            assert_eq!(a.config().validate(), Err(ConfigError::Timeout), "{t}");
        }
        let a: Args = args(&["dotlink", "--timeout", "0.5"]).unwrap();
        assert_eq!(a.config().timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_unreachable_difficulty() {
        let a: Args = args(&["dotlink", "-m", "9.5"]).unwrap();
        assert!(matches!(
            a.config().validate_for(&Scorer::new()),
            Err(ConfigError::UnreachableDifficulty { .. })
        ));
    }

    #[test]
    fn test_fallback_conflicts_with_workers() {
        assert!(args(&["dotlink", "-w", "4", "--fallback"]).is_err());
        assert!(args(&["dotlink", "--fallback"]).is_ok());
        assert!(args(&["dotlink", "-w", "4"]).is_ok());
    }
}
