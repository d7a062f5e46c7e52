/*
generator.rs

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

//! Model, score, and generate puzzles.
//!
//! A puzzle is a rectangular board of [`cell::Cell`] objects with pairs of endpoints
//! ([`pair::PairSpec`]). The player connects each pair with a path of adjacent cells, and the
//! paths of the pairs never share a cell.
//!
//! To generate a puzzle, create a [`puzzle_generator::PuzzleGenerator`] object from a
//! [`puzzles::GeneratorConfig`] object and use its [`puzzle_generator::PuzzleGenerator::generate`]
//! method. Each attempt places the pairs one by one:
//!
//! * A random path represented by a [`path::Path`] object is walked over the free cells of a
//!   [`board::BoardState`] object by a [`random_path::RandomPath`] object.
//!   The two ends of the walk become the endpoints of the pair.
//!
//! * When all the pairs are placed, the result is scored by a [`difficulty::Scorer`] object.
//!   The attempt is kept if the score reaches the minimum difficulty.
//!
//! The walks of an attempt are the reference solution of the puzzle, so every generated puzzle
//! is solvable.
//! If the generation times out or runs out of attempts, the constraints can be relaxed, and
//! [`puzzles::fallback_puzzle`] builds a predefined puzzle that can be used instead.

pub mod board;
pub mod cell;
pub mod difficulty;
pub mod pair;
pub mod path;
pub mod puzzle_generator;
pub mod puzzles;
pub mod random_path;
