/*
lib.rs

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

//! Generate and play dot-pair connection puzzles.
//!
//! A puzzle is a grid with pairs of colored endpoints. The player connects each pair with a
//! path of adjacent cells, and paths never cross.
//!
//! The host (a game front end) generates a puzzle with [`generate_puzzle`], starts a
//! [`Session`] with it, and forwards the pointer events to [`Session::begin_drag`],
//! [`Session::extend_drag`], and [`Session::end_drag`] until [`Session::is_complete`].

pub mod config;
pub mod generator;
pub mod player_input;
pub mod session;

pub use generator::cell::Cell;
pub use generator::puzzle_generator::{
    CancelToken, GenerationError, PuzzleGenerator, generate_parallel, generate_puzzle,
};
pub use generator::puzzles::{Difficulty, GeneratorConfig, Puzzle};
pub use player_input::{PairResult, PairState};
pub use session::{Session, SessionError, SessionState};
