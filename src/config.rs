/*
config.rs

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

//! Build-wide constants and bounds of the configuration knobs.

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Copyright notice printed by `dotlink --version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/>"
);

/// Smallest board width or height.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest board width or height.
pub const MAX_BOARD_SIZE: usize = 10;

/// Smallest number of pairs in a puzzle.
pub const MIN_PAIRS: usize = 2;

/// Largest number of pairs in a puzzle. There is one [`crate::generator::pair::PairColor`] per
/// pair.
pub const MAX_PAIRS: usize = 8;

/// Lowest value of the minimum difficulty knob.
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Highest value of the minimum difficulty knob.
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Minimum number of cells in a generated path, endpoints included (two steps).
pub const MIN_PATH_CELLS: usize = 3;
