/*
proptest_drag_invariants.rs

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

//! Property-based invariant tests for the drag validator.
//!
//! Random sequences of pointer events are played against a generated puzzle. After every
//! event:
//!
//! 1. No cell belongs to the paths of two pairs (dragged or committed).
//! 2. Every path is made of adjacent cells and never visits a cell twice.
//! 3. No path goes through an endpoint of another pair.
//! 4. The board claims exactly the cells of the completed paths.
//! 5. The number of completed pairs never decreases.
//! 6. A rejected event leaves the paths and the board untouched.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use dotlink::generator::board::BoardState;
use dotlink::generator::path::Path;
use dotlink::{Cell, GeneratorConfig, PairState, Puzzle, PuzzleGenerator, Session};

const SIZE: usize = 5;
const PAIRS: usize = 3;

#[derive(Debug, Clone)]
enum Event {
    Begin(usize, Cell),
    Extend(usize, Cell),
    Retract(usize),
    End(usize),
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn cell_strategy() -> impl Strategy<Value = Cell> {
    (0..SIZE, 0..SIZE).prop_map(|(x, y)| Cell::new(x, y))
}

fn event_strategy() -> impl Strategy<Value = Event> {
    // Pair ID 3 does not exist
    let pair = 0..=PAIRS;
    prop_oneof![
        1 => (pair.clone(), cell_strategy()).prop_map(|(p, c)| Event::Begin(p, c)),
        6 => (pair.clone(), cell_strategy()).prop_map(|(p, c)| Event::Extend(p, c)),
        1 => pair.clone().prop_map(Event::Retract),
        1 => pair.prop_map(Event::End),
    ]
}

fn puzzle(seed: u64) -> Puzzle {
    let config = GeneratorConfig {
        width: SIZE,
        height: SIZE,
        num_pairs: PAIRS,
        min_difficulty: 1.0,
        max_attempts: 200,
        timeout: Duration::from_secs(10),
    };
    PuzzleGenerator::with_seed(config, seed)
        .generate_with_fallback()
        .unwrap()
}

/// Begin events start on an endpoint half of the time, so that drags actually happen.
fn anchor(puzzle: &Puzzle, event: Event, use_endpoint: bool) -> Event {
    match event {
        Event::Begin(id, c) if use_endpoint => match puzzle.pair(id) {
            Some(p) if c.x % 2 == 0 => Event::Begin(id, p.start),
            Some(p) => Event::Begin(id, p.end),
            None => Event::Begin(id, c),
        },
        e => e,
    }
}

fn paths(session: &Session) -> Vec<Path> {
    (0..PAIRS)
        .map(|id| session.drag_path(id).cloned().unwrap_or_default())
        .collect()
}

fn check_invariants(session: &Session, puzzle: &Puzzle) -> Result<(), TestCaseError> {
    let mut owners: HashMap<Cell, usize> = HashMap::new();
    for (id, path) in paths(session).iter().enumerate() {
        prop_assert!(path.is_simple(), "pair {id} is not simple");
        for c in path.cells() {
            let other: Option<usize> = owners.insert(*c, id);
            prop_assert!(other.is_none(), "{c} shared with {other:?}");
            if let Some(o) = puzzle.endpoint_owner(*c) {
                prop_assert_eq!(o, id, "{} is an endpoint of pair {}", c, o);
            }
        }
    }

    let board: &BoardState = session.board();
    for y in 0..SIZE {
        for x in 0..SIZE {
            let c = Cell::new(x, y);
            let committed: Option<usize> = owners
                .get(&c)
                .copied()
                .filter(|id| session.pair_state(*id) == Some(PairState::Completed));
            prop_assert_eq!(board.owner(c), committed, "board disagrees at {}", c);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn drag_invariants_hold(
        seed in 0u64..64,
        events in prop::collection::vec((event_strategy(), any::<bool>()), 1..80),
    ) {
        let p: Puzzle = puzzle(seed);
        let mut session = Session::start(p.clone());
        let mut completed: usize = 0;

        for (event, use_endpoint) in events {
            let event: Event = anchor(&p, event, use_endpoint);
            let before_paths: Vec<Path> = paths(&session);
            let before_board: BoardState = session.board().clone();

            let accepted: bool = match &event {
                Event::Begin(id, c) => session.begin_drag(*id, *c),
                Event::Extend(id, c) => {
                    // Steer half of the extensions next to the last dragged cell
                    let target: Cell = match session.drag_path(*id).and_then(|d| d.get_last()) {
                        Some(last) if c.x % 2 == 0 => {
                            let n: Vec<Cell> = last.neighbors(SIZE, SIZE);
                            n[c.y % n.len()]
                        }
                        _ => *c,
                    };
                    session.extend_drag(*id, target)
                }
                Event::Retract(id) => session.retract_drag(*id),
                Event::End(id) => {
                    session.end_drag(*id);
                    true
                }
            };

            if !accepted {
                prop_assert_eq!(
                    paths(&session),
                    before_paths,
                    "rejected {:?} changed a path",
                    event
                );
                prop_assert_eq!(session.board(), &before_board);
            }
            check_invariants(&session, &p)?;

            prop_assert!(session.completed_pairs() >= completed);
            completed = session.completed_pairs();
        }
    }

    #[test]
    fn released_drags_never_touch_other_pairs(
        seed in 0u64..64,
        route in prop::collection::vec(0usize..4, 0..20),
    ) {
        let p: Puzzle = puzzle(seed);
        let mut session = Session::start(p.clone());

        // Commit pair 0 with its reference path
        let reference: Path = p.solution(0).cloned().unwrap();
        prop_assert!(session.begin_drag(0, reference.cells()[0]));
        for c in &reference.cells()[1..] {
            prop_assert!(session.extend_drag(0, *c));
        }
        session.end_drag(0);
        let committed: BoardState = session.board().clone();

        // Wander with pair 1 and release anywhere
        let mut current: Cell = p.pairs()[1].start;
        prop_assert!(session.begin_drag(1, current));
        for r in route {
            let n: Vec<Cell> = current.neighbors(SIZE, SIZE);
            let next: Cell = n[r % n.len()];
            if session.extend_drag(1, next) {
                current = next;
            }
        }
        session.end_drag(1);

        if session.pair_state(1) == Some(PairState::Completed) {
            for c in committed.cells_of(0) {
                prop_assert_eq!(session.board().owner(c), Some(0));
            }
        } else {
            prop_assert_eq!(session.board(), &committed);
        }
    }
}
