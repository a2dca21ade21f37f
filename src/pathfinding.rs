//! Grid pathfinding: A* with a Manhattan heuristic.
//!
//! Movement is 4-directional with unit step cost, so the Manhattan distance
//! is admissible and the search returns true shortest paths. Pathfinding only
//! runs on player commands, never on the per-tick hot path.

use crate::map::{GridCell, GridMap, GRID_SIZE};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Shortest walkable path from `start` to `end`, excluding `start` itself,
/// in start→end order.
///
/// Returns an empty path when either cell is out of bounds, the destination
/// is an obstacle, or no route exists. Equal-cost frontier nodes pop
/// lowest-heuristic first, which keeps the chosen route direct without
/// affecting optimality.
pub fn find_path(map: &GridMap, start: GridCell, end: GridCell) -> Vec<GridCell> {
    if !map.in_bounds(start) || !map.in_bounds(end) || map.is_obstacle(end) {
        return Vec::new();
    }
    if start == end {
        return Vec::new();
    }

    let cell_count = (GRID_SIZE * GRID_SIZE) as usize;
    let idx = |c: GridCell| (c.j * GRID_SIZE + c.i) as usize;

    let mut g_score = vec![u32::MAX; cell_count];
    let mut came_from: Vec<Option<GridCell>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];

    // Open set ordered by (f, h): lowest total estimate first, ties broken
    // toward the node closest to the goal.
    let mut open: BinaryHeap<Reverse<(u32, u32, (i32, i32))>> = BinaryHeap::new();

    let h0 = start.manhattan(end) as u32;
    g_score[idx(start)] = 0;
    open.push(Reverse((h0, h0, (start.i, start.j))));

    while let Some(Reverse((_, _, (ci, cj)))) = open.pop() {
        let current = GridCell::new(ci, cj);
        let current_idx = idx(current);
        if closed[current_idx] {
            continue;
        }
        closed[current_idx] = true;

        if current == end {
            return reconstruct(&came_from, start, end, idx);
        }

        for (di, dj) in NEIGHBOR_OFFSETS {
            let next = GridCell::new(current.i + di, current.j + dj);
            if !map.is_walkable(next) {
                continue;
            }
            let next_idx = idx(next);
            if closed[next_idx] {
                continue;
            }

            let tentative = g_score[current_idx] + 1;
            if tentative < g_score[next_idx] {
                g_score[next_idx] = tentative;
                came_from[next_idx] = Some(current);
                let h = next.manhattan(end) as u32;
                open.push(Reverse((tentative + h, h, (next.i, next.j))));
            }
        }
    }

    Vec::new()
}

/// Walk parent links back from `end`, drop `start`, and reverse into
/// start→end order.
fn reconstruct(
    came_from: &[Option<GridCell>],
    start: GridCell,
    end: GridCell,
    idx: impl Fn(GridCell) -> usize,
) -> Vec<GridCell> {
    let mut path = Vec::new();
    let mut cursor = end;
    while cursor != start {
        path.push(cursor);
        match came_from[idx(cursor)] {
            Some(parent) => cursor = parent,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
