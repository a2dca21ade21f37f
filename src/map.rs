//! Walkability grid for the battlefield.
//!
//! The map is a fixed `GRID_SIZE` × `GRID_SIZE` matrix of cells, each
//! `CELL_SIZE` world units square, rebuilt from scratch on every reset.
//! Cells are walkable unless marked as obstacles; after construction the
//! grid is only read.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Grid edge length in cells.
pub const GRID_SIZE: i32 = 30;

/// Cell edge length in world units.
pub const CELL_SIZE: f32 = 20.0;

/// World edge length in world units (square world).
pub const WORLD_SIZE: f32 = GRID_SIZE as f32 * CELL_SIZE;

/// A grid coordinate. May lie outside the map; bounds are checked by
/// [`GridMap::in_bounds`] rather than at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
}

impl GridCell {
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: GridCell) -> i32 {
        (self.i - other.i).abs() + (self.j - other.j).abs()
    }
}

/// Static walkability grid.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GridMap {
    /// Obstacle flags, row-major (`j * GRID_SIZE + i`).
    obstacles: Vec<bool>,
}

impl GridMap {
    /// Fully walkable map.
    pub fn open() -> Self {
        Self {
            obstacles: vec![false; (GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    /// The standard battlefield: a horizontal wall across the middle row,
    /// spanning the center half of the grid, with a two-cell gap so the two
    /// halves stay connected.
    pub fn with_center_wall() -> Self {
        let mut map = Self::open();
        let wall_j = GRID_SIZE / 2;
        let gap_a = GRID_SIZE / 2;
        let gap_b = gap_a + 1;
        for i in GRID_SIZE / 4..GRID_SIZE * 3 / 4 {
            if i != gap_a && i != gap_b {
                map.set_obstacle(GridCell::new(i, wall_j), true);
            }
        }
        map
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some((cell.j * GRID_SIZE + cell.i) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.i >= 0 && cell.j >= 0 && cell.i < GRID_SIZE && cell.j < GRID_SIZE
    }

    /// Out-of-bounds cells are reported as obstacles.
    pub fn is_obstacle(&self, cell: GridCell) -> bool {
        match self.index(cell) {
            Some(idx) => self.obstacles[idx],
            None => true,
        }
    }

    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }

    pub fn set_obstacle(&mut self, cell: GridCell, value: bool) {
        if let Some(idx) = self.index(cell) {
            self.obstacles[idx] = value;
        }
    }

    /// Convert a world position to its containing cell (floor division).
    /// Positions outside the world map to out-of-bounds cells.
    pub fn world_to_grid(x: f32, y: f32) -> GridCell {
        GridCell::new(
            (x / CELL_SIZE).floor() as i32,
            (y / CELL_SIZE).floor() as i32,
        )
    }

    /// World position of a cell's center.
    pub fn cell_center(cell: GridCell) -> (f32, f32) {
        (
            cell.i as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            cell.j as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }

    /// Iterate all obstacle cells (for drawing).
    pub fn obstacle_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..GRID_SIZE).flat_map(move |j| {
            (0..GRID_SIZE)
                .map(move |i| GridCell::new(i, j))
                .filter(|c| self.is_obstacle(*c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_map_fully_walkable() {
        let map = GridMap::open();
        for j in 0..GRID_SIZE {
            for i in 0..GRID_SIZE {
                assert!(map.is_walkable(GridCell::new(i, j)));
            }
        }
    }

    #[test]
    fn test_center_wall_has_two_cell_gap() {
        let map = GridMap::with_center_wall();
        let wall_j = GRID_SIZE / 2;

        // Gap cells stay open.
        assert!(map.is_walkable(GridCell::new(15, wall_j)));
        assert!(map.is_walkable(GridCell::new(16, wall_j)));

        // The rest of the wall span is blocked.
        assert!(map.is_obstacle(GridCell::new(7, wall_j)));
        assert!(map.is_obstacle(GridCell::new(14, wall_j)));
        assert!(map.is_obstacle(GridCell::new(21, wall_j)));

        // Outside the span the row is open.
        assert!(map.is_walkable(GridCell::new(6, wall_j)));
        assert!(map.is_walkable(GridCell::new(22, wall_j)));

        // Only the wall row carries obstacles.
        assert!(map.obstacle_cells().all(|c| c.j == wall_j));
    }

    #[test]
    fn test_world_to_grid_floors() {
        assert_eq!(GridMap::world_to_grid(0.0, 0.0), GridCell::new(0, 0));
        assert_eq!(GridMap::world_to_grid(19.9, 19.9), GridCell::new(0, 0));
        assert_eq!(GridMap::world_to_grid(20.0, 39.9), GridCell::new(1, 1));
        assert_eq!(GridMap::world_to_grid(599.0, 599.0), GridCell::new(29, 29));
        // Outside the canvas lands out of bounds.
        assert_eq!(GridMap::world_to_grid(-1.0, 0.0), GridCell::new(-1, 0));
        assert!(!GridMap::open().in_bounds(GridMap::world_to_grid(650.0, 0.0)));
    }

    #[test]
    fn test_cell_center_roundtrip() {
        let cell = GridCell::new(3, 7);
        let (x, y) = GridMap::cell_center(cell);
        assert_eq!((x, y), (70.0, 150.0));
        assert_eq!(GridMap::world_to_grid(x, y), cell);
    }

    #[test]
    fn test_out_of_bounds_reads_as_obstacle() {
        let map = GridMap::open();
        assert!(map.is_obstacle(GridCell::new(-1, 0)));
        assert!(map.is_obstacle(GridCell::new(GRID_SIZE, 0)));
        assert!(!map.is_walkable(GridCell::new(0, GRID_SIZE)));
    }
}
