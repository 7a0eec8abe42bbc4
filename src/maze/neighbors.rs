use super::{
    cell::{Coord, Direction},
    grid::Grid,
};

/// Adjacency rule of a maze.
///
/// A policy picks and orders which of the grid-adjacent cells count as
/// neighbors, e.g. to forbid some directions or to change the order
/// generators and solvers see them in. Walls only separate grid-adjacent
/// cells, so [`Maze::neighbors`](super::Maze::neighbors) drops anything else
/// a policy returns.
pub trait NeighborPolicy: Send + Sync {
    /// Grid-adjacent neighbors of `coord`. With `check_walls` only neighbors
    /// reachable through an absent wall are returned.
    fn neighbors(&self, grid: &Grid, coord: Coord, check_walls: bool) -> Vec<Coord>;
}

/// Plain 4-connected grid: up, right, down, left.
#[derive(Debug, Default, Clone, Copy)]
pub struct Orthogonal;

impl NeighborPolicy for Orthogonal {
    fn neighbors(&self, grid: &Grid, coord: Coord, check_walls: bool) -> Vec<Coord> {
        let Some(cell) = grid.get(coord) else {
            // No neighbors if the coordinate is out of bounds
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|&direction| !check_walls || !cell.walls.has(direction))
            .filter_map(|direction| grid.step(coord, direction))
            .collect()
    }
}
