pub mod cell;
pub mod export;
mod grid;
mod neighbors;

use std::{ops::RangeInclusive, sync::Arc};

pub use cell::{Cell, Coord, Direction, Walls};
pub use grid::Grid;
pub use neighbors::{NeighborPolicy, Orthogonal};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Predecessor links of a single search run, keyed by cell.
///
/// Owned by the solver run rather than stored on the shared cells, so nothing
/// leaks from one run into the next.
#[derive(Debug, Clone)]
pub struct Predecessors {
    links: Vec<Option<Coord>>,
    cols: usize,
}

impl Predecessors {
    pub fn new(maze: &Maze) -> Self {
        Predecessors {
            links: vec![None; maze.grid.len()],
            cols: maze.cols(),
        }
    }

    pub fn set(&mut self, cell: Coord, parent: Coord) {
        self.links[cell.0 * self.cols + cell.1] = Some(parent);
    }

    pub fn get(&self, cell: Coord) -> Option<Coord> {
        self.links[cell.0 * self.cols + cell.1]
    }
}

/// Summary numbers of the last solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeStats {
    pub total_cells: usize,
    pub visited_count: usize,
    pub path_length: usize,
    /// Path length as a percentage of visited cells, 0 when no path is known.
    pub efficiency: f64,
}

#[derive(Clone)]
pub struct Maze {
    grid: Grid,
    start: Coord,
    end: Coord,
    path: Vec<Coord>,
    visited_cells: Vec<Coord>,
    policy: Arc<dyn NeighborPolicy>,
}

impl Maze {
    /// Creates a fully walled maze with `start` at the top-left and `end` at the
    /// bottom-right cell.
    ///
    /// # Panics
    /// If either dimension is zero. Use [`Maze::try_new`] for unchecked input.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Maze::try_new(rows, cols) {
            Ok(maze) => maze,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Maze {
            grid: Grid::new(rows, cols),
            start: (0, 0),
            end: (rows - 1, cols - 1),
            path: Vec::new(),
            visited_cells: Vec::new(),
            policy: Arc::new(Orthogonal),
        })
    }

    /// Replaces the adjacency rule used by [`Maze::neighbors`].
    pub fn with_neighbor_policy(mut self, policy: Arc<dyn NeighborPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn set_start(&mut self, coord: Coord) -> Result<()> {
        self.check_bounds(coord)?;
        self.start = coord;
        Ok(())
    }

    pub fn set_end(&mut self, coord: Coord) -> Result<()> {
        self.check_bounds(coord)?;
        self.end = coord;
        Ok(())
    }

    /// The path found by the last successful solve, start first.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Cells in the order the last solve expanded them.
    pub fn visited_cells(&self) -> &[Coord] {
        &self.visited_cells
    }

    pub fn is_valid(&self, coord: Coord) -> bool {
        self.grid.is_valid(coord)
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.is_valid(coord) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row: coord.0,
                col: coord.1,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.grid.get(coord)
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.grid.get_mut(coord)
    }

    /// Neighbors of `coord` as reported by the maze's neighbor policy.
    /// With `check_walls` only neighbors behind an absent wall are returned.
    /// Cells the policy reports that are not grid-adjacent to `coord` are dropped.
    pub fn neighbors(&self, coord: Coord, check_walls: bool) -> Vec<Coord> {
        let mut neighbors = self.policy.neighbors(&self.grid, coord, check_walls);
        // Walls only exist between grid-adjacent cells
        neighbors.retain(|&n| self.grid.is_valid(n) && Direction::between(coord, n).is_some());
        neighbors
    }

    /// Topological neighbors that have not been visited yet.
    pub fn unvisited_neighbors(&self, coord: Coord) -> Vec<Coord> {
        self.neighbors(coord, false)
            .into_iter()
            .filter(|&n| !self.grid[n].visited)
            .collect()
    }

    /// Checks whether a wall separates two grid-adjacent cells.
    ///
    /// # Panics
    /// If the cells are not grid-adjacent.
    pub fn has_wall_between(&self, a: Coord, b: Coord) -> bool {
        let direction = Direction::between(a, b)
            .unwrap_or_else(|| panic!("cells {a:?} and {b:?} are not grid-adjacent"));
        self.grid[a].walls.has(direction)
    }

    /// Removes the wall shared by two grid-adjacent cells, on both sides.
    ///
    /// # Returns
    /// `true` if a wall was removed, `false` if the passage was already open.
    ///
    /// # Panics
    /// * If either cell is out of bounds
    /// * If the cells are not grid-adjacent (offset of exactly 1 in one axis)
    pub fn remove_wall(&mut self, a: Coord, b: Coord) -> bool {
        let direction = Direction::between(a, b)
            .unwrap_or_else(|| panic!("cells {a:?} and {b:?} are not grid-adjacent"));
        let existed = self.grid[a].walls.has(direction) || self.grid[b].walls.has(direction.opposite());
        self.grid[a].walls.set(direction, false);
        self.grid[b].walls.set(direction.opposite(), false);
        existed
    }

    /// Puts back the wall shared by two grid-adjacent cells, on both sides.
    ///
    /// # Panics
    /// Same conditions as [`Maze::remove_wall`].
    pub fn add_wall(&mut self, a: Coord, b: Coord) {
        let direction = Direction::between(a, b)
            .unwrap_or_else(|| panic!("cells {a:?} and {b:?} are not grid-adjacent"));
        self.grid[a].walls.set(direction, true);
        self.grid[b].walls.set(direction.opposite(), true);
    }

    /// Inserts a line of walls after the specified row or column, leaving one passage open.
    ///
    /// # Arguments
    /// * `orientation` - Determines which type of wall line to insert:
    ///   - `Horizontal`: a wall between rows `after` and `after + 1`, spanning the columns in `span`
    ///   - `Vertical`: a wall between columns `after` and `after + 1`, spanning the rows in `span`
    /// * `passage` - The column (horizontal) or row (vertical) left open
    ///
    /// # Panics
    /// If the line or the span falls outside the grid.
    pub fn add_wall_line(
        &mut self,
        orientation: Orientation,
        after: usize,
        span: RangeInclusive<usize>,
        passage: usize,
    ) {
        for i in span {
            if i == passage {
                continue;
            }
            match orientation {
                Orientation::Horizontal => self.add_wall((after, i), (after + 1, i)),
                Orientation::Vertical => self.add_wall((i, after), (i, after + 1)),
            }
        }
    }

    /// Walls every side of every cell and clears the visited flags.
    pub fn set_all_walls(&mut self) {
        self.grid.iter_mut().for_each(|cell| {
            cell.walls = Walls::ALL;
            cell.visited = false;
        });
    }

    /// Removes every wall, including the outer boundary.
    pub fn clear_walls(&mut self) {
        self.grid.iter_mut().for_each(|cell| cell.walls = Walls::NONE);
    }

    /// Walls the outer boundary of the grid.
    pub fn close_boundary(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        for cell in self.grid.iter_mut() {
            let (row, col) = cell.coord();
            if row == 0 {
                cell.walls.set(Direction::Up, true);
            }
            if row == rows - 1 {
                cell.walls.set(Direction::Down, true);
            }
            if col == 0 {
                cell.walls.set(Direction::Left, true);
            }
            if col == cols - 1 {
                cell.walls.set(Direction::Right, true);
            }
        }
    }

    pub fn mark_visited(&mut self, coord: Coord) {
        self.grid[coord].visited = true;
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self.grid[coord].visited
    }

    /// Appends `coord` to the visitation order of the current solve.
    pub fn record_visit(&mut self, coord: Coord) {
        self.visited_cells.push(coord);
    }

    /// Clears only the visited flags. Generators call this as their last step.
    pub fn clear_visited_flags(&mut self) {
        self.grid.iter_mut().for_each(|cell| cell.visited = false);
    }

    /// Clears all transient solve state: visited, in-path and distance of every
    /// cell, the path and the visitation order. Walls are untouched.
    pub fn reset_visited(&mut self) {
        self.grid.iter_mut().for_each(Cell::reset);
        self.path.clear();
        self.visited_cells.clear();
    }

    /// Walks the predecessor links back from `end` to `start`, stores the path
    /// in start-to-end order and marks every cell on it as in-path.
    ///
    /// If the chain never reaches `start` the walk stops once every cell has
    /// been seen, so a corrupted chain cannot loop forever.
    pub fn reconstruct_path(&mut self, predecessors: &Predecessors) -> &[Coord] {
        let mut path = vec![self.end];
        let mut current = self.end;
        while current != self.start && path.len() <= self.grid.len() {
            match predecessors.get(current) {
                Some(parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        debug_assert!(
            path.len() <= self.grid.len(),
            "predecessor chain contains a cycle"
        );
        path.reverse();
        self.set_path(path);
        &self.path
    }

    /// Stores `path` as the current path and marks its cells as in-path.
    pub fn set_path(&mut self, path: Vec<Coord>) {
        for &coord in &path {
            self.grid[coord].in_path = true;
        }
        self.path = path;
    }

    /// Number of open passages between grid-adjacent cells.
    pub fn carved_edges(&self) -> usize {
        self.grid
            .iter()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&d| {
                        self.grid.step(cell.coord(), d).is_some() && !cell.walls.has(d)
                    })
                    .count()
            })
            .sum()
    }

    pub fn stats(&self) -> MazeStats {
        let visited_count = self.visited_cells.len();
        let path_length = self.path.len();
        let efficiency = if path_length > 0 && visited_count > 0 {
            path_length as f64 / visited_count as f64 * 100.0
        } else {
            0.0
        };
        MazeStats {
            total_cells: self.grid.len(),
            visited_count,
            path_length,
            efficiency,
        }
    }
}

impl std::fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maze")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("start", &self.start)
            .field("end", &self.end)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

impl std::ops::IndexMut<Coord> for Maze {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.grid[index]
    }
}
