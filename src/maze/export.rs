//! Wall-code import/export.
//!
//! A maze is stored as one 4-bit code per cell (`bit0=top, bit1=right,
//! bit2=bottom, bit3=left`) together with its size, start and end, which is
//! enough to rebuild it exactly.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{Coord, Direction, Maze, Walls};
use crate::error::{Error, Result};

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl From<Coord> for Position {
    fn from((row, col): Coord) -> Self {
        Position { row, col }
    }
}

impl From<Position> for Coord {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeExport {
    pub version: String,
    pub size: Size,
    pub start: Position,
    pub end: Position,
    /// Row-major wall codes, one per cell.
    pub walls: Vec<u8>,
}

impl MazeExport {
    pub fn from_maze(maze: &Maze) -> Self {
        MazeExport {
            version: EXPORT_VERSION.to_string(),
            size: Size {
                rows: maze.rows(),
                cols: maze.cols(),
            },
            start: maze.start().into(),
            end: maze.end().into(),
            walls: maze.grid().iter().map(|cell| cell.walls.bits()).collect(),
        }
    }

    /// Rebuilds the maze described by this document.
    pub fn into_maze(self) -> Result<Maze> {
        let Size { rows, cols } = self.size;
        let expected = rows.checked_mul(cols).ok_or_else(|| Error::InvalidExport {
            reason: format!("a {rows}x{cols} maze is too large"),
        })?;
        if self.walls.len() != expected {
            return Err(Error::InvalidExport {
                reason: format!(
                    "expected {expected} wall codes for a {rows}x{cols} maze, found {}",
                    self.walls.len()
                ),
            });
        }

        let mut maze = Maze::try_new(rows, cols).map_err(|err| Error::InvalidExport {
            reason: err.to_string(),
        })?;
        for (index, &code) in self.walls.iter().enumerate() {
            let walls = Walls::from_bits(code).ok_or_else(|| Error::InvalidExport {
                reason: format!("wall code {code} at index {index} is not a 4-bit value"),
            })?;
            let coord = maze.grid().unravel_index(index);
            if let Some(cell) = maze.cell_mut(coord) {
                cell.walls = walls;
            }
        }

        // Both sides of every shared wall must agree
        for cell in maze.grid().iter() {
            for direction in [Direction::Right, Direction::Down] {
                let Some(next) = maze.grid().step(cell.coord(), direction) else {
                    continue;
                };
                if cell.walls.has(direction) != maze[next].walls.has(direction.opposite()) {
                    return Err(Error::InvalidExport {
                        reason: format!(
                            "wall between {:?} and {next:?} is open on one side only",
                            cell.coord()
                        ),
                    });
                }
            }
        }

        for (label, pos) in [("start", self.start), ("end", self.end)] {
            if !maze.is_valid(pos.into()) {
                return Err(Error::InvalidExport {
                    reason: format!(
                        "{label} ({}, {}) lies outside the {rows}x{cols} maze",
                        pos.row, pos.col
                    ),
                });
            }
        }
        maze.set_start(self.start.into())?;
        maze.set_end(self.end.into())?;
        Ok(maze)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Draws the walls of `maze` as an SVG document, with a green start and a red end marker.
pub fn to_svg(maze: &Maze, cell_size: usize) -> String {
    let width = maze.cols() * cell_size;
    let height = maze.rows() * cell_size;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    );
    let _ = writeln!(
        svg,
        "  <rect width=\"{width}\" height=\"{height}\" fill=\"white\"/>"
    );

    for cell in maze.grid().iter() {
        let x = cell.col() * cell_size;
        let y = cell.row() * cell_size;
        for direction in Direction::ALL {
            if !cell.walls.has(direction) {
                continue;
            }
            let (x1, y1, x2, y2) = match direction {
                Direction::Up => (x, y, x + cell_size, y),
                Direction::Right => (x + cell_size, y, x + cell_size, y + cell_size),
                Direction::Down => (x, y + cell_size, x + cell_size, y + cell_size),
                Direction::Left => (x, y, x, y + cell_size),
            };
            let _ = writeln!(
                svg,
                "  <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"black\" stroke-width=\"2\"/>"
            );
        }
    }

    let radius = cell_size as f64 / 4.0;
    for ((row, col), color) in [(maze.start(), "green"), (maze.end(), "red")] {
        let cx = (col * cell_size) as f64 + cell_size as f64 / 2.0;
        let cy = (row * cell_size) as f64 + cell_size as f64 / 2.0;
        let _ = writeln!(
            svg,
            "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{color}\"/>"
        );
    }

    svg.push_str("</svg>");
    svg
}
