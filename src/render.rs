use std::{
    fmt,
    io::{self, Write},
};

use crossterm::{
    cursor, queue,
    style::{self, Color, Stylize},
};

use crate::maze::{Coord, Direction, Maze};

/// One square of the text picture of a maze.
///
/// Cell `(r, c)` sits at tile `(2r + 1, 2c + 1)`; the tiles between cells show
/// whether a wall separates them, and even/even tiles are always wall corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Visited,
    Route,
    Start,
    Goal,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Visited => "* ".with(Color::Blue),
            Tile::Route => "██".with(Color::Yellow),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

fn cell_tile(maze: &Maze, coord: Coord) -> Tile {
    let cell = &maze[coord];
    if coord == maze.start() {
        Tile::Start
    } else if coord == maze.end() {
        Tile::Goal
    } else if cell.in_path {
        Tile::Route
    } else if cell.visited {
        Tile::Visited
    } else {
        Tile::Empty
    }
}

/// Tile for the passage between `coord` and its neighbor in `direction`.
fn passage_tile(maze: &Maze, coord: Coord, direction: Direction) -> Tile {
    let Some(next) = maze.grid().step(coord, direction) else {
        return if maze[coord].walls.has(direction) {
            Tile::Wall
        } else {
            Tile::Empty
        };
    };
    if maze[coord].walls.has(direction) {
        return Tile::Wall;
    }
    let (a, b) = (&maze[coord], &maze[next]);
    if a.in_path && b.in_path {
        Tile::Route
    } else if a.visited && b.visited {
        Tile::Visited
    } else {
        Tile::Empty
    }
}

/// The `(2 * rows + 1) x (2 * cols + 1)` tile picture of `maze`.
pub fn tiles(maze: &Maze) -> Vec<Vec<Tile>> {
    let (height, width) = (2 * maze.rows() + 1, 2 * maze.cols() + 1);
    let mut picture = vec![vec![Tile::Wall; width]; height];

    for coord in maze.grid().coords() {
        let (y, x) = (2 * coord.0 + 1, 2 * coord.1 + 1);
        picture[y][x] = cell_tile(maze, coord);
        picture[y][x + 1] = passage_tile(maze, coord, Direction::Right);
        picture[y + 1][x] = passage_tile(maze, coord, Direction::Down);
        if coord.0 == 0 {
            picture[0][x] = passage_tile(maze, coord, Direction::Up);
        }
        if coord.1 == 0 {
            picture[y][0] = passage_tile(maze, coord, Direction::Left);
        }
    }
    picture
}

/// Renders the whole maze as colored text, each tile row ended by `line_end`.
pub fn to_string(maze: &Maze, line_end: &str) -> String {
    tiles(maze)
        .iter()
        .map(|row| {
            let mut line = row.iter().map(Tile::to_string).collect::<String>();
            line.push_str(line_end);
            line
        })
        .collect()
}

/// Draws the maze at the top-left corner of the terminal.
pub fn draw<W: Write>(out: &mut W, maze: &Maze) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0))?;
    for row in tiles(maze) {
        for tile in row {
            queue!(out, style::Print(tile))?;
        }
        queue!(out, style::Print("\r\n"))?;
    }
    out.flush()
}

/// Redraws one cell and the four passages around it, leaving the rest of the screen alone.
pub fn draw_cell<W: Write>(out: &mut W, maze: &Maze, coord: Coord) -> io::Result<()> {
    let (y, x) = (2 * coord.0 + 1, 2 * coord.1 + 1);
    put_tile(out, y, x, cell_tile(maze, coord))?;
    for direction in Direction::ALL {
        let (ty, tx) = match direction {
            Direction::Up => (y - 1, x),
            Direction::Right => (y, x + 1),
            Direction::Down => (y + 1, x),
            Direction::Left => (y, x - 1),
        };
        put_tile(out, ty, tx, passage_tile(maze, coord, direction))?;
    }
    out.flush()
}

fn put_tile<W: Write>(out: &mut W, y: usize, x: usize, tile: Tile) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(x as u16 * Tile::WIDTH, y as u16),
        style::Print(tile)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walled_maze_tiles() {
        let maze = Maze::new(2, 3);
        let picture = tiles(&maze);
        assert_eq!(picture.len(), 5);
        assert!(picture.iter().all(|row| row.len() == 7));
        assert_eq!(picture[1][1], Tile::Start);
        assert_eq!(picture[3][5], Tile::Goal);
        assert_eq!(picture[1][3], Tile::Empty);
        assert_eq!(picture[1][2], Tile::Wall);
        assert_eq!(picture[2][2], Tile::Wall);
    }

    #[test]
    fn test_passages_and_route() {
        let mut maze = Maze::new(1, 3);
        maze.remove_wall((0, 0), (0, 1));
        maze.remove_wall((0, 1), (0, 2));
        maze.set_path(vec![(0, 0), (0, 1), (0, 2)]);
        let picture = tiles(&maze);
        assert_eq!(picture[1], vec![
            Tile::Wall,
            Tile::Start,
            Tile::Route,
            Tile::Route,
            Tile::Route,
            Tile::Goal,
            Tile::Wall,
        ]);
        assert!(picture[0].iter().all(|&tile| tile == Tile::Wall));
    }

    #[test]
    fn test_visited_cells_show() {
        let mut maze = Maze::new(2, 2);
        maze.remove_wall((0, 1), (1, 1));
        maze.mark_visited((0, 1));
        maze.mark_visited((1, 1));
        let picture = tiles(&maze);
        assert_eq!(picture[1][3], Tile::Visited);
        assert_eq!(picture[2][3], Tile::Visited);
        assert_eq!(picture[3][3], Tile::Goal);
    }

    #[test]
    fn test_to_string_lines() {
        let maze = Maze::new(3, 3);
        let text = to_string(&maze, "\n");
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_every_tile_is_two_columns() {
        for tile in [
            Tile::Wall,
            Tile::Empty,
            Tile::Visited,
            Tile::Route,
            Tile::Start,
            Tile::Goal,
        ] {
            // The width check lives in Display
            let _ = tile.to_string();
        }
    }
}
