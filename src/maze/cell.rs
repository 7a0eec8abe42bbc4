/// A cell position as `(row, col)`, zero-based, row-major.
pub type Coord = (usize, usize);

/// The four axis-aligned directions, in the fixed order used by every neighbor query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Up, right, down, left. Neighbor queries always report in this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Right, Direction::Left],
            Direction::Right | Direction::Left => [Direction::Up, Direction::Down],
        }
    }

    /// Bit used for this direction's wall in the 4-bit export code.
    pub fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }

    /// Move one step from `coord`, or `None` when the step would leave a `rows x cols` grid.
    pub fn step(self, coord: Coord, rows: usize, cols: usize) -> Option<Coord> {
        let (row, col) = coord;
        let next = match self {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        (next.0 < rows && next.1 < cols).then_some(next)
    }

    /// The direction leading from `from` to the grid-adjacent `to`, if they are adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        match (
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        ) {
            (-1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Wall flags of a cell, packed as `bit0=top, bit1=right, bit2=bottom, bit3=left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Walls {
    pub const ALL: Walls = Walls(0b1111);
    pub const NONE: Walls = Walls(0);

    /// Builds walls from an export code. Bits above the low nibble are rejected.
    pub fn from_bits(bits: u8) -> Option<Walls> {
        (bits <= Walls::ALL.0).then_some(Walls(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn set(&mut self, direction: Direction, present: bool) {
        if present {
            self.0 |= direction.bit();
        } else {
            self.0 &= !direction.bit();
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// A node of the maze grid.
///
/// `row` and `col` never change after creation. Wall flags are only touched by
/// carving (or manual edits); `visited`, `in_path` and `distance` are per-run
/// bookkeeping cleared by [`Maze::reset_visited`](super::Maze::reset_visited).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    pub walls: Walls,
    pub visited: bool,
    pub in_path: bool,
    /// Distance from the start of the last search. `None` stands for "unreached" (infinity).
    pub distance: Option<usize>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            walls: Walls::ALL,
            visited: false,
            in_path: false,
            distance: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }

    /// Clears the per-run bookkeeping. Walls are left alone.
    pub fn reset(&mut self) {
        self.visited = false;
        self.in_path = false;
        self.distance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_bits() {
        let mut walls = Walls::ALL;
        assert_eq!(walls.bits(), 15);
        walls.set(Direction::Right, false);
        walls.set(Direction::Left, false);
        assert_eq!(walls.bits(), 0b0101);
        assert!(walls.has(Direction::Up));
        assert!(!walls.has(Direction::Right));
        assert_eq!(Walls::from_bits(16), None);
    }

    #[test]
    fn test_direction_step_stays_in_bounds() {
        assert_eq!(Direction::Up.step((0, 0), 3, 3), None);
        assert_eq!(Direction::Left.step((0, 0), 3, 3), None);
        assert_eq!(Direction::Right.step((0, 2), 3, 3), None);
        assert_eq!(Direction::Down.step((1, 1), 3, 3), Some((2, 1)));
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between((1, 1), (0, 1)), Some(Direction::Up));
        assert_eq!(Direction::between((1, 1), (1, 0)), Some(Direction::Left));
        assert_eq!(Direction::between((1, 1), (2, 2)), None);
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
    }
}
