use super::cell::{Cell, Coord, Direction};

/// Flat row-major arena of cells, addressed by `row * cols + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Grid { cells, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_valid(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    /// Arena index of `coord`. The coordinate must be in bounds.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 * self.cols + coord.1
    }

    pub fn unravel_index(&self, index: usize) -> Coord {
        (index / self.cols, index % self.cols)
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.is_valid(coord)
            .then(|| &self.cells[self.ravel_index(coord)])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if self.is_valid(coord) {
            let idx = self.ravel_index(coord);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// The in-bounds cell one step from `coord` in `direction`.
    pub fn step(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        direction.step(coord, self.rows, self.cols)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Iterates over the grid one row slice at a time.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_valid(index),
            "cell {:?} is outside the {}x{} grid",
            index,
            self.rows,
            self.cols
        );
        &self.cells[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        assert!(
            self.is_valid(index),
            "cell {:?} is outside the {}x{} grid",
            index,
            self.rows,
            self.cols
        );
        let idx = self.ravel_index(index);
        &mut self.cells[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid[(2, 3)].coord(), (2, 3));
        assert_eq!(grid.ravel_index((1, 2)), 6);
        assert_eq!(grid.unravel_index(6), (1, 2));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5);
        assert!(!grid.is_valid((5, 5)));
        assert!(!grid.is_valid((0, 5)));
        assert!(!grid.is_valid((5, 0)));
        assert!(grid.is_valid((4, 4)));
        assert!(grid.get((7, 0)).is_none());
    }

    #[test]
    fn test_rows_iter() {
        let grid = Grid::new(2, 3);
        let rows = grid.rows_iter().collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].coord(), (1, 0));
    }
}
