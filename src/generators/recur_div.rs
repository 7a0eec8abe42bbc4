use rand::Rng;

use crate::{
    error::Result,
    maze::{Coord, Maze, Orientation},
    step::{Recorder, Step},
};

pub fn recursive_division<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    // Start from one open chamber enclosed by the outer wall
    maze.clear_walls();
    maze.close_boundary();
    maze.clear_visited_flags();
    recorder.record(Step::Fill { walled: false })?;

    let (rows, cols) = (maze.rows(), maze.cols());
    return divide(maze, (0, 0), rows, cols, rng, recorder);

    /// Splits the chamber whose top-left cell is `top_left` and recurses into both halves.
    fn divide<R: Rng + ?Sized>(
        maze: &mut Maze,
        top_left: Coord,
        height: usize,
        width: usize,
        rng: &mut R,
        recorder: &mut Recorder,
    ) -> Result<()> {
        if width < 2 || height < 2 {
            return Ok(());
        }

        let (row, col) = top_left;

        // Cut across the longer dimension
        let orientation = match width.cmp(&height) {
            std::cmp::Ordering::Less => Orientation::Horizontal,
            std::cmp::Ordering::Greater => Orientation::Vertical,
            std::cmp::Ordering::Equal => {
                if rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                }
            }
        };

        match orientation {
            Orientation::Horizontal => {
                // Randomly choose the row the wall goes after
                let diff = rng.random_range(0..height - 1);
                let row_wall = row + diff;

                // Randomly choose a position for the hole in the wall
                let col_hole = col + rng.random_range(0..width);

                let span = (col, col + width - 1);
                maze.add_wall_line(Orientation::Horizontal, row_wall, span.0..=span.1, col_hole);
                recorder.record(Step::Divide {
                    orientation,
                    line: row_wall,
                    span,
                    passage: col_hole,
                })?;

                let upper_height = diff + 1;
                let lower_height = height - upper_height;

                // Recursively divide the regions above and below the wall
                divide(maze, (row, col), upper_height, width, rng, recorder)?;
                divide(maze, (row_wall + 1, col), lower_height, width, rng, recorder)
            }
            Orientation::Vertical => {
                // Randomly choose the column the wall goes after
                let diff = rng.random_range(0..width - 1);
                let col_wall = col + diff;

                // Randomly choose a position for the hole in the wall
                let row_hole = row + rng.random_range(0..height);

                let span = (row, row + height - 1);
                maze.add_wall_line(Orientation::Vertical, col_wall, span.0..=span.1, row_hole);
                recorder.record(Step::Divide {
                    orientation,
                    line: col_wall,
                    span,
                    passage: row_hole,
                })?;

                let left_width = diff + 1;
                let right_width = width - left_width;

                // Recursively divide the regions left and right of the wall
                divide(maze, (row, col), height, left_width, rng, recorder)?;
                divide(maze, (row, col_wall + 1), height, right_width, rng, recorder)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_recursive_division() {
        let mut maze = Maze::new(10, 13);
        recursive_division(&mut maze, &mut get_rng(Some(6)), &mut Recorder::instant()).unwrap();
        assert_perfect(&maze);
    }

    #[test]
    fn test_thin_mazes_stay_open_corridors() {
        let mut maze = Maze::new(1, 5);
        recursive_division(&mut maze, &mut get_rng(Some(7)), &mut Recorder::instant()).unwrap();
        assert_eq!(maze.carved_edges(), 4);
        assert_eq!(maze[(0, 0)].walls.bits(), 0b1101);
    }
}
