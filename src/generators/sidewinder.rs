use rand::Rng;

use crate::{
    error::Result,
    maze::Maze,
    step::{Recorder, Step},
};

/// Row by row, extend a run of cells eastward and, when the run closes, link one
/// of its cells upward. The top row is a single corridor.
pub fn sidewinder<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    let (rows, cols) = (maze.rows(), maze.cols());
    for row in 0..rows {
        let mut run_start = 0;

        for col in 0..cols {
            // The last column always closes the run, the top row never closes early
            let close_run = col == cols - 1 || (row > 0 && rng.random_bool(0.5));

            if !close_run {
                maze.remove_wall((row, col), (row, col + 1));
                recorder.record(Step::Carve((row, col), (row, col + 1)))?;
                continue;
            }

            if row > 0 {
                let run_col = rng.random_range(run_start..=col);
                maze.remove_wall((row, run_col), (row - 1, run_col));
                recorder.record(Step::Carve((row, run_col), (row - 1, run_col)))?;
            }
            run_start = col + 1;
        }
    }

    maze.clear_visited_flags();
    Ok(())
}
