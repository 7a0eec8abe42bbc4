use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    maze::Maze,
    step::{Recorder, Step},
};

/// Eller's algorithm, one row at a time.
///
/// Only the set ids of the current row are kept: every set reaches each row
/// through at least one downward passage, so the row alone describes which
/// cells are already connected.
pub fn eller<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R, recorder: &mut Recorder) -> Result<()> {
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    let (rows, cols) = (maze.rows(), maze.cols());
    let mut next_set = 0usize;
    // Set id of every column in the current row, `None` for cells not yet assigned
    let mut sets: Vec<Option<usize>> = vec![None; cols];

    for row in 0..rows {
        let last_row = row == rows - 1;

        // Cells not joined from above start in their own set
        let mut row_sets: Vec<usize> = sets
            .iter()
            .map(|set| {
                set.unwrap_or_else(|| {
                    next_set += 1;
                    next_set - 1
                })
            })
            .collect();

        // Randomly join adjacent cells of different sets; the last row joins them all
        for col in 0..cols.saturating_sub(1) {
            if row_sets[col] == row_sets[col + 1] || !(last_row || rng.random_bool(0.5)) {
                continue;
            }
            maze.remove_wall((row, col), (row, col + 1));
            recorder.record(Step::Carve((row, col), (row, col + 1)))?;

            let (old, new) = (row_sets[col + 1], row_sets[col]);
            row_sets
                .iter_mut()
                .filter(|set| **set == old)
                .for_each(|set| *set = new);
        }

        if last_row {
            break;
        }

        // Every set sends at least one of its cells down
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (col, &set) in row_sets.iter().enumerate() {
            members.entry(set).or_default().push(col);
        }

        sets = vec![None; cols];
        for (set, mut cols_in_set) in members {
            cols_in_set.shuffle(rng);
            let count = rng.random_range(1..=cols_in_set.len());
            for &col in &cols_in_set[..count] {
                maze.remove_wall((row, col), (row + 1, col));
                recorder.record(Step::Carve((row, col), (row + 1, col)))?;
                sets[col] = Some(set);
            }
        }
    }

    maze.clear_visited_flags();
    Ok(())
}
