use rand::Rng;

use crate::{
    error::Result,
    maze::{Direction, Maze},
    step::{Recorder, Step},
};

/// Every cell carves either north or west, whichever exist, with equal odds.
pub fn binary_tree<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    for coord in maze.grid().coords() {
        let choices = [Direction::Up, Direction::Left]
            .into_iter()
            .filter_map(|direction| maze.grid().step(coord, direction))
            .collect::<Vec<_>>();

        // The top-left cell has nowhere to go
        if choices.is_empty() {
            continue;
        }

        let chosen = choices[rng.random_range(0..choices.len())];
        maze.remove_wall(coord, chosen);
        recorder.record(Step::Carve(coord, chosen))?;
    }

    maze.clear_visited_flags();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_binary_tree() {
        let mut maze = Maze::new(6, 6);
        binary_tree(&mut maze, &mut get_rng(Some(11)), &mut Recorder::instant()).unwrap();
        assert_perfect(&maze);
    }

    #[test]
    fn test_top_row_and_left_column_are_corridors() {
        let mut maze = Maze::new(5, 7);
        binary_tree(&mut maze, &mut get_rng(Some(12)), &mut Recorder::instant()).unwrap();
        for col in 1..7 {
            assert!(!maze.has_wall_between((0, col - 1), (0, col)));
        }
        for row in 1..5 {
            assert!(!maze.has_wall_between((row - 1, 0), (row, 0)));
        }
    }
}
