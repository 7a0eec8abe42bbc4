use rand::Rng;

use crate::{
    error::Result,
    maze::Maze,
    step::{Recorder, Step},
};

pub fn recursive_backtrack<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    // Initialize the maze with walls
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    let start = maze.start();
    maze.mark_visited(start);

    // The stack keeps the current carving branch, top of the stack is the cell being extended
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = maze.unvisited_neighbors(cell);

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        maze.remove_wall(cell, neighbor);
        maze.mark_visited(neighbor);
        recorder.record(Step::Carve(cell, neighbor))?;
        // Carve the maze in that neighbor's direction next
        stack.push(neighbor);
    }

    maze.clear_visited_flags();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_recursive_backtrack() {
        let mut maze = Maze::new(7, 9);
        recursive_backtrack(&mut maze, &mut get_rng(Some(1)), &mut Recorder::instant()).unwrap();
        assert_perfect(&maze);
    }

    #[test]
    fn test_records_one_carve_per_cell() {
        let mut maze = Maze::new(4, 4);
        let mut recorder = Recorder::new(60);
        recursive_backtrack(&mut maze, &mut get_rng(Some(2)), &mut recorder).unwrap();
        let carves = recorder
            .steps()
            .iter()
            .filter(|step| matches!(step, Step::Carve(..)))
            .count();
        assert_eq!(carves, 15);
    }
}
