use rand::Rng;

use crate::{
    error::Result,
    maze::{Coord, Maze},
    step::{Recorder, Step},
};

/// Loop-erased random walks: each walk wanders from a random cell outside the
/// tree until it hits the tree, erasing any loop it makes on the way, and the
/// surviving walk is carved into the maze.
pub fn wilson<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    let mut unvisited: Vec<Coord> = maze.grid().coords().collect();

    // The first tree cell is chosen at random
    let first = unvisited.swap_remove(rng.random_range(0..unvisited.len()));
    maze.mark_visited(first);

    while !unvisited.is_empty() {
        let mut current = unvisited[rng.random_range(0..unvisited.len())];
        let mut walk = vec![current];

        // Random walk, ignoring walls, until the tree is reached
        while !maze.is_visited(current) {
            let neighbors = maze.neighbors(current, false);
            let next = neighbors[rng.random_range(0..neighbors.len())];

            match walk.iter().position(|&c| c == next) {
                // Erase the loop by cutting the walk back to where it first passed `next`
                Some(index) => walk.truncate(index + 1),
                None => walk.push(next),
            }
            current = next;
        }

        // The last cell of the walk is already in the tree
        for pair in walk.windows(2) {
            let (cell, next) = (pair[0], pair[1]);
            maze.remove_wall(cell, next);
            maze.mark_visited(cell);
            if let Some(idx) = unvisited.iter().position(|&c| c == cell) {
                unvisited.swap_remove(idx);
            }
            recorder.record(Step::Carve(cell, next))?;
        }
    }

    maze.clear_visited_flags();
    Ok(())
}
