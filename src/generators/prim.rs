use rand::Rng;

use crate::{
    error::Result,
    maze::{Coord, Maze},
    step::{Recorder, Step},
};

/// Adds the walls between `cell` and its unvisited neighbors to the frontier.
fn add_walls(maze: &Maze, cell: Coord, frontier: &mut Vec<(Coord, Coord)>) {
    frontier.extend(
        maze.unvisited_neighbors(cell)
            .into_iter()
            .map(|neighbor| (cell, neighbor)),
    );
}

pub fn randomized_prim<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    // Initialize the maze with walls
    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    // Initialize the starting point
    let start: Coord = (
        rng.random_range(0..maze.rows()),
        rng.random_range(0..maze.cols()),
    );
    maze.mark_visited(start);

    let mut frontier = Vec::new();
    add_walls(maze, start, &mut frontier);

    while !frontier.is_empty() {
        // Randomly select a wall from the frontier
        let idx = rng.random_range(0..frontier.len());
        let (cell, neighbor) = frontier.swap_remove(idx);

        // The neighbor may have joined the maze through another wall since this one was added
        if maze.is_visited(neighbor) {
            continue;
        }

        maze.remove_wall(cell, neighbor);
        maze.mark_visited(neighbor);
        recorder.record(Step::Carve(cell, neighbor))?;

        add_walls(maze, neighbor, &mut frontier);
    }

    maze.clear_visited_flags();
    Ok(())
}
