use super::{PriorityQueue, Solution, begin, expand, finish};
use crate::{
    error::Result,
    maze::{Maze, Predecessors},
    step::Recorder,
};

/// Lazy-deletion Dijkstra over unit-cost passages.
///
/// A dequeued cell that is already visited has been finalized and is skipped;
/// otherwise it is finalized and its neighbors relaxed with `distance + 1`.
pub fn solve_dijkstra(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut queue = PriorityQueue::new();
    maze[start].distance = Some(0);
    queue.enqueue(start, 0);

    while !queue.is_empty() {
        let current = queue.dequeue()?;
        if maze.is_visited(current) {
            continue;
        }
        maze.mark_visited(current);

        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        let distance = maze[current].distance.unwrap_or(0) + 1;
        for next in maze.neighbors(current, true) {
            if maze.is_visited(next) {
                continue;
            }
            if maze[next].distance.is_none_or(|known| distance < known) {
                maze[next].distance = Some(distance);
                predecessors.set(next, current);
                queue.enqueue(next, distance);
            }
        }
    }

    Ok(Solution::not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::Generator,
        solvers::{
            solve_bfs,
            tests::{assert_valid_path, generated},
        },
    };

    #[test]
    fn test_dijkstra_matches_bfs() {
        for seed in 40..44 {
            let mut maze = generated(Generator::Wilson, 11, 7, seed);
            let dijkstra = solve_dijkstra(&mut maze, &mut Recorder::instant()).unwrap();
            assert_valid_path(&maze, &dijkstra);
            let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert_eq!(dijkstra.path.len(), bfs.path.len());
        }
    }

    #[test]
    fn test_dijkstra_finalizes_each_cell_once() {
        let mut maze = Maze::new(4, 4);
        maze.clear_walls();
        maze.close_boundary();
        maze.set_end((3, 3)).unwrap();
        let solution = solve_dijkstra(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(solution.path.len(), 7);

        let mut expanded = maze.visited_cells().to_vec();
        expanded.sort_unstable();
        expanded.dedup();
        assert_eq!(expanded.len(), maze.visited_cells().len());
        assert_eq!(maze[(3, 3)].distance, Some(6));
    }
}
