use std::collections::VecDeque;

use super::{Solution, begin, expand, finish};
use crate::{
    error::Result,
    maze::{Maze, Predecessors},
    step::Recorder,
};

/// Breadth-first search. Cells are marked visited when enqueued, so none is
/// queued twice, and `distance` holds the edge count from the start.
pub fn solve_bfs(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut queue = VecDeque::from([start]);
    maze.mark_visited(start);
    maze[start].distance = Some(0);

    while let Some(current) = queue.pop_front() {
        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        let distance = maze[current].distance.unwrap_or(0) + 1;
        for next in maze.neighbors(current, true) {
            if maze.is_visited(next) {
                continue;
            }
            maze.mark_visited(next);
            maze[next].distance = Some(distance);
            predecessors.set(next, current);
            queue.push_back(next);
        }
    }

    Ok(Solution::not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::Generator,
        solvers::tests::{assert_valid_path, generated, l_corridor},
    };

    #[test]
    fn test_bfs_l_corridor_distances() {
        let mut maze = l_corridor();
        let solution = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(solution.path.len(), 5);
        assert_eq!(maze[(2, 2)].distance, Some(4));
        assert_eq!(maze[(0, 2)].distance, Some(2));
        // Cells off the corridor are never reached
        assert_eq!(maze[(1, 0)].distance, None);
        assert_eq!(maze.visited_cells().len(), 5);
    }

    #[test]
    fn test_bfs_on_generated_maze() {
        let mut maze = generated(Generator::RecurBacktrack, 12, 9, 21);
        let solution = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
        assert_valid_path(&maze, &solution);
        assert_eq!(maze[maze.end()].distance, Some(solution.path.len() - 1));
    }

    #[test]
    fn test_bfs_rerun_starts_clean() {
        let mut maze = generated(Generator::Prim, 6, 6, 22);
        let first = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
        let second = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(first, second);
        assert_eq!(maze.visited_cells().len(), maze.stats().visited_count);
    }
}
