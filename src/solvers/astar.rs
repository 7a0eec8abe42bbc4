use super::{PriorityQueue, Solution, begin, expand, finish, heuristic};
use crate::{
    error::Result,
    maze::{Maze, Predecessors},
    step::Recorder,
};

/// A* keyed by `f = g + h` with lazy deletion.
///
/// A cell is re-enqueued whenever a strictly cheaper `g` is found; stale queue
/// entries are skipped once the cell has been closed.
pub fn solve_astar(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut closed = vec![false; maze.grid().len()];
    let mut open = PriorityQueue::new();

    maze.mark_visited(start);
    maze[start].distance = Some(0);
    open.enqueue(start, heuristic(start, end));

    while !open.is_empty() {
        let current = open.dequeue()?;
        let idx = maze.grid().ravel_index(current);
        if closed[idx] {
            continue;
        }
        closed[idx] = true;

        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        let g = maze[current].distance.unwrap_or(0) + 1;
        for next in maze.neighbors(current, true) {
            if closed[maze.grid().ravel_index(next)] {
                continue;
            }
            if maze[next].distance.is_none_or(|known| g < known) {
                maze[next].distance = Some(g);
                maze.mark_visited(next);
                predecessors.set(next, current);
                open.enqueue(next, g + heuristic(next, end));
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
    fn test_astar_matches_bfs_length() {
        for generator in Generator::ALL {
            let mut maze = generated(generator, 10, 10, 31);
            let astar = solve_astar(&mut maze, &mut Recorder::instant()).unwrap();
            assert_valid_path(&maze, &astar);
            let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert_eq!(astar.path.len(), bfs.path.len(), "{generator}");
        }
    }

    #[test]
    fn test_astar_is_optimal_with_cycles() {
        // An open room has many shortest paths and plenty of cycles
        let mut maze = Maze::new(5, 7);
        maze.clear_walls();
        maze.close_boundary();
        let solution = solve_astar(&mut maze, &mut Recorder::instant()).unwrap();
        assert_valid_path(&maze, &solution);
        assert_eq!(solution.path.len(), 4 + 6 + 1);
    }

    #[test]
    fn test_astar_expands_toward_the_goal() {
        let mut maze = Maze::new(1, 8);
        maze.clear_walls();
        maze.close_boundary();
        maze.set_start((0, 3)).unwrap();
        maze.set_end((0, 7)).unwrap();
        solve_astar(&mut maze, &mut Recorder::instant()).unwrap();
        // Nothing left of the start is ever expanded
        assert!(maze.visited_cells().iter().all(|&(_, col)| col >= 3));
    }
}
