use super::{PriorityQueue, Solution, begin, expand, finish, heuristic};
use crate::{
    error::Result,
    maze::{Maze, Predecessors},
    step::Recorder,
};

/// Greedy best-first search keyed by the heuristic alone; visited on enqueue.
pub fn solve_greedy(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut open = PriorityQueue::new();
    maze.mark_visited(start);
    open.enqueue(start, heuristic(start, end));

    while !open.is_empty() {
        let current = open.dequeue()?;
        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        for next in maze.neighbors(current, true) {
            if !maze.is_visited(next) {
                maze.mark_visited(next);
                predecessors.set(next, current);
                open.enqueue(next, heuristic(next, end));
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
    fn test_greedy_runs_straight_at_the_goal() {
        let mut maze = Maze::new(6, 6);
        maze.clear_walls();
        maze.close_boundary();
        let solution = solve_greedy(&mut maze, &mut Recorder::instant()).unwrap();
        assert_valid_path(&maze, &solution);
        // With nothing in the way every expansion lies on the path
        assert_eq!(maze.visited_cells(), solution.path.as_slice());
    }

    #[test]
    fn test_greedy_is_never_shorter_than_bfs() {
        for seed in 50..54 {
            let mut maze = generated(Generator::Kruskal, 10, 10, seed);
            let greedy = solve_greedy(&mut maze, &mut Recorder::instant()).unwrap();
            assert_valid_path(&maze, &greedy);
            let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert!(greedy.path.len() >= bfs.path.len());
        }
    }
}
