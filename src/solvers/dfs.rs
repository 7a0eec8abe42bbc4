use super::{Solution, begin, expand, finish};
use crate::{
    error::Result,
    maze::{Maze, Predecessors},
    step::Recorder,
};

/// Depth-first search with an explicit stack; cells are marked visited on push.
/// The path is whichever one the stack order stumbles on first.
pub fn solve_dfs(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut stack = vec![start];
    maze.mark_visited(start);

    while let Some(current) = stack.pop() {
        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        for next in maze.neighbors(current, true) {
            if !maze.is_visited(next) {
                maze.mark_visited(next);
                predecessors.set(next, current);
                stack.push(next);
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
    fn test_dfs_expands_last_pushed_first() {
        // Open 2x2: from (0,0) the neighbors are pushed right then down,
        // so (1,0) is popped first and the goal is reached through it.
        let mut maze = Maze::new(2, 2);
        maze.clear_walls();
        maze.close_boundary();
        let solution = solve_dfs(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(solution.path, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(maze.visited_cells(), &[(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_dfs_is_never_shorter_than_bfs() {
        for seed in 0..5 {
            let mut maze = generated(Generator::Eller, 9, 11, seed);
            let dfs = solve_dfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert_valid_path(&maze, &dfs);
            let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert!(dfs.path.len() >= bfs.path.len());
        }
    }
}
