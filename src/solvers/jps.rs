use super::{PriorityQueue, Solution, begin, expand, finish, heuristic};
use crate::{
    error::Result,
    maze::{Coord, Direction, Maze, Predecessors},
    step::Recorder,
};

/// Jump point search on a 4-connected grid: A* whose graph nodes are the ends
/// of straight runs.
///
/// From each expanded cell the search slides in every open direction until it
/// reaches the goal or a cell with a perpendicular opening (a jump point).
/// Runs that end against a wall are dead ends and are dropped. Every cell of an
/// accepted run gets a predecessor link, so the path stays a walk of adjacent cells.
pub fn solve_jps(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut predecessors = Predecessors::new(maze);
    let mut open = PriorityQueue::new();
    maze.mark_visited(start);
    maze[start].distance = Some(0);
    open.enqueue(start, heuristic(start, end));

    while !open.is_empty() {
        let current = open.dequeue()?;
        expand(maze, recorder, current)?;
        if current == end {
            return finish(maze, recorder, &predecessors);
        }

        let g = maze[current].distance.unwrap_or(0);
        for direction in Direction::ALL {
            // Visited cells stop a jump, so every jump point found here is new
            let Some(jump_point) = jump(maze, current, direction) else {
                continue;
            };
            link_run(maze, &mut predecessors, current, jump_point, direction);

            let tentative = g + heuristic(current, jump_point);
            maze[jump_point].distance = Some(tentative);
            maze.mark_visited(jump_point);
            open.enqueue(jump_point, tentative + heuristic(jump_point, end));
        }
    }

    Ok(Solution::not_found())
}

/// Slides from `from` in `direction` and returns the first jump point, if any.
fn jump(maze: &Maze, from: Coord, direction: Direction) -> Option<Coord> {
    let mut current = from;
    loop {
        if maze[current].walls.has(direction) {
            return None;
        }
        let next = maze.grid().step(current, direction)?;
        if maze.is_visited(next) {
            return None;
        }
        if next == maze.end() || has_side_opening(maze, next, direction) {
            return Some(next);
        }
        current = next;
    }
}

fn has_side_opening(maze: &Maze, cell: Coord, direction: Direction) -> bool {
    direction
        .perpendicular()
        .into_iter()
        .any(|side| maze.grid().step(cell, side).is_some() && !maze[cell].walls.has(side))
}

/// Links every cell of the straight run `from`..=`to` to the cell before it.
fn link_run(
    maze: &Maze,
    predecessors: &mut Predecessors,
    from: Coord,
    to: Coord,
    direction: Direction,
) {
    let mut cell = from;
    while cell != to {
        let Some(next) = maze.grid().step(cell, direction) else {
            break;
        };
        predecessors.set(next, cell);
        cell = next;
    }
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
    fn test_jps_skips_straight_corridors() {
        let mut maze = Maze::new(1, 8);
        for col in 1..8 {
            maze.remove_wall((0, col - 1), (0, col));
        }
        let solution = solve_jps(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(solution.path.len(), 8);
        assert_eq!(maze.visited_cells(), &[(0, 0), (0, 7)]);
        assert_eq!(maze[(0, 7)].distance, Some(7));
    }

    #[test]
    fn test_jump_stops_at_side_openings() {
        let mut maze = Maze::new(3, 4);
        maze.remove_wall((0, 0), (0, 1));
        maze.remove_wall((0, 1), (0, 2));
        maze.remove_wall((0, 2), (0, 3));
        maze.remove_wall((0, 2), (1, 2));
        assert_eq!(jump(&maze, (0, 0), Direction::Right), Some((0, 2)));
        assert_eq!(jump(&maze, (0, 0), Direction::Down), None);
        // A run that ends against a wall is a dead end
        assert_eq!(jump(&maze, (0, 2), Direction::Right), None);
    }

    #[test]
    fn test_jps_matches_bfs_on_perfect_mazes() {
        for generator in Generator::ALL {
            let mut maze = generated(generator, 15, 12, 70);
            let jps = solve_jps(&mut maze, &mut Recorder::instant()).unwrap();
            assert_valid_path(&maze, &jps);
            let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
            assert_eq!(jps.path.len(), bfs.path.len(), "{generator}");
            assert!(jps.path.len() <= maze.rows() * maze.cols());
        }
    }
}
