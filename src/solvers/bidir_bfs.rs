use std::collections::{HashMap, VecDeque};

use super::{Solution, begin, expand, report_path};
use crate::{
    error::Result,
    maze::{Coord, Maze},
    step::Recorder,
};

/// Cell to predecessor, `None` for the root of the side.
type Visited = HashMap<Coord, Option<Coord>>;

/// Two breadth-first searches, one from each end, taking turns one expansion
/// at a time. They meet when a side dequeues a cell the other side has seen.
pub fn solve_bidirectional_bfs(maze: &mut Maze, recorder: &mut Recorder) -> Result<Solution> {
    begin(maze, recorder)?;
    let (start, end) = (maze.start(), maze.end());

    let mut front = VecDeque::from([start]);
    let mut back = VecDeque::from([end]);
    let mut forward = Visited::from([(start, None)]);
    let mut backward = Visited::from([(end, None)]);
    maze.mark_visited(start);
    maze.mark_visited(end);

    while !front.is_empty() && !back.is_empty() {
        if let Some(meeting) = advance(maze, recorder, &mut front, &mut forward, &backward)? {
            return meet(maze, recorder, &forward, &backward, meeting);
        }
        if let Some(meeting) = advance(maze, recorder, &mut back, &mut backward, &forward)? {
            return meet(maze, recorder, &forward, &backward, meeting);
        }
    }

    Ok(Solution::not_found())
}

/// Expands one cell of a side. Returns it when the other side already saw it.
fn advance(
    maze: &mut Maze,
    recorder: &mut Recorder,
    queue: &mut VecDeque<Coord>,
    seen: &mut Visited,
    other: &Visited,
) -> Result<Option<Coord>> {
    let Some(current) = queue.pop_front() else {
        return Ok(None);
    };
    expand(maze, recorder, current)?;
    if other.contains_key(&current) {
        return Ok(Some(current));
    }

    for next in maze.neighbors(current, true) {
        if !seen.contains_key(&next) {
            seen.insert(next, Some(current));
            maze.mark_visited(next);
            queue.push_back(next);
        }
    }
    Ok(None)
}

/// Joins start..=meeting from the forward links with the backward links out to the end.
fn meet(
    maze: &mut Maze,
    recorder: &mut Recorder,
    forward: &Visited,
    backward: &Visited,
    meeting: Coord,
) -> Result<Solution> {
    let mut path = chain(forward, meeting);
    path.reverse();
    path.extend(chain(backward, meeting).into_iter().skip(1));
    maze.set_path(path.clone());
    report_path(recorder, path)
}

/// `from` followed by its predecessors up to the root of the side.
fn chain(links: &Visited, from: Coord) -> Vec<Coord> {
    let mut cells = vec![from];
    let mut current = from;
    while let Some(&Some(parent)) = links.get(&current) {
        cells.push(parent);
        current = parent;
    }
    cells
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
    fn test_bidirectional_matches_bfs() {
        for generator in Generator::ALL {
            for seed in [60, 61] {
                let mut maze = generated(generator, 13, 8, seed);
                let bidir = solve_bidirectional_bfs(&mut maze, &mut Recorder::instant()).unwrap();
                assert_valid_path(&maze, &bidir);
                let bfs = solve_bfs(&mut maze, &mut Recorder::instant()).unwrap();
                assert_eq!(bidir.path.len(), bfs.path.len(), "{generator} seed {seed}");
            }
        }
    }

    #[test]
    fn test_sides_meet_in_the_middle() {
        let mut maze = Maze::new(1, 7);
        for col in 1..7 {
            maze.remove_wall((0, col - 1), (0, col));
        }
        let solution = solve_bidirectional_bfs(&mut maze, &mut Recorder::instant()).unwrap();
        assert_eq!(solution.path, (0..7).map(|col| (0, col)).collect::<Vec<_>>());
        // The sides take turns and meet at the middle cell
        assert_eq!(
            maze.visited_cells(),
            &[(0, 0), (0, 6), (0, 1), (0, 5), (0, 2), (0, 4), (0, 3)]
        );
    }

    #[test]
    fn test_chain_stops_at_root() {
        let links = Visited::from([((0, 0), None), ((0, 1), Some((0, 0))), ((1, 1), Some((0, 1)))]);
        assert_eq!(chain(&links, (1, 1)), vec![(1, 1), (0, 1), (0, 0)]);
    }
}
