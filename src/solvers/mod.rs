use std::str::FromStr;

mod astar;
mod bfs;
mod bidir_bfs;
mod dfs;
mod dijkstra;
mod greedy;
mod jps;
mod priority_queue;

pub use astar::solve_astar;
pub use bfs::solve_bfs;
pub use bidir_bfs::solve_bidirectional_bfs;
pub use dfs::solve_dfs;
pub use dijkstra::solve_dijkstra;
pub use greedy::solve_greedy;
pub use jps::solve_jps;
pub use priority_queue::PriorityQueue;

use crate::{
    error::{Error, Result},
    maze::{Coord, Maze, Predecessors},
    step::{Recorder, Step},
};

/// Outcome of a solve. `found == false` always comes with an empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub found: bool,
    pub path: Vec<Coord>,
}

impl Solution {
    pub fn not_found() -> Self {
        Solution {
            found: false,
            path: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Bfs,
    Dfs,
    AStar,
    Dijkstra,
    BidirectionalBfs,
    Greedy,
    Jps,
}

impl Solver {
    /// Every registered solver.
    pub const ALL: [Solver; 7] = [
        Solver::Bfs,
        Solver::Dfs,
        Solver::AStar,
        Solver::Dijkstra,
        Solver::BidirectionalBfs,
        Solver::Greedy,
        Solver::Jps,
    ];

    /// Identifier accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Solver::Bfs => "bfs",
            Solver::Dfs => "dfs",
            Solver::AStar => "astar",
            Solver::Dijkstra => "dijkstra",
            Solver::BidirectionalBfs => "bidirectional-bfs",
            Solver::Greedy => "greedy",
            Solver::Jps => "jps",
        }
    }

    /// Whether the solver always returns a shortest path.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Solver::Dfs | Solver::Greedy)
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::BidirectionalBfs => write!(f, "Bidirectional BFS"),
            Solver::Greedy => write!(f, "Greedy Best-First Search"),
            Solver::Jps => write!(f, "Jump Point Search (JPS)"),
        }
    }
}

impl FromStr for Solver {
    type Err = Error;

    /// Accepts kebab-case, snake_case and camelCase spellings of [`Solver::name`].
    fn from_str(s: &str) -> Result<Self> {
        let key = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '*'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "bfs" => Ok(Solver::Bfs),
            "dfs" => Ok(Solver::Dfs),
            "astar" | "a" => Ok(Solver::AStar),
            "dijkstra" => Ok(Solver::Dijkstra),
            "bidirectionalbfs" | "bidirectional" => Ok(Solver::BidirectionalBfs),
            "greedy" | "greedybestfirst" => Ok(Solver::Greedy),
            "jps" | "jumppointsearch" => Ok(Solver::Jps),
            _ => Err(Error::UnknownAlgorithm {
                kind: "solver",
                name: s.to_string(),
            }),
        }
    }
}

/// Manhattan distance, admissible and consistent on a 4-connected grid.
pub fn heuristic(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Clears the transient state of the previous run.
fn begin(maze: &mut Maze, recorder: &mut Recorder) -> Result<()> {
    maze.reset_visited();
    recorder.record(Step::Reset)
}

/// Records `coord` as the next expanded cell.
fn expand(maze: &mut Maze, recorder: &mut Recorder, coord: Coord) -> Result<()> {
    maze.record_visit(coord);
    recorder.record(Step::Visit(coord))
}

/// Rebuilds the path from `predecessors` and reports success.
fn finish(maze: &mut Maze, recorder: &mut Recorder, predecessors: &Predecessors) -> Result<Solution> {
    let path = maze.reconstruct_path(predecessors).to_vec();
    report_path(recorder, path)
}

fn report_path(recorder: &mut Recorder, path: Vec<Coord>) -> Result<Solution> {
    recorder.record(Step::Path(path.clone()))?;
    Ok(Solution { found: true, path })
}

/// Searches a path from `maze.start()` to `maze.end()` with the selected solver.
///
/// The maze keeps the path, the in-path marks and the visitation order of the run.
pub fn solve_maze(maze: &mut Maze, solver: Solver, recorder: &mut Recorder) -> Result<Solution> {
    tracing::debug!(
        "[solve] {} from {:?} to {:?}",
        solver,
        maze.start(),
        maze.end()
    );
    let result = match solver {
        Solver::Bfs => solve_bfs(maze, recorder),
        Solver::Dfs => solve_dfs(maze, recorder),
        Solver::AStar => solve_astar(maze, recorder),
        Solver::Dijkstra => solve_dijkstra(maze, recorder),
        Solver::BidirectionalBfs => solve_bidirectional_bfs(maze, recorder),
        Solver::Greedy => solve_greedy(maze, recorder),
        Solver::Jps => solve_jps(maze, recorder),
    };
    match &result {
        Ok(solution) => tracing::info!(
            "[solve] {}: found={} path_length={} visited={}",
            solver,
            solution.found,
            solution.path.len(),
            maze.visited_cells().len()
        ),
        Err(err) => tracing::info!("[solve] {} stopped: {}", solver, err),
    }
    result
}
