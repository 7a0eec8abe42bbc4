use std::time::{Duration, Instant};

use crate::{
    error::Result,
    maze::Maze,
    solvers::{Solver, solve_maze},
    step::Recorder,
};

/// Metrics of one solver run on a copy of a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub solver: Solver,
    pub found: bool,
    pub path_length: usize,
    pub visited: usize,
    pub elapsed: Duration,
}

/// Runs every solver in `solvers` on its own clone of `maze`, in order.
/// The maze itself is left untouched.
pub fn compare_solvers(maze: &Maze, solvers: &[Solver]) -> Result<Vec<Comparison>> {
    solvers
        .iter()
        .map(|&solver| {
            let mut scratch = maze.clone();
            let started = Instant::now();
            let solution = solve_maze(&mut scratch, solver, &mut Recorder::instant())?;
            let elapsed = started.elapsed();
            tracing::debug!("[compare] {} took {:?}", solver, elapsed);
            Ok(Comparison {
                solver,
                found: solution.found,
                path_length: solution.path.len(),
                visited: scratch.visited_cells().len(),
                elapsed,
            })
        })
        .collect()
}

/// Formats comparison rows as a fixed-width text table.
pub fn format_table(rows: &[Comparison]) -> String {
    let mut table = format!(
        "{:<28} {:>6} {:>8} {:>8} {:>10}\n",
        "solver", "found", "path", "visited", "time"
    );
    for row in rows {
        table.push_str(&format!(
            "{:<28} {:>6} {:>8} {:>8} {:>10.2?}\n",
            row.solver.to_string(),
            row.found,
            row.path_length,
            row.visited,
            row.elapsed
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze, get_rng};

    #[test]
    fn test_compare_leaves_maze_untouched() {
        let mut maze = Maze::new(9, 9);
        generate_maze(&mut maze, Generator::Prim, &mut get_rng(Some(3)), &mut Recorder::instant())
            .unwrap();
        let before = maze.clone();

        let rows = compare_solvers(&maze, &Solver::ALL).unwrap();
        assert_eq!(rows.len(), Solver::ALL.len());
        assert_eq!(maze.grid(), before.grid());
        assert!(maze.path().is_empty());

        let bfs = rows[0].path_length;
        for row in &rows {
            assert!(row.found);
            assert!(row.visited > 0);
            if row.solver.is_optimal() {
                assert_eq!(row.path_length, bfs, "{}", row.solver);
            } else {
                assert!(row.path_length >= bfs, "{}", row.solver);
            }
        }
    }

    #[test]
    fn test_format_table_has_a_row_per_solver() {
        let maze = Maze::new(2, 2);
        let rows = compare_solvers(&maze, &[Solver::Bfs, Solver::Greedy]).unwrap();
        let table = format_table(&rows);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("Greedy Best-First Search"));
    }
}
