use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod binary_tree;
mod eller;
mod kruskal;
mod prim;
mod recur_backtrack;
mod recur_div;
mod sidewinder;
mod wilson;

pub use binary_tree::binary_tree;
pub use eller::eller;
pub use kruskal::randomized_kruskal;
pub use prim::randomized_prim;
pub use recur_backtrack::recursive_backtrack;
pub use recur_div::recursive_division;
pub use sidewinder::sidewinder;
pub use wilson::wilson;

use crate::{
    error::{Error, Result},
    maze::Maze,
    step::Recorder,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    RecurBacktrack,
    Prim,
    Kruskal,
    RecurDiv,
    Wilson,
    Eller,
    BinaryTree,
    Sidewinder,
}

impl Generator {
    /// Every registered generator.
    pub const ALL: [Generator; 8] = [
        Generator::RecurBacktrack,
        Generator::Prim,
        Generator::Kruskal,
        Generator::RecurDiv,
        Generator::Wilson,
        Generator::Eller,
        Generator::BinaryTree,
        Generator::Sidewinder,
    ];

    /// Identifier accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Generator::RecurBacktrack => "recursive-backtracking",
            Generator::Prim => "prim",
            Generator::Kruskal => "kruskal",
            Generator::RecurDiv => "recursive-division",
            Generator::Wilson => "wilson",
            Generator::Eller => "eller",
            Generator::BinaryTree => "binary-tree",
            Generator::Sidewinder => "sidewinder",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
            Generator::Wilson => write!(f, "Wilson's Algorithm"),
            Generator::Eller => write!(f, "Eller's Algorithm"),
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
        }
    }
}

impl FromStr for Generator {
    type Err = Error;

    /// Accepts kebab-case, snake_case and camelCase spellings of [`Generator::name`].
    fn from_str(s: &str) -> Result<Self> {
        let key = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "recursivebacktracking" | "backtracking" | "dfs" => Ok(Generator::RecurBacktrack),
            "prim" => Ok(Generator::Prim),
            "kruskal" => Ok(Generator::Kruskal),
            "recursivedivision" | "division" => Ok(Generator::RecurDiv),
            "wilson" => Ok(Generator::Wilson),
            "eller" => Ok(Generator::Eller),
            "binarytree" => Ok(Generator::BinaryTree),
            "sidewinder" => Ok(Generator::Sidewinder),
            _ => Err(Error::UnknownAlgorithm {
                kind: "generator",
                name: s.to_string(),
            }),
        }
    }
}

/// Carves `maze` into a perfect maze with the selected algorithm.
///
/// Steps go to `recorder`; every cell's visited flag is false afterwards.
pub fn generate_maze<R: Rng + ?Sized>(
    maze: &mut Maze,
    generator: Generator,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    tracing::debug!(
        "[generate] {} on a {}x{} maze",
        generator,
        maze.rows(),
        maze.cols()
    );
    let result = match generator {
        Generator::RecurBacktrack => recursive_backtrack(maze, rng, recorder),
        Generator::Prim => randomized_prim(maze, rng, recorder),
        Generator::Kruskal => randomized_kruskal(maze, rng, recorder),
        Generator::RecurDiv => recursive_division(maze, rng, recorder),
        Generator::Wilson => wilson(maze, rng, recorder),
        Generator::Eller => eller(maze, rng, recorder),
        Generator::BinaryTree => binary_tree(maze, rng, recorder),
        Generator::Sidewinder => sidewinder(maze, rng, recorder),
    };
    match &result {
        Ok(()) => tracing::info!(
            "[generate] {} carved {} passages",
            generator,
            maze.carved_edges()
        ),
        Err(Error::Cancelled) => {
            // A cancelled run leaves the maze half carved; still drop the transient marks
            maze.clear_visited_flags();
            tracing::info!("[generate] {} cancelled", generator);
        }
        Err(err) => tracing::warn!("[generate] {} failed: {}", generator, err),
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Asserts the carved graph is a spanning tree and no visited flag was left behind.
    pub(crate) fn assert_perfect(maze: &Maze) {
        let cells = maze.rows() * maze.cols();
        assert_eq!(maze.carved_edges(), cells - 1, "a spanning tree has n - 1 edges");
        assert!(maze.grid().iter().all(|cell| !cell.visited));

        let mut seen = vec![false; cells];
        let mut stack = vec![(0, 0)];
        seen[0] = true;
        while let Some(coord) = stack.pop() {
            for next in maze.neighbors(coord, true) {
                let idx = maze.grid().ravel_index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    stack.push(next);
                }
            }
        }
        assert!(seen.into_iter().all(|s| s), "every cell is reachable");
    }

    #[test]
    fn test_generator_names_round_trip() {
        for generator in Generator::ALL {
            assert_eq!(generator.name().parse::<Generator>().unwrap(), generator);
        }
        assert_eq!(
            "recursiveBacktracking".parse::<Generator>().unwrap(),
            Generator::RecurBacktrack
        );
        assert_eq!(
            "binary_tree".parse::<Generator>().unwrap(),
            Generator::BinaryTree
        );
    }

    #[test]
    fn test_unknown_generator() {
        let err = "quantum".parse::<Generator>().unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownAlgorithm { kind: "generator", ref name } if name == "quantum"
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = Maze::new(8, 8);
        let mut b = Maze::new(8, 8);
        generate_maze(&mut a, Generator::Wilson, &mut get_rng(Some(7)), &mut Recorder::instant())
            .unwrap();
        generate_maze(&mut b, Generator::Wilson, &mut get_rng(Some(7)), &mut Recorder::instant())
            .unwrap();
        assert_eq!(a.grid(), b.grid());
    }
}
