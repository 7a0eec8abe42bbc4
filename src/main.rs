use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mazelab::{
    app::{Animation, Outcome},
    compare::{compare_solvers, format_table},
    generators::{Generator, generate_maze, get_rng},
    maze::{
        Coord, Maze,
        export::{MazeExport, to_svg},
    },
    render,
    solvers::{Solver, solve_maze},
    step::Recorder,
};

/// Pixel size of one cell in exported SVG files.
const SVG_CELL_SIZE: usize = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate mazes, solve them and watch it happen")]
struct Cli {
    /// Number of maze rows.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=255))]
    rows: u16,
    /// Number of maze columns.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=255))]
    cols: u16,
    /// Generation algorithm, e.g. recursive-backtracking, prim, kruskal, wilson.
    #[arg(long, default_value = "recursive-backtracking")]
    generator: String,
    /// Solving algorithm, e.g. bfs, dfs, astar, dijkstra, jps.
    #[arg(long, default_value = "astar")]
    solver: String,
    /// Seed for a reproducible maze.
    #[arg(long)]
    seed: Option<u64>,
    /// Animation speed in steps per second; 0 prints the result without animating.
    #[arg(long, default_value_t = 0)]
    speed: u32,
    /// Start cell as ROW,COL (defaults to the top-left cell).
    #[arg(long, value_parser = parse_coord, conflicts_with = "import")]
    start: Option<Coord>,
    /// End cell as ROW,COL (defaults to the bottom-right cell).
    #[arg(long, value_parser = parse_coord, conflicts_with = "import")]
    end: Option<Coord>,
    /// Load the maze from a JSON export instead of generating one. The export's own
    /// start and end are used.
    #[arg(long)]
    import: Option<PathBuf>,
    /// Write the maze as JSON to this path.
    #[arg(long)]
    export_json: Option<PathBuf>,
    /// Write the maze as SVG to this path.
    #[arg(long)]
    export_svg: Option<PathBuf>,
    /// Run every solver on the maze and print a comparison table.
    #[arg(long)]
    compare: bool,
    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let animated = cli.speed > 0 && cli.import.is_none();
    let _guard = init_tracing(cli.log_file.as_deref(), animated)?;

    let generator = cli.generator.parse::<Generator>()?;
    let solver = cli.solver.parse::<Solver>()?;

    let maze = if animated {
        match animate(&cli, generator, solver)? {
            Some(maze) => maze,
            None => return Ok(()),
        }
    } else {
        let mut maze = match &cli.import {
            Some(path) => import_maze(path)?,
            None => generate(&cli, generator)?,
        };
        let solution = solve_maze(&mut maze, solver, &mut Recorder::instant())?;
        print!("{}", render::to_string(&maze, "\n"));
        if !solution.found {
            println!("No path found with {}.", solver);
        }
        maze
    };

    print_stats(&maze);

    if cli.compare {
        let rows = compare_solvers(&maze, &Solver::ALL).context("solver comparison failed")?;
        print!("{}", format_table(&rows));
    }
    if let Some(path) = &cli.export_json {
        let json = MazeExport::from_maze(&maze).to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Exported maze JSON to {}", path.display());
    }
    if let Some(path) = &cli.export_svg {
        std::fs::write(path, to_svg(&maze, SVG_CELL_SIZE))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Exported maze SVG to {}", path.display());
    }
    Ok(())
}

/// Runs the terminal animation. Returns `None` when the user cancelled it.
fn animate(cli: &Cli, generator: Generator, solver: Solver) -> Result<Option<Maze>> {
    let animation = Animation {
        seed: cli.seed,
        speed: cli.speed,
        start: cli.start,
        end: cli.end,
        ..Animation::new(cli.rows as usize, cli.cols as usize, generator, solver)
    };
    if !animation.fits_terminal() {
        anyhow::bail!(
            "a {}x{} maze does not fit in this terminal; enlarge it or rerun with --speed 0",
            cli.rows,
            cli.cols
        );
    }
    match animation.run(&mut std::io::stdout())? {
        Outcome::Finished { maze, .. } => Ok(Some(maze)),
        Outcome::Cancelled => Ok(None),
    }
}

fn generate(cli: &Cli, generator: Generator) -> Result<Maze> {
    let mut maze = Maze::try_new(cli.rows as usize, cli.cols as usize)?;
    if let Some(start) = cli.start {
        maze.set_start(start)?;
    }
    if let Some(end) = cli.end {
        maze.set_end(end)?;
    }
    generate_maze(&mut maze, generator, &mut get_rng(cli.seed), &mut Recorder::instant())?;
    Ok(maze)
}

fn import_maze(path: &Path) -> Result<Maze> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let maze = MazeExport::from_json(&json)?.into_maze()?;
    tracing::info!(
        "Imported a {}x{} maze from {}",
        maze.rows(),
        maze.cols(),
        path.display()
    );
    Ok(maze)
}

fn print_stats(maze: &Maze) {
    let stats = maze.stats();
    println!(
        "cells: {} | visited: {} | path: {} | efficiency: {:.1}%",
        stats.total_cells, stats.visited_count, stats.path_length, stats.efficiency
    );
}

fn parse_coord(s: &str) -> std::result::Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{s}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("`{part}` is not a cell index"))
    };
    Ok((parse(row)?, parse(col)?))
}

/// Logs go to stderr, or to `log_file` through a non-blocking writer. While the
/// terminal animation owns the screen, stderr logging is off unless `RUST_LOG` says otherwise.
fn init_tracing(log_file: Option<&Path>, animated: bool) -> Result<Option<WorkerGuard>> {
    let default_level = if animated && log_file.is_none() {
        "off"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(path) = log_file else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path {} has no file name", path.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" 0 , 12 "), Ok((0, 12)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "mazelab",
            "--rows",
            "7",
            "--generator",
            "wilson",
            "--start",
            "1,2",
            "--compare",
        ])
        .unwrap();
        assert_eq!(cli.rows, 7);
        assert_eq!(cli.cols, 10);
        assert_eq!(cli.start, Some((1, 2)));
        assert!(cli.compare);
        assert_eq!(cli.generator.parse::<Generator>().unwrap(), Generator::Wilson);
    }

    #[test]
    fn test_cli_rejects_oversized_maze() {
        assert!(Cli::try_parse_from(["mazelab", "--cols", "256"]).is_err());
        assert!(Cli::try_parse_from(["mazelab", "--rows", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_endpoints_with_import() {
        assert!(Cli::try_parse_from(["mazelab", "--import", "maze.json", "--start", "1,1"]).is_err());
        assert!(Cli::try_parse_from(["mazelab", "--import", "maze.json", "--end", "0,2"]).is_err());
        assert!(Cli::try_parse_from(["mazelab", "--import", "maze.json"]).is_ok());
    }
}
