use std::time::{Duration, Instant};

use mazelab::{
    generators::{Generator, generate_maze, get_rng},
    maze::Maze,
    solvers::{Solver, solve_maze},
    step::Recorder,
};

const SIZE: usize = u8::MAX as usize;

fn main() -> mazelab::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);

    println!("{SIZE}x{SIZE} maze, {num_iters} iteration(s) each");
    let mut solved = None;
    for generator in Generator::ALL {
        let mut total = Duration::ZERO;
        for i in 0..num_iters {
            let mut maze = Maze::new(SIZE, SIZE);
            let started = Instant::now();
            generate_maze(
                &mut maze,
                generator,
                &mut get_rng(Some(i as u64)),
                &mut Recorder::instant(),
            )?;
            total += started.elapsed();
            solved.get_or_insert(maze);
        }
        println!("{:<28} {:>12.2?}", generator.to_string(), total / num_iters as u32);
    }

    let Some(maze) = solved else {
        return Ok(());
    };
    for solver in Solver::ALL {
        let mut total = Duration::ZERO;
        for _ in 0..num_iters {
            let mut scratch = maze.clone();
            let started = Instant::now();
            solve_maze(&mut scratch, solver, &mut Recorder::instant())?;
            total += started.elapsed();
        }
        println!("{:<28} {:>12.2?}", solver.to_string(), total / num_iters as u32);
    }
    Ok(())
}
