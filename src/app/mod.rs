//! Terminal animation of a generate-then-solve run.
//!
//! Three threads cooperate: the compute thread runs the algorithms and pushes
//! every step into a bounded channel, the main thread replays the steps onto a
//! mirror maze and redraws it, and the input thread raises the cancel flag on
//! Esc or `q`.

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    error::{Error, Result},
    generators::{Generator, generate_maze, get_rng},
    maze::{Coord, Maze},
    render::{self, Tile},
    solvers::{Solution, Solver, solve_maze},
    step::{CancelFlag, Recorder, Step, apply_step, frame_delay},
};

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    Finished { maze: Maze, solution: Solution },
    Cancelled,
}

/// Settings of one animated run.
#[derive(Debug, Clone)]
pub struct Animation {
    pub rows: usize,
    pub cols: usize,
    pub generator: Generator,
    pub solver: Solver,
    pub seed: Option<u64>,
    /// Steps per second; 0 replays as fast as the terminal allows.
    pub speed: u32,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

impl Animation {
    /// Maximum number of steps to buffer in the channel between compute and main threads
    const MAX_STEPS_IN_CHANNEL_BUFFER: usize = 1000;
    /// How often the main and input threads check the cancel and done flags
    const POLL_TIMEOUT: Duration = Duration::from_millis(100);
    /// Rows reserved under the maze for the status line
    const STATUS_ROWS: u16 = 2;

    pub fn new(rows: usize, cols: usize, generator: Generator, solver: Solver) -> Self {
        Animation {
            rows,
            cols,
            generator,
            solver,
            seed: None,
            speed: 30,
            start: None,
            end: None,
        }
    }

    fn build_maze(&self) -> Result<Maze> {
        let mut maze = Maze::try_new(self.rows, self.cols)?;
        if let Some(start) = self.start {
            maze.set_start(start)?;
        }
        if let Some(end) = self.end {
            maze.set_end(end)?;
        }
        Ok(maze)
    }

    /// Whether the current terminal can show the whole maze plus the status line.
    pub fn fits_terminal(&self) -> bool {
        let Ok((term_width, term_height)) = terminal::size() else {
            return false;
        };
        let width = (2 * self.cols + 1) * Tile::WIDTH as usize;
        let height = 2 * self.rows + 1 + Self::STATUS_ROWS as usize;
        width <= term_width as usize && height <= term_height as usize
    }

    /// Runs the animation on the alternate screen and restores the terminal afterwards.
    pub fn run(&self, stdout: &mut Stdout) -> Result<Outcome> {
        let mirror = self.build_maze()?;
        setup_terminal(stdout)?;
        let outcome = self.run_on_screen(stdout, mirror);
        restore_terminal(stdout)?;
        outcome
    }

    fn run_on_screen(&self, stdout: &mut Stdout, mut mirror: Maze) -> Result<Outcome> {
        let cancel = CancelFlag::new();
        // Set by the main thread once the replay is over, so the input thread can exit
        let done = Arc::new(AtomicBool::new(false));
        let (step_tx, step_rx) =
            std::sync::mpsc::sync_channel::<Step>(Self::MAX_STEPS_IN_CHANNEL_BUFFER);

        let input_cancel = cancel.clone();
        let input_done = done.clone();
        let input_handle = thread::spawn(move || listen_for_cancel(&input_cancel, &input_done));

        let mut maze = mirror.clone();
        let (generator, solver, seed) = (self.generator, self.solver, self.seed);
        let compute_cancel = cancel.clone();
        let compute_handle = thread::spawn(move || -> Result<(Maze, Solution)> {
            let mut recorder = Recorder::instant()
                .with_events(step_tx)
                .with_cancel(compute_cancel);
            generate_maze(&mut maze, generator, &mut get_rng(seed), &mut recorder)?;
            let solution = solve_maze(&mut maze, solver, &mut recorder)?;
            Ok((maze, solution))
            // The recorder and its sender are dropped here, ending the replay
        });

        let replayed = self.replay(stdout, &mut mirror, &step_rx, &cancel);
        // Unblocks the compute thread if it is still sending
        drop(step_rx);
        if replayed.is_err() {
            cancel.cancel();
        }
        done.store(true, Ordering::Relaxed);

        join(input_handle)?;
        let computed = join(compute_handle);
        replayed?;

        match computed {
            Ok((maze, solution)) => {
                self.show_status(stdout, &maze, &solution)?;
                wait_for_exit_key()?;
                Ok(Outcome::Finished { maze, solution })
            }
            Err(Error::Cancelled) => {
                tracing::info!("Animation was cancelled by user.");
                Ok(Outcome::Cancelled)
            }
            Err(err) => Err(err),
        }
    }

    /// Applies incoming steps to `mirror` and redraws what changed, one frame per step.
    fn replay(
        &self,
        stdout: &mut Stdout,
        mirror: &mut Maze,
        steps: &Receiver<Step>,
        cancel: &CancelFlag,
    ) -> Result<()> {
        let delay = frame_delay(self.speed);
        queue!(stdout, terminal::Clear(ClearType::All))?;
        render::draw(stdout, mirror)?;

        loop {
            if cancel.is_cancelled() {
                tracing::debug!("[replay] cancel flag raised, stopping");
                return Ok(());
            }
            let step = match steps.recv_timeout(Self::POLL_TIMEOUT) {
                Ok(step) => step,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };

            apply_step(mirror, &step);
            match &step {
                Step::Carve(a, b) => {
                    render::draw_cell(stdout, mirror, *a)?;
                    render::draw_cell(stdout, mirror, *b)?;
                }
                Step::Visit(coord) => render::draw_cell(stdout, mirror, *coord)?,
                _ => render::draw(stdout, mirror)?,
            }

            if let Some(delay) = delay {
                thread::sleep(delay);
            }
        }
    }

    fn show_status(&self, stdout: &mut Stdout, maze: &Maze, solution: &Solution) -> Result<()> {
        let stats = maze.stats();
        let msg = if solution.found {
            format!(
                "Path found! length {} | visited {} of {} cells | efficiency {:.1}%  ",
                stats.path_length, stats.visited_count, stats.total_cells, stats.efficiency
            )
        } else {
            "No path found. ".to_string()
        };
        queue!(
            stdout,
            cursor::MoveTo(0, (2 * maze.rows() + 1) as u16),
            style::PrintStyledContent(msg.with(Color::Green).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc or q to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            ),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Waits for a worker thread and re-raises its panic on this thread.
fn join<T>(handle: JoinHandle<T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn is_exit_key(key: &event::KeyEvent) -> bool {
    key.kind == event::KeyEventKind::Press && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
}

/// Runs on the input thread until the replay is done or the user asks to exit.
fn listen_for_cancel(cancel: &CancelFlag, done: &AtomicBool) -> std::io::Result<()> {
    loop {
        if done.load(Ordering::Relaxed) || cancel.is_cancelled() {
            return Ok(());
        }
        if !event::poll(Animation::POLL_TIMEOUT)? {
            continue;
        }
        if let event::Event::Key(key) = event::read()? {
            if is_exit_key(&key) {
                tracing::debug!("[input loop] exit key pressed, cancelling run");
                cancel.cancel();
                return Ok(());
            }
        }
    }
}

/// Blocks until Esc or `q` is pressed.
fn wait_for_exit_key() -> std::io::Result<()> {
    loop {
        if let event::Event::Key(key) = event::read()? {
            if is_exit_key(&key) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_maze_applies_endpoints() {
        let mut animation = Animation::new(4, 5, Generator::Prim, Solver::AStar);
        animation.start = Some((3, 0));
        animation.end = Some((0, 4));
        let maze = animation.build_maze().unwrap();
        assert_eq!(maze.start(), (3, 0));
        assert_eq!(maze.end(), (0, 4));
    }

    #[test]
    fn test_build_maze_rejects_bad_input() {
        let mut animation = Animation::new(3, 3, Generator::Prim, Solver::Bfs);
        animation.end = Some((3, 3));
        assert!(matches!(
            animation.build_maze(),
            Err(Error::OutOfBounds { .. })
        ));
        let animation = Animation::new(0, 3, Generator::Prim, Solver::Bfs);
        assert!(matches!(
            animation.build_maze(),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_exit_keys() {
        let esc = event::KeyEvent::new(KeyCode::Esc, event::KeyModifiers::NONE);
        let q = event::KeyEvent::new(KeyCode::Char('q'), event::KeyModifiers::NONE);
        let enter = event::KeyEvent::new(KeyCode::Enter, event::KeyModifiers::NONE);
        assert!(is_exit_key(&esc));
        assert!(is_exit_key(&q));
        assert!(!is_exit_key(&enter));
    }

    #[test]
    fn test_replayed_steps_rebuild_the_maze() {
        // The mirror the main thread keeps must end up identical to the computed maze
        let (tx, rx) = std::sync::mpsc::sync_channel(4096);
        let mut maze = Maze::new(6, 7);
        let mut mirror = maze.clone();
        let mut recorder = Recorder::instant().with_events(tx);
        generate_maze(&mut maze, Generator::RecurDiv, &mut get_rng(Some(5)), &mut recorder)
            .unwrap();
        solve_maze(&mut maze, Solver::Bfs, &mut recorder).unwrap();
        drop(recorder);

        for step in rx.iter() {
            apply_step(&mut mirror, &step);
        }
        // Search bookkeeping differs (the mirror only sees expansions), walls and route do not
        assert!(
            mirror
                .grid()
                .iter()
                .zip(maze.grid().iter())
                .all(|(a, b)| a.walls == b.walls && a.in_path == b.in_path)
        );
        assert_eq!(mirror.path(), maze.path());
        assert_eq!(mirror.visited_cells(), maze.visited_cells());
    }
}
