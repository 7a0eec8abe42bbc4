//! Step stream emitted by generators and solvers.
//!
//! Algorithms never sleep. They hand each step to a [`Recorder`], which checks
//! the cancel flag, forwards the step to an optional bounded channel (the host
//! paces itself by how fast it drains it) and keeps a copy when animation was
//! requested.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
    },
    time::Duration,
};

use crate::{
    error::{Error, Result},
    maze::{Coord, Maze, Orientation},
};

/// One observable change made by an algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Every wall was set (`walled`) or every wall was cleared and the boundary closed.
    Fill { walled: bool },
    /// The wall between two adjacent cells was removed.
    Carve(Coord, Coord),
    /// A wall line was inserted after row/column `line`, spanning `span`, open at `passage`.
    Divide {
        orientation: Orientation,
        line: usize,
        span: (usize, usize),
        passage: usize,
    },
    /// A cell was expanded by a search.
    Visit(Coord),
    /// Transient search state was cleared.
    Reset,
    /// A search finished with this path.
    Path(Vec<Coord>),
}

/// Cooperative cancellation token, checked at every step boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub struct Recorder {
    /// Steps per second requested by the host, 0 = run to completion without animation.
    speed: u32,
    steps: Vec<Step>,
    events: Option<SyncSender<Step>>,
    cancel: CancelFlag,
}

impl Recorder {
    pub fn new(speed: u32) -> Self {
        Recorder {
            speed,
            steps: Vec::new(),
            events: None,
            cancel: CancelFlag::new(),
        }
    }

    /// A recorder that keeps nothing: the synchronous, speed 0 mode.
    pub fn instant() -> Self {
        Recorder::new(0)
    }

    /// Forwards every step to `sender`. A bounded channel makes the algorithm
    /// wait for the consumer.
    pub fn with_events(mut self, sender: SyncSender<Step>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Delay a host should leave between two frames, `1000 / speed` ms.
    pub fn frame_delay(&self) -> Option<Duration> {
        frame_delay(self.speed)
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Hands one step to the host.
    ///
    /// Returns [`Error::Cancelled`] when the cancel flag has been raised.
    pub fn record(&mut self, step: Step) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some(sender) = &self.events {
            if sender.send(step.clone()).is_err() {
                tracing::debug!("step receiver dropped, no longer forwarding steps");
                self.events = None;
            }
        }
        if self.speed > 0 {
            self.steps.push(step);
        }
        Ok(())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder::instant()
    }
}

/// Frame delay for a speed in steps per second, `None` for speed 0.
pub fn frame_delay(speed: u32) -> Option<Duration> {
    (speed > 0).then(|| Duration::from_millis(1000 / speed as u64))
}

/// Replays `step` onto `maze`, so a renderer can mirror a run it only sees as a step stream.
pub fn apply_step(maze: &mut Maze, step: &Step) {
    match step {
        Step::Fill { walled: true } => maze.set_all_walls(),
        Step::Fill { walled: false } => {
            maze.clear_walls();
            maze.close_boundary();
        }
        Step::Carve(a, b) => {
            maze.remove_wall(*a, *b);
        }
        Step::Divide {
            orientation,
            line,
            span,
            passage,
        } => maze.add_wall_line(*orientation, *line, span.0..=span.1, *passage),
        Step::Visit(coord) => {
            maze.mark_visited(*coord);
            maze.record_visit(*coord);
        }
        Step::Reset => maze.reset_visited(),
        Step::Path(path) => maze.set_path(path.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_recorder_keeps_nothing() {
        let mut recorder = Recorder::instant();
        recorder.record(Step::Visit((0, 0))).unwrap();
        assert!(recorder.steps().is_empty());
        assert_eq!(recorder.frame_delay(), None);
    }

    #[test]
    fn test_animated_recorder_keeps_steps() {
        let mut recorder = Recorder::new(20);
        recorder.record(Step::Visit((0, 0))).unwrap();
        recorder.record(Step::Carve((0, 0), (0, 1))).unwrap();
        assert_eq!(recorder.steps().len(), 2);
        assert_eq!(recorder.frame_delay(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_cancelled_recorder_errors() {
        let cancel = CancelFlag::new();
        let mut recorder = Recorder::instant().with_cancel(cancel.clone());
        recorder.record(Step::Reset).unwrap();
        cancel.cancel();
        assert!(matches!(recorder.record(Step::Reset), Err(Error::Cancelled)));
    }

    #[test]
    fn test_events_are_forwarded() {
        let (tx, rx) = std::sync::mpsc::sync_channel(4);
        let mut recorder = Recorder::instant().with_events(tx);
        recorder.record(Step::Visit((1, 2))).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Step::Visit((1, 2)));
        drop(rx);
        // A dropped receiver does not fail the run
        recorder.record(Step::Visit((1, 3))).unwrap();
    }

    #[test]
    fn test_apply_step_mirrors_carving() {
        let mut maze = Maze::new(2, 2);
        maze.clear_walls();
        apply_step(&mut maze, &Step::Fill { walled: true });
        apply_step(&mut maze, &Step::Carve((0, 0), (1, 0)));
        assert!(!maze.has_wall_between((0, 0), (1, 0)));
        assert!(maze.has_wall_between((0, 0), (0, 1)));
        apply_step(&mut maze, &Step::Path(vec![(0, 0), (1, 0)]));
        assert!(maze[(1, 0)].in_path);
    }
}
