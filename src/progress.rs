//! Progress reporting for the maze solver
//!
//! Visit events flow from search tasks to a reporter thread over a
//! bounded crossbeam channel; the reporter drives an indicatif spinner.
//! Sending must never block or slow the solver, so a full channel
//! simply drops events.

use crate::maze::{Maze, NodeId, TaskId};
use console::style;
use crossbeam_channel::{bounded, Receiver, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::trace;

/// One node visit by one task
#[derive(Debug, Clone, Copy)]
pub struct VisitEvent {
    pub task: TaskId,
    pub node: NodeId,
}

/// Create a bounded visit-event channel
pub fn visit_channel(capacity: usize) -> (Sender<VisitEvent>, Receiver<VisitEvent>) {
    bounded(capacity)
}

/// Maze wrapper that reports every visit on a channel
///
/// Forwards all oracle calls to the wrapped maze and emits a
/// [`VisitEvent`] per `observe_visit`. Dropping the last receiver is
/// harmless; events are then discarded.
pub struct Observed<'a, M: Maze + ?Sized> {
    inner: &'a M,
    events: Sender<VisitEvent>,
}

impl<'a, M: Maze + ?Sized> Observed<'a, M> {
    pub fn new(inner: &'a M, events: Sender<VisitEvent>) -> Self {
        Self { inner, events }
    }
}

impl<M: Maze + ?Sized> Maze for Observed<'_, M> {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.neighbors(node)
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.inner.is_goal(node)
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn observe_visit(&self, task: TaskId, node: NodeId) {
        // Never block the solver on the display; a full or closed
        // channel just loses the event.
        let _ = self.events.try_send(VisitEvent { task, node });
        self.inner.observe_visit(task, node);
    }
}

/// Maze wrapper that logs every visit at trace level
///
/// Backs the `--trace-visits` CLI flag. Composes with [`Observed`]:
/// either wrapper accepts any maze, including the other.
pub struct Traced<'a, M: Maze + ?Sized> {
    inner: &'a M,
}

impl<'a, M: Maze + ?Sized> Traced<'a, M> {
    pub fn new(inner: &'a M) -> Self {
        Self { inner }
    }
}

impl<M: Maze + ?Sized> Maze for Traced<'_, M> {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.neighbors(node)
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.inner.is_goal(node)
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn observe_visit(&self, task: TaskId, node: NodeId) {
        trace!(task = %task, node = %node, "visit");
        self.inner.observe_visit(task, node);
    }
}

/// Reporter thread displaying solve progress
pub struct ProgressReporter {
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Spawn a reporter draining `events` until the channel closes
    pub fn spawn(events: Receiver<VisitEvent>) -> Self {
        let handle = thread::Builder::new()
            .name("progress".into())
            .spawn(move || reporter_loop(events))
            .expect("failed to spawn progress thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the reporter to drain remaining events and stop.
    /// Call after every event sender has been dropped.
    pub fn finish(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn reporter_loop(events: Receiver<VisitEvent>) {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));

    let started = Instant::now();
    let mut visits = 0u64;
    let mut tasks = HashSet::new();

    loop {
        match events.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                visits += 1;
                tasks.insert(event.task);
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }

        let rate = visits as f64 / started.elapsed().as_secs_f64().max(0.001);
        bar.set_message(format!(
            "Visited: {} | Tasks: {} | Rate: {:.0}/s",
            visits,
            tasks.len(),
            rate
        ));
    }

    bar.finish_and_clear();
}

/// Print the solve header
pub fn print_header(maze_file: &str, nodes: usize, goals: usize, workers: usize) {
    println!("{}", style("maze-racer").bold().cyan());
    println!("  Maze:    {} ({} cells, {} goals)", maze_file, nodes, goals);
    println!("  Workers: {}", workers);
    println!();
}

/// Render the solve summary. Quiet mode keeps only the path-length
/// line and drops the stats.
pub fn format_summary(
    path_len: Option<usize>,
    visited: u64,
    tasks: u64,
    forks: u64,
    duration: Duration,
    quiet: bool,
) -> String {
    let outcome = match path_len {
        Some(len) => format!("{} path of {} nodes", style("Found").bold().green(), len),
        None => format!("{}", style("No path to any goal").bold().yellow()),
    };
    if quiet {
        return outcome;
    }
    format!(
        "\n{}\n  Visited: {} | Tasks: {} | Forks: {} | Time: {:.2?}",
        outcome, visited, tasks, forks, duration
    )
}

/// Print the solve summary
pub fn print_summary(
    path_len: Option<usize>,
    visited: u64,
    tasks: u64,
    forks: u64,
    duration: Duration,
    quiet: bool,
) {
    println!(
        "{}",
        format_summary(path_len, visited, tasks, forks, duration, quiet)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::GraphMaze;

    #[test]
    fn test_quiet_summary_has_no_stats_line() {
        let quiet = format_summary(Some(7), 40, 5, 2, Duration::from_millis(3), true);
        assert!(quiet.contains('7'));
        assert!(!quiet.contains("Visited"));
        assert!(!quiet.contains("Forks"));

        let full = format_summary(Some(7), 40, 5, 2, Duration::from_millis(3), false);
        assert!(full.contains("Visited: 40"));
        assert!(full.contains("Forks: 2"));
    }

    #[test]
    fn test_observed_forwards_oracle_calls() {
        let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[2]).unwrap();
        let (tx, rx) = visit_channel(8);
        let observed = Observed::new(&maze, tx);

        assert_eq!(observed.node_count(), 3);
        assert_eq!(observed.neighbors(NodeId(1)), maze.neighbors(NodeId(1)));
        assert!(observed.is_goal(NodeId(2)));

        observed.observe_visit(TaskId(0), NodeId(1));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.node, NodeId(1));
        assert_eq!(event.task, TaskId(0));
    }

    #[test]
    fn test_traced_forwards_and_composes_with_observed() {
        let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[2]).unwrap();
        let (tx, rx) = visit_channel(8);
        let observed = Observed::new(&maze, tx);
        let traced = Traced::new(&observed);

        assert_eq!(traced.node_count(), 3);
        assert_eq!(traced.neighbors(NodeId(1)), maze.neighbors(NodeId(1)));
        assert!(traced.is_goal(NodeId(2)));

        // The trace wrapper must still forward visits to the inner maze.
        traced.observe_visit(TaskId(1), NodeId(2));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.node, NodeId(2));
        assert_eq!(event.task, TaskId(1));
    }

    #[test]
    fn test_observed_forwards_visits_to_inner_maze() {
        // Stacked observers: the outer wrapper must pass each visit
        // through to whatever it wraps.
        let maze = GraphMaze::from_edges(2, &[(0, 1)], &[]).unwrap();
        let (inner_tx, inner_rx) = visit_channel(8);
        let (outer_tx, outer_rx) = visit_channel(8);
        let inner = Observed::new(&maze, inner_tx);
        let outer = Observed::new(&inner, outer_tx);

        outer.observe_visit(TaskId(3), NodeId(1));
        assert_eq!(outer_rx.try_recv().unwrap().node, NodeId(1));
        assert_eq!(inner_rx.try_recv().unwrap().node, NodeId(1));
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let maze = GraphMaze::from_edges(2, &[(0, 1)], &[]).unwrap();
        let (tx, rx) = visit_channel(1);
        let observed = Observed::new(&maze, tx);

        observed.observe_visit(TaskId(0), NodeId(0));
        observed.observe_visit(TaskId(0), NodeId(1)); // dropped, must not block

        assert_eq!(rx.try_recv().unwrap().node, NodeId(0));
        assert!(rx.try_recv().is_err());
    }
}
