//! Parallel fork/join maze solver
//!
//! The solver runs a depth-first search that forks into concurrent
//! child tasks wherever the maze branches and joins them back as
//! branches die out or a goal is found. All tasks of one solve share
//! a visited set (node ownership), a goal signal, and a predecessor
//! map for path reconstruction.
//!
//! # Architecture
//!
//! ```text
//!                  ┌────────────────────┐
//!                  │   Solver (rayon    │
//!                  │    thread pool)    │
//!                  └─────────┬──────────┘
//!                            │ root task at `start`
//!                            ▼
//!                  ┌────────────────────┐  fork on branch
//!                  │    SearchTask      ├──────┐
//!                  └─────────┬──────────┘      │
//!            ┌───────────────┼─────────────────┤
//!            ▼               ▼                 ▼
//!      SearchTask       SearchTask        SearchTask
//!            │               │                 │
//!            └───────── claim / predecessors ──┘
//!                  ┌────────────────────┐
//!                  │ SharedSearchState  │
//!                  │  visited ∙ goal    │
//!                  │  predecessor map   │
//!                  └────────────────────┘
//! ```

pub mod path;
pub mod shared;
mod task;

pub use shared::{SharedSearchState, SolveStats, StatsSnapshot};

use crate::config::SolveConfig;
use crate::error::{Result, SolverError};
use crate::maze::{Maze, NodeId};
use crate::solver::task::{SearchTask, TaskOutcome};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a completed solve
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The discovered path from start to a goal, inclusive.
    /// `None` is the legitimate not-found outcome: the whole reachable
    /// component was explored without hitting a goal.
    pub path: Option<Vec<NodeId>>,

    /// Counters collected during the solve
    pub stats: StatsSnapshot,

    /// Wall-clock time taken
    pub duration: Duration,
}

/// Maze solver owning a configured thread pool
///
/// One `Solver` can run any number of solves; every solve gets fresh
/// shared state, so concurrent or repeated invocations never interfere.
pub struct Solver {
    config: SolveConfig,
    pool: rayon::ThreadPool,

    /// Cooperative cancellation, shared with signal handlers
    cancel: Arc<AtomicBool>,
}

impl Solver {
    /// Create a solver from a validated configuration
    pub fn new(config: SolveConfig) -> Result<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("solver-{i}"))
            .build()
            .map_err(|e| SolverError::PoolInit(e.to_string()))?;

        Ok(Self {
            config,
            pool,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get a clone of the cancel flag (for signal handlers).
    /// Setting it makes in-flight solves wind down and return
    /// [`SolverError::Interrupted`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Search `maze` for a path from `start` to any goal.
    ///
    /// Returns a report whose `path` is `None` when no goal is
    /// reachable. Errors signal defects (inconsistent predecessor
    /// state) or external cancellation, never an unsolvable maze.
    pub fn solve<M: Maze + ?Sized>(&self, maze: &M, start: NodeId) -> Result<SolveReport> {
        let started = Instant::now();
        let shared = SharedSearchState::new(self.config.max_tasks, Arc::clone(&self.cancel));

        info!(
            start = %start,
            nodes = maze.node_count(),
            workers = self.config.workers,
            "starting solve"
        );

        // The start node is claimed like any other; fresh state makes
        // this the uniform single arbitration point for ownership.
        let claimed = shared.claim(start);
        debug_assert!(claimed, "start node claimed on fresh shared state");

        let outcome = self
            .pool
            .install(|| SearchTask::new(maze, &shared, start).run())?;

        let path = match outcome {
            TaskOutcome::Succeeded(path) => Some(path),
            TaskOutcome::Exhausted => {
                if shared.cancelled() {
                    return Err(SolverError::Interrupted);
                }
                None
            }
        };

        let stats = shared.stats().snapshot();
        let duration = started.elapsed();

        debug!(
            found = path.is_some(),
            visited = stats.nodes_claimed,
            tasks = stats.tasks_spawned,
            forks = stats.forks,
            duration_ms = duration.as_millis() as u64,
            "solve finished"
        );

        Ok(SolveReport {
            path,
            stats,
            duration,
        })
    }
}

/// Solve `maze` from `start` with the default configuration.
///
/// Convenience wrapper returning just the path; see [`Solver::solve`]
/// for the full report.
pub fn solve<M: Maze + ?Sized>(maze: &M, start: NodeId) -> Result<Option<Vec<NodeId>>> {
    Ok(Solver::new(SolveConfig::default())?.solve(maze, start)?.path)
}
