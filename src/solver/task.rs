//! Search task: one unit of sequential depth-first exploration
//!
//! A task owns a local frontier stack and walks it depth-first. At
//! each node it claims unvisited neighbors through the shared state;
//! a single claimed neighbor keeps the corridor inside this task,
//! while two or more trigger a fork into one child task per neighbor.
//! Children run on the surrounding rayon pool and are always joined,
//! even after the goal signal fires, so no task is ever leaked.

use crate::error::Result;
use crate::maze::{Maze, NodeId, TaskId};
use crate::solver::path::reconstruct;
use crate::solver::shared::SharedSearchState;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Terminal outcome of one search task
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TaskOutcome {
    /// A goal was found beneath this task; the path runs from the
    /// task's own start node to the goal.
    Succeeded(Vec<NodeId>),

    /// The task's frontier was exhausted without reaching a goal
    /// (or the task stood down on the goal/cancel signal).
    Exhausted,
}

/// One depth-first search task
pub(crate) struct SearchTask<'a, M: Maze + ?Sized> {
    id: TaskId,
    maze: &'a M,
    shared: &'a SharedSearchState,

    /// Where this task's traversal began; its result path starts here
    start: NodeId,

    /// Task-local stack of claimed nodes awaiting exploration
    frontier: Vec<NodeId>,
}

impl<'a, M: Maze + ?Sized> SearchTask<'a, M> {
    /// Create a task rooted at `start`. The caller must already hold
    /// the claim on `start`.
    pub(crate) fn new(maze: &'a M, shared: &'a SharedSearchState, start: NodeId) -> Self {
        shared.stats().record_task();
        Self {
            id: shared.next_task_id(),
            maze,
            shared,
            start,
            frontier: vec![start],
        }
    }

    /// Run the task to completion
    pub(crate) fn run(mut self) -> Result<TaskOutcome> {
        while let Some(current) = self.frontier.pop() {
            // Best-effort short-circuit; correctness never depends on it.
            if self.shared.should_stop() {
                trace!(task = %self.id, "standing down on stop signal");
                return Ok(TaskOutcome::Exhausted);
            }

            self.maze.observe_visit(self.id, current);

            // Goal check comes before any neighbor bookkeeping.
            if self.maze.is_goal(current) {
                self.shared.signal_goal();
                debug!(task = %self.id, goal = %current, "goal reached");
                return Ok(TaskOutcome::Succeeded(reconstruct(
                    self.shared,
                    self.start,
                    current,
                )?));
            }

            // Claim neighbors; the winning claim for each node also
            // records its predecessor before the node can reach any
            // frontier.
            let mut owned = Vec::new();
            for neighbor in self.maze.neighbors(current) {
                if self.shared.claim(neighbor) {
                    self.shared.record_predecessor(neighbor, current);
                    owned.push(neighbor);
                }
            }

            match owned.len() {
                0 => self.shared.stats().record_dead_end(),
                // Single corridor: keep it in this task, no fork.
                1 => self.frontier.push(owned[0]),
                _ => {
                    if let Some(path) = self.fork(current, owned)? {
                        return Ok(TaskOutcome::Succeeded(path));
                    }
                    // All children exhausted; keep draining our own
                    // frontier (nodes stacked before the fork point).
                }
            }
        }

        Ok(TaskOutcome::Exhausted)
    }

    /// Fork one child task per newly owned neighbor, join them all,
    /// and select the first success.
    ///
    /// When the task limit is reached this degrades to serial
    /// exploration: the neighbors go onto our own frontier instead.
    fn fork(&mut self, current: NodeId, owned: Vec<NodeId>) -> Result<Option<Vec<NodeId>>> {
        let count = owned.len();

        if !self.shared.try_reserve_tasks(count) {
            self.shared.stats().record_serial_fallback();
            trace!(task = %self.id, branches = count, "task limit reached, exploring serially");
            self.frontier.extend(owned);
            return Ok(None);
        }

        self.shared.stats().record_fork();
        trace!(task = %self.id, at = %current, branches = count, "forking");

        let maze = self.maze;
        let shared = self.shared;
        let children: Vec<SearchTask<'a, M>> = owned
            .into_iter()
            .map(|neighbor| SearchTask::new(maze, shared, neighbor))
            .collect();

        // Join *all* children before reporting anything, even if the
        // goal signal fires meanwhile; losing results are discarded
        // after the join, never abandoned before it.
        let results: Vec<Result<TaskOutcome>> =
            children.into_par_iter().map(|child| child.run()).collect();

        self.shared.release_tasks(count);

        let mut winner = None;
        for result in results {
            match result? {
                TaskOutcome::Succeeded(tail) if winner.is_none() => winner = Some(tail),
                _ => {}
            }
        }

        match winner {
            Some(tail) => {
                // Child paths begin at the forked neighbor; prepend our
                // own leg up to the fork point.
                let mut path = reconstruct(self.shared, self.start, current)?;
                path.extend(tail);
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}
