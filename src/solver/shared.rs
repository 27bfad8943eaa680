//! State shared by every search task of one solve
//!
//! One `SharedSearchState` is created per `solve` call and never
//! outlives it, so concurrent solves cannot interfere. It arbitrates
//! node ownership (the visited set), carries the goal and cancel
//! signals, records predecessors for path reconstruction, and accounts
//! for live tasks so forking can degrade to serial exploration under
//! pressure.

use crate::maze::{NodeId, TaskId};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters collected across all tasks of one solve
#[derive(Debug, Default)]
pub struct SolveStats {
    /// Nodes claimed (successful ownership insertions)
    pub nodes_claimed: AtomicU64,

    /// Search tasks created (root included)
    pub tasks_spawned: AtomicU64,

    /// Fork points (two or more newly owned neighbors, forked)
    pub forks: AtomicU64,

    /// Dead ends (nodes with zero newly owned neighbors)
    pub dead_ends: AtomicU64,

    /// Fork points downgraded to serial exploration by the task limit
    pub serial_fallbacks: AtomicU64,
}

impl SolveStats {
    fn record_claim(&self) {
        self.nodes_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_task(&self) {
        self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fork(&self) {
        self.forks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dead_end(&self) {
        self.dead_ends.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_serial_fallback(&self) {
        self.serial_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            nodes_claimed: self.nodes_claimed.load(Ordering::Relaxed),
            tasks_spawned: self.tasks_spawned.load(Ordering::Relaxed),
            forks: self.forks.load(Ordering::Relaxed),
            dead_ends: self.dead_ends.load(Ordering::Relaxed),
            serial_fallbacks: self.serial_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Plain-value snapshot of [`SolveStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub nodes_claimed: u64,
    pub tasks_spawned: u64,
    pub forks: u64,
    pub dead_ends: u64,
    pub serial_fallbacks: u64,
}

/// Shared state for one top-level search
pub struct SharedSearchState {
    /// Visited set. Insertion here is the single arbitration point for
    /// node ownership; membership only grows during a search.
    visited: DashSet<NodeId>,

    /// Predecessor map for path reconstruction. Each key is written
    /// exactly once, by the task that won the claim for that node.
    predecessors: DashMap<NodeId, NodeId>,

    /// Sticky goal signal; purely a short-circuit hint, never a
    /// correctness gate.
    goal_found: AtomicBool,

    /// Cooperative cancellation, settable from outside (signal handler)
    cancelled: Arc<AtomicBool>,

    /// Live task accounting for the fork-limit fallback
    live_tasks: AtomicUsize,
    max_tasks: usize,

    /// Task id allocator for the visit side channel
    next_task: AtomicU64,

    stats: SolveStats,
}

impl SharedSearchState {
    /// Create fresh shared state for one solve
    pub fn new(max_tasks: usize, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            visited: DashSet::new(),
            predecessors: DashMap::new(),
            goal_found: AtomicBool::new(false),
            cancelled,
            live_tasks: AtomicUsize::new(0),
            max_tasks,
            next_task: AtomicU64::new(0),
            stats: SolveStats::default(),
        }
    }

    /// Atomically claim ownership of `node`.
    ///
    /// Returns true iff this call performed the insertion, i.e. the
    /// caller is the exclusive first claimant and may explore the node.
    /// This is the only legitimate basis for a forking decision; a
    /// separate contains-then-insert sequence would race.
    pub fn claim(&self, node: NodeId) -> bool {
        let claimed = self.visited.insert(node);
        if claimed {
            self.stats.record_claim();
        }
        claimed
    }

    /// Non-authoritative membership read, for diagnostics only
    pub fn is_claimed(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Number of nodes claimed so far
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Record that `node` was reached from `predecessor`.
    ///
    /// Called exactly once per node, immediately after a winning
    /// [`claim`](Self::claim) and before the node reaches any frontier
    /// or child task.
    pub fn record_predecessor(&self, node: NodeId, predecessor: NodeId) {
        let previous = self.predecessors.insert(node, predecessor);
        debug_assert!(
            previous.is_none(),
            "predecessor for {node} written twice (claim arbitration violated)"
        );
    }

    /// Look up the recorded predecessor of `node`
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(&node).map(|entry| *entry.value())
    }

    /// Number of predecessor entries; bounds any valid chain walk
    pub fn predecessor_count(&self) -> usize {
        self.predecessors.len()
    }

    /// Announce that some task reached a goal
    pub fn signal_goal(&self) {
        self.goal_found.store(true, Ordering::Relaxed);
    }

    /// Whether any task has reached a goal
    pub fn goal_signalled(&self) -> bool {
        self.goal_found.load(Ordering::Relaxed)
    }

    /// Whether the solve was cancelled from outside
    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Whether tasks should stop exploring (goal found or cancelled).
    /// A best-effort hint: tasks that miss it do redundant work, not
    /// wrong work.
    pub fn should_stop(&self) -> bool {
        self.goal_signalled() || self.cancelled()
    }

    /// Try to reserve room for `count` additional live tasks.
    ///
    /// Returns false when the reservation would exceed the task limit,
    /// in which case the caller continues serially instead of forking.
    pub fn try_reserve_tasks(&self, count: usize) -> bool {
        self.live_tasks
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |live| {
                if live + count > self.max_tasks {
                    None
                } else {
                    Some(live + count)
                }
            })
            .is_ok()
    }

    /// Release a previous reservation once the tasks have been joined
    pub fn release_tasks(&self, count: usize) {
        self.live_tasks.fetch_sub(count, Ordering::Relaxed);
    }

    /// Allocate the next task id
    pub fn next_task_id(&self) -> TaskId {
        TaskId(self.next_task.fetch_add(1, Ordering::Relaxed))
    }

    /// Counters for this solve
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(max_tasks: usize) -> SharedSearchState {
        SharedSearchState::new(max_tasks, Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_claim_is_exclusive() {
        let shared = fresh(16);
        assert!(shared.claim(NodeId(1)));
        assert!(!shared.claim(NodeId(1)));
        assert!(shared.is_claimed(NodeId(1)));
        assert!(!shared.is_claimed(NodeId(2)));
        assert_eq!(shared.stats().snapshot().nodes_claimed, 1);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner_per_node() {
        let shared = fresh(16);
        let nodes = 100u32;
        let threads = 8;

        std::thread::scope(|scope| {
            let mut handles = Vec::new();
            for _ in 0..threads {
                handles.push(scope.spawn(|| {
                    let mut won = 0u64;
                    for n in 0..nodes {
                        if shared.claim(NodeId(n)) {
                            won += 1;
                        }
                    }
                    won
                }));
            }
            let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
            assert_eq!(total, nodes as u64);
        });

        assert_eq!(shared.visited_len(), nodes as usize);
        assert_eq!(shared.stats().snapshot().nodes_claimed, nodes as u64);
    }

    #[test]
    fn test_goal_signal_is_sticky() {
        let shared = fresh(16);
        assert!(!shared.goal_signalled());
        shared.signal_goal();
        shared.signal_goal();
        assert!(shared.goal_signalled());
        assert!(shared.should_stop());
    }

    #[test]
    fn test_cancel_flag_observed() {
        let cancel = Arc::new(AtomicBool::new(false));
        let shared = SharedSearchState::new(16, Arc::clone(&cancel));
        assert!(!shared.should_stop());
        cancel.store(true, Ordering::Relaxed);
        assert!(shared.cancelled());
        assert!(shared.should_stop());
    }

    #[test]
    fn test_task_reservation_respects_limit() {
        let shared = fresh(4);
        assert!(shared.try_reserve_tasks(3));
        assert!(!shared.try_reserve_tasks(2));
        assert!(shared.try_reserve_tasks(1));
        shared.release_tasks(4);
        assert!(shared.try_reserve_tasks(4));
    }

    #[test]
    fn test_predecessor_round_trip() {
        let shared = fresh(16);
        shared.record_predecessor(NodeId(2), NodeId(1));
        assert_eq!(shared.predecessor(NodeId(2)), Some(NodeId(1)));
        assert_eq!(shared.predecessor(NodeId(1)), None);
        assert_eq!(shared.predecessor_count(), 1);
    }

    #[test]
    fn test_task_ids_are_sequential() {
        let shared = fresh(16);
        assert_eq!(shared.next_task_id(), TaskId(0));
        assert_eq!(shared.next_task_id(), TaskId(1));
    }
}
