//! Maze abstractions for the solver
//!
//! The solver only needs a read-only graph oracle: which nodes border a
//! node, and whether a node is a goal. Two concrete mazes are provided:
//!
//! - [`GraphMaze`]: an adjacency-list maze built from an edge list, the
//!   form used by tests and library consumers.
//! - [`GridMaze`]: a rectangular maze parsed from an ASCII map, used by
//!   the CLI. Supports rendering a solved path back onto the map.

pub mod graph;
pub mod grid;

pub use graph::GraphMaze;
pub use grid::GridMaze;

use std::fmt;

/// Opaque integer key uniquely identifying a maze cell.
///
/// Identifiers are stable for the lifetime of a search; no two cells
/// share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index form for slice/vec addressing
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}

/// Identifies one search task within a single solve, for the visit
/// side channel. Allocated sequentially starting at 0 (the root task).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only graph oracle consumed by the solver.
///
/// Implementations must be safe to query from many threads at once;
/// the solver shares one maze reference across all of its tasks.
pub trait Maze: Sync {
    /// Neighbors of `node`, in a stable order.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether `node` is a goal cell.
    fn is_goal(&self, node: NodeId) -> bool;

    /// Total number of cells in the maze (diagnostics only; the solver
    /// never assumes all of them are reachable).
    fn node_count(&self) -> usize;

    /// Visualization side channel: called once per node a task visits.
    /// The default is a no-op; implementations must never block the
    /// calling task.
    fn observe_visit(&self, _task: TaskId, _node: NodeId) {}
}
