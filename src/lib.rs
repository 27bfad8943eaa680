//! maze-racer - Parallel Fork/Join Maze Solver
//!
//! Finds a path from a start cell to any goal cell in a graph-structured
//! maze using a dynamically forking depth-first search. Search tasks
//! explore disjoint frontiers concurrently, share a visited set so no
//! cell is ever explored twice, and race to report the first goal found.
//!
//! # Features
//!
//! - **Forking search**: a task forks one child per branch of the maze
//!   and joins them all; single corridors stay inside one task.
//!
//! - **Atomic ownership**: a concurrent visited set arbitrates which
//!   task owns each cell with a single add-if-absent operation.
//!
//! - **Early termination**: the first goal found wins; a shared signal
//!   lets the losing branches stand down quickly, while every launched
//!   task is still joined so nothing leaks.
//!
//! - **Graceful degradation**: past a configurable live-task cap,
//!   branches are explored serially inside the current task instead of
//!   forking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Maze (read-only oracle)                 │
//! │          neighbors(node) ∙ is_goal(node) ∙ observe_visit     │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Solver (rayon pool)                       │
//! │   root SearchTask ──fork──► child tasks ──fork──► ...        │
//! │        │                        │                            │
//! │        └──── claim / record predecessor / goal signal ───────┤
//! │                               │                              │
//! │                 ┌─────────────▼─────────────┐                │
//! │                 │    SharedSearchState      │                │
//! │                 │  visited set ∙ goal flag  │                │
//! │                 │     predecessor map       │                │
//! │                 └───────────────────────────┘                │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!                  Path: [start, ..., goal] or NotFound
//! ```
//!
//! # Example
//!
//! ```
//! use maze_racer::maze::{GraphMaze, NodeId};
//!
//! // 0-1, 0-2, 1-3, 2-4 with the goal at 4
//! let maze = GraphMaze::from_edges(5, &[(0, 1), (0, 2), (1, 3), (2, 4)], &[4]).unwrap();
//! let path = maze_racer::solve(&maze, NodeId(0)).unwrap();
//! assert_eq!(path, Some(vec![NodeId(0), NodeId(2), NodeId(4)]));
//! ```

pub mod config;
pub mod error;
pub mod maze;
pub mod progress;
pub mod solver;

pub use config::{CliArgs, SolveConfig};
pub use error::{Result, SolverError};
pub use maze::{GraphMaze, GridMaze, Maze, NodeId, TaskId};
pub use solver::{solve, SolveReport, Solver, StatsSnapshot};
