//! Error types for maze-racer
//!
//! This module defines the error hierarchy covering:
//! - Maze map parsing errors
//! - Configuration and CLI errors
//! - Solver defects (predecessor-map inconsistencies)
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - A missing path is *not* an error: `solve` reports it as an absent
//!   result. Errors are reserved for defects and bad input.
//! - Losing a claim race is normal control flow, never an error.

use crate::maze::NodeId;
use thiserror::Error;

/// Top-level error type for the maze-racer library
#[derive(Error, Debug)]
pub enum SolverError {
    /// Maze parsing/construction errors
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors (maze file loading, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Thread pool construction failed
    #[error("Failed to build solver thread pool: {0}")]
    PoolInit(String),

    /// A predecessor-chain walk ran longer than the predecessor map can
    /// possibly support. This is a defect signal, not a recoverable
    /// condition: the search aborts rather than return a wrong path.
    #[error(
        "Predecessor chain through node {node} exceeded {steps} steps \
         without reaching the search start"
    )]
    InconsistentPredecessors { node: NodeId, steps: usize },

    /// A claimed node has no predecessor entry during reconstruction.
    /// Same defect class as `InconsistentPredecessors`: every non-start
    /// node must have its predecessor recorded before it is handed to
    /// any frontier.
    #[error("No predecessor recorded for claimed node {node}")]
    MissingPredecessor { node: NodeId },

    /// Search cancelled by signal before completion
    #[error("Search interrupted before completion")]
    Interrupted,
}

/// Maze map parsing and construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Map text contained no open cells
    #[error("Maze map is empty")]
    EmptyMap,

    /// Unrecognized character in the map text
    #[error("Unknown tile '{tile}' at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, tile: char },

    /// Map has no start marker
    #[error("Maze map has no start cell ('S')")]
    MissingStart,

    /// Map has more than one start marker
    #[error("Maze map has multiple start cells (rows {first} and {second})")]
    MultipleStarts { first: usize, second: usize },

    /// Edge endpoint outside the declared node range
    #[error("Edge endpoint {node} out of range for {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },
}

/// Configuration and CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Task limit lower than the worker count would idle workers
    #[error("Invalid task limit {limit}: must be at least the worker count ({workers})")]
    InvalidTaskLimit { limit: usize, workers: usize },
}

/// Result type alias for SolverError
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let maze_err = MazeError::MissingStart;
        let solver_err: SolverError = maze_err.into();
        assert!(matches!(solver_err, SolverError::Maze(_)));

        let cfg_err = ConfigError::InvalidWorkerCount { count: 0, max: 512 };
        let solver_err: SolverError = cfg_err.into();
        assert!(matches!(solver_err, SolverError::Config(_)));
    }

    #[test]
    fn test_inconsistency_message_names_node() {
        let err = SolverError::InconsistentPredecessors {
            node: NodeId(7),
            steps: 42,
        };
        assert!(err.to_string().contains('7'));
    }
}
