//! Configuration types for maze-racer
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime solver configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Default cap on concurrently live search tasks
const DEFAULT_MAX_TASKS: usize = 1024;

/// Parallel fork/join maze solver
#[derive(Parser, Debug, Clone)]
#[command(
    name = "maze-racer",
    version,
    about = "Parallel fork/join maze solver",
    long_about = "Searches an ASCII maze map for a path from the start cell ('S') to any \
                  goal cell ('G') using a forking depth-first search.\n\n\
                  The search forks a task per branch of the maze; tasks share a visited \
                  set so no cell is explored twice, and race to report the first goal.",
    after_help = "EXAMPLES:\n    \
        maze-racer maze.txt\n    \
        maze-racer maze.txt -w 8 -p\n    \
        maze-racer maze.txt --max-tasks 256 -q"
)]
pub struct CliArgs {
    /// Maze map file (ASCII grid: '#' wall, '.' open, 'S' start, 'G' goal)
    #[arg(value_name = "MAZE_FILE")]
    pub maze_file: PathBuf,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Cap on concurrently live search tasks; branches beyond the cap
    /// are explored serially instead of forking
    #[arg(long, default_value_t = DEFAULT_MAX_TASKS, value_name = "NUM")]
    pub max_tasks: usize,

    /// Show live progress while solving
    #[arg(short = 'p', long)]
    pub progress: bool,

    /// Quiet mode - print only the path length, no map rendering
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log every node visit at trace level (noisy; combines with -p)
    #[arg(long)]
    pub trace_visits: bool,

    /// Verbose output (debug-level logs)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration for the solver
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Worker threads in the solver pool
    pub workers: usize,

    /// Live-task cap before forking degrades to serial exploration
    pub max_tasks: usize,
}

impl SolveConfig {
    /// Build and validate a configuration from CLI arguments
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let config = Self {
            workers: args.workers,
            max_tasks: args.max_tasks,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the solver relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: self.workers,
                max: MAX_WORKERS,
            });
        }
        if self.max_tasks < self.workers {
            return Err(ConfigError::InvalidTaskLimit {
                limit: self.max_tasks,
                workers: self.workers,
            });
        }
        Ok(())
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }
}

/// Default worker count from available parallelism
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(MAX_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SolveConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = SolveConfig {
            workers: 0,
            max_tasks: 100,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorkerCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let config = SolveConfig {
            workers: MAX_WORKERS + 1,
            max_tasks: 10_000,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_task_limit_below_workers_rejected() {
        let config = SolveConfig {
            workers: 8,
            max_tasks: 4,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTaskLimit {
                limit: 4,
                workers: 8
            })
        ));
    }

    #[test]
    fn test_cli_defaults_parse() {
        let args = CliArgs::parse_from(["maze-racer", "maze.txt"]);
        assert_eq!(args.maze_file, PathBuf::from("maze.txt"));
        assert!(!args.progress);
        assert!(!args.trace_visits);
        let config = SolveConfig::from_args(&args).unwrap();
        assert_eq!(config.max_tasks, DEFAULT_MAX_TASKS);
    }

    #[test]
    fn test_trace_visits_flag_parses() {
        let args = CliArgs::parse_from(["maze-racer", "maze.txt", "--trace-visits"]);
        assert!(args.trace_visits);
    }
}
