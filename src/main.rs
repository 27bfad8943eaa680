//! maze-racer - Parallel Fork/Join Maze Solver
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use maze_racer::config::{CliArgs, SolveConfig};
use maze_racer::maze::{GridMaze, Maze, NodeId};
use maze_racer::progress::{
    print_header, print_summary, visit_channel, Observed, ProgressReporter, Traced,
};
use maze_racer::solver::{SolveReport, Solver};
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(found) => {
            if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a path was found
fn run() -> Result<bool> {
    let args = CliArgs::parse();

    setup_logging(args.verbose, args.trace_visits)?;

    let config = SolveConfig::from_args(&args).context("Invalid configuration")?;

    let maze = GridMaze::from_file(&args.maze_file)
        .with_context(|| format!("Failed to load maze '{}'", args.maze_file.display()))?;

    if maze.goal_count() == 0 {
        info!("Maze has no goal cells; the search can only report not-found");
    }

    if !args.quiet {
        print_header(
            &args.maze_file.display().to_string(),
            maze.node_count(),
            maze.goal_count(),
            config.workers,
        );
    }

    let solver = Solver::new(config.clone()).context("Failed to initialize solver")?;

    // Ctrl-C winds the search down cooperatively; in-flight tasks are
    // still joined before the solver returns.
    let cancel_flag = solver.cancel_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping search...");
        cancel_flag.store(true, Ordering::Relaxed);
    })
    .context("Failed to set signal handler")?;

    // Visit wrappers compose; both forward, so the trace log and the
    // progress display each see every visit.
    let start = maze.start();
    let report = if args.trace_visits {
        let traced = Traced::new(&maze);
        run_solve(&solver, &traced, start, args.progress)?
    } else {
        run_solve(&solver, &maze, start, args.progress)?
    };

    report_outcome(&args, &maze, &report);
    Ok(report.path.is_some())
}

/// Run one solve, optionally with the visit side channel wired to a
/// progress display
fn run_solve<M: Maze + ?Sized>(
    solver: &Solver,
    maze: &M,
    start: NodeId,
    progress: bool,
) -> Result<SolveReport> {
    if !progress {
        return solver.solve(maze, start).context("Solve failed");
    }

    let (events_tx, events_rx) = visit_channel(4096);
    let reporter = ProgressReporter::spawn(events_rx);

    let observed = Observed::new(maze, events_tx);
    let result = solver.solve(&observed, start);

    // Dropping the observed maze closes the channel and stops the reporter.
    drop(observed);
    reporter.finish();

    result.context("Solve failed")
}

fn report_outcome(args: &CliArgs, maze: &GridMaze, report: &SolveReport) {
    if let (Some(path), false) = (&report.path, args.quiet) {
        println!("{}", maze.render_path(path));
    }

    print_summary(
        report.path.as_ref().map(|p| p.len()),
        report.stats.nodes_claimed,
        report.stats.tasks_spawned,
        report.stats.forks,
        report.duration,
        args.quiet,
    );

    if report.stats.serial_fallbacks > 0 {
        info!(
            fallbacks = report.stats.serial_fallbacks,
            "task limit reached during solve; some branches explored serially"
        );
    }
}

fn setup_logging(verbose: bool, trace_visits: bool) -> Result<()> {
    let filter = if trace_visits {
        EnvFilter::new("maze_racer=trace,warn")
    } else if verbose {
        EnvFilter::new("maze_racer=debug,warn")
    } else {
        EnvFilter::new("maze_racer=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
