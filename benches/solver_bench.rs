//! Benchmarks for maze-racer
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze_racer::config::SolveConfig;
use maze_racer::maze::{GraphMaze, NodeId};
use maze_racer::solver::Solver;

/// A long single corridor: worst case for forking (there is none),
/// baseline for per-node overhead.
fn corridor_maze(len: u32) -> GraphMaze {
    let mut maze = GraphMaze::new(len as usize);
    for n in 0..len - 1 {
        maze.add_edge(NodeId(n), NodeId(n + 1)).unwrap();
    }
    maze.add_goal(NodeId(len - 1)).unwrap();
    maze
}

/// A complete binary tree with the goal at the last leaf: every
/// internal node forks.
fn tree_maze(depth: u32) -> GraphMaze {
    let node_count = (1usize << (depth + 1)) - 1;
    let mut maze = GraphMaze::new(node_count);
    for parent in 0..((node_count - 1) / 2) as u32 {
        maze.add_edge(NodeId(parent), NodeId(2 * parent + 1)).unwrap();
        maze.add_edge(NodeId(parent), NodeId(2 * parent + 2)).unwrap();
    }
    maze.add_goal(NodeId(node_count as u32 - 1)).unwrap();
    maze
}

fn benchmark_corridor(c: &mut Criterion) {
    let maze = corridor_maze(10_000);
    let solver = Solver::new(SolveConfig::default()).unwrap();

    c.bench_function("solve_corridor_10k", |b| {
        b.iter(|| {
            let report = solver.solve(black_box(&maze), NodeId(0)).unwrap();
            black_box(report.path.unwrap());
        })
    });
}

fn benchmark_tree(c: &mut Criterion) {
    let maze = tree_maze(12);
    let solver = Solver::new(SolveConfig::default()).unwrap();

    c.bench_function("solve_binary_tree_depth12", |b| {
        b.iter(|| {
            let report = solver.solve(black_box(&maze), NodeId(0)).unwrap();
            black_box(report.path.unwrap());
        })
    });
}

fn benchmark_tree_serial_fallback(c: &mut Criterion) {
    let maze = tree_maze(12);
    let solver = Solver::new(SolveConfig {
        workers: 1,
        max_tasks: 1,
    })
    .unwrap();

    c.bench_function("solve_binary_tree_depth12_serial", |b| {
        b.iter(|| {
            let report = solver.solve(black_box(&maze), NodeId(0)).unwrap();
            black_box(report.path.unwrap());
        })
    });
}

criterion_group!(
    benches,
    benchmark_corridor,
    benchmark_tree,
    benchmark_tree_serial_fallback
);
criterion_main!(benches);
