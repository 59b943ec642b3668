//! Benchmarks for full solver runs and solution counting.
//!
//! This benchmark suite measures complete [`TechniqueSolver`] runs on
//! representative puzzle states, the cost of a full catalogue scan that finds
//! nothing, and the backtracking solution counter used for uniqueness checks.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;
use std::str::FromStr as _;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ninefold_core::DigitGrid;
use ninefold_solver::{TechniqueGrid, TechniqueSolver, backtrack};

/// A puzzle whose empty box is fully forced by its row and column givens.
const FORCED_PUZZLE: &str = "
    ...456789
    ...789123
    ...123456
    214365897
    365897214
    897214365
    531642978
    678931542
    942578631
";

fn forced_puzzle() -> DigitGrid {
    DigitGrid::from_str(FORCED_PUZZLE).unwrap()
}

fn bench_solve(c: &mut Criterion) {
    let puzzles = [
        ("forced", TechniqueGrid::from_puzzle(&forced_puzzle())),
        ("empty", TechniqueGrid::new()),
    ];

    let solver = TechniqueSolver::with_all_techniques();

    for (param, grid) in puzzles {
        c.bench_with_input(BenchmarkId::new("solve", param), &grid, |b, grid| {
            b.iter_batched_ref(
                || hint::black_box(grid.clone()),
                |grid| {
                    let result = solver.solve(grid).unwrap();
                    hint::black_box(result)
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_find_step(c: &mut Criterion) {
    let grid = TechniqueGrid::new();
    let solver = TechniqueSolver::with_all_techniques();

    // A fresh grid has no applicable step, so this measures the cost of one
    // full catalogue scan.
    c.bench_function("find_step_full_scan", |b| {
        b.iter(|| {
            let step = solver.find_step(hint::black_box(&grid)).unwrap();
            hint::black_box(step.is_none())
        });
    });
}

fn bench_count_solutions(c: &mut Criterion) {
    let puzzles = [("forced", forced_puzzle()), ("empty", DigitGrid::new())];

    for (param, puzzle) in puzzles {
        c.bench_with_input(
            BenchmarkId::new("count_solutions", param),
            &puzzle,
            |b, puzzle| {
                b.iter(|| {
                    let count = backtrack::count_solutions(hint::black_box(puzzle), 2);
                    hint::black_box(count)
                });
            },
        );
    }
}

criterion_group!(benches, bench_solve, bench_find_step, bench_count_solutions);
criterion_main!(benches);
