//! Example that solves a puzzle with the technique solver.
//!
//! This example shows how to:
//! - Parse a puzzle from its 81-cell string form
//! - Run a `TechniqueSolver` restricted to a technique tier
//! - Inspect per-technique stats after a solve
//! - Trace every deduction step with `find_step` and `apply_step`
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_grid -- "$(cat puzzle.txt)"
//! ```
//!
//! Restrict the solver to a technique tier (basic, intermediate, or advanced):
//!
//! ```sh
//! cargo run --example solve_grid -- --tier basic "...456789...789123...123456214365897365897214897214365531642978678931542942578631"
//! ```
//!
//! Print every deduction step:
//!
//! ```sh
//! cargo run --example solve_grid -- --trace "<PUZZLE>"
//! ```

use std::process;
use std::str::FromStr as _;

use clap::{Parser, ValueEnum};
use ninefold_core::DigitGrid;
use ninefold_solver::{
    TechniqueGrid, TechniqueSolver, TechniqueStep,
    technique::{self, TechniqueKind, TechniqueTier},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Basic,
    Intermediate,
    Advanced,
}

impl From<TierArg> for TechniqueTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Basic => TechniqueTier::Basic,
            TierArg::Intermediate => TechniqueTier::Intermediate,
            TierArg::Advanced => TechniqueTier::Advanced,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle as 81 cells, row by row. `.`, `_`, or `0` mark empty cells;
    /// whitespace is ignored.
    #[arg(value_name = "PUZZLE")]
    puzzle: String,

    /// Highest technique tier the solver may use.
    #[arg(long, value_name = "TIER", default_value = "advanced")]
    tier: TierArg,

    /// Print every deduction step.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();
    let puzzle = match DigitGrid::from_str(&args.puzzle) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("Invalid puzzle: {err}");
            process::exit(2);
        }
    };

    let solver = TechniqueSolver::new(technique::techniques_up_to(args.tier.into()));
    let mut grid = TechniqueGrid::from_puzzle(&puzzle);

    println!("Puzzle:");
    print_grid(&puzzle);
    println!();

    let solved = if args.trace {
        solve_traced(&solver, &mut grid)
    } else {
        solve_summarized(&solver, &mut grid)
    };

    println!();
    if solved {
        println!("Solved:");
    } else {
        println!("Stuck:");
    }
    print_grid(&grid.to_digit_grid());

    if !solved {
        process::exit(1);
    }
}

fn solve_summarized(solver: &TechniqueSolver, grid: &mut TechniqueGrid) -> bool {
    let (solved, stats) = solver.solve(grid).unwrap();

    println!("Stats:");
    for kind in TechniqueKind::ALL {
        let count = stats.count(kind);
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }
    println!("  total: {}", stats.total_steps());

    solved
}

fn solve_traced(solver: &TechniqueSolver, grid: &mut TechniqueGrid) -> bool {
    println!("Steps:");
    let mut step_number = 0;
    while let Some(step) = solver.find_step(grid).unwrap() {
        step_number += 1;
        println!("{:>4}. {}", step_number, describe_step(step.as_ref()));
        let changed = grid.apply_step(step.as_ref());
        assert!(changed, "a found step must change the grid");
        if grid.is_solved().unwrap() {
            break;
        }
    }
    if step_number == 0 {
        println!("  (no deduction steps needed)");
    }
    grid.is_solved().unwrap()
}

fn describe_step(step: &dyn TechniqueStep) -> String {
    use ninefold_solver::TechniqueApplication;

    let mut parts = Vec::new();
    for application in step.application() {
        match application {
            TechniqueApplication::Placement { position, digit } => {
                parts.push(format!("place {digit} at {position}"));
            }
            TechniqueApplication::CandidateElimination { positions, digits } => {
                let digits = digits
                    .iter()
                    .map(|digit| digit.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let positions = positions
                    .iter()
                    .map(|pos| pos.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                parts.push(format!("remove {{{digits}}} from {positions}"));
            }
        }
    }
    format!("{}: {}", step.technique_name(), parts.join("; "))
}

fn print_grid(grid: &DigitGrid) {
    for line in grid.to_string().lines() {
        println!("  {line}");
    }
}
