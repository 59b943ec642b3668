//! End-to-end generation timings.
//!
//! Each run covers the full pipeline behind [`PuzzleGenerator`]: filling a
//! solution, digging while uniqueness holds, rating, and retrying until the
//! rating lands in the difficulty band. The seeds are fixed so every run digs
//! the same sequence of boards and timings stay comparable across changes.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use ninefold_generator::{Difficulty, PuzzleGenerator, PuzzleSeed};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "7f3a91c04be2d8650d97214fa3cc5eb8812f46da9e01b37c5a68ef2430d19b84",
    "02468ace13579bdf02468ace13579bdf02468ace13579bdf02468ace13579bdf",
];

fn bench_difficulty(c: &mut Criterion, name: &str, difficulty: Difficulty) {
    let generator = PuzzleGenerator::new();

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = PuzzleSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(difficulty, seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generate_easy(c: &mut Criterion) {
    bench_difficulty(c, "generate_easy", Difficulty::Easy);
}

fn bench_generate_medium(c: &mut Criterion) {
    bench_difficulty(c, "generate_medium", Difficulty::Medium);
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_generate_easy,
        bench_generate_medium
);
criterion_main!(benches);
