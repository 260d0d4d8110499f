//! Benchmarks for the genetic operators and a short evolution run.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use std::hint::black_box;

use blackjack_evolve::game::{Simulator, TestConditions};
use blackjack_evolve::gp::{
    CrossoverConfig, EngineParameters, SelectionConfig, Strategy, crossover, evaluate_population,
    evolve, mutate, prepare_for_selection, select_parent, simulator_fitness,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn population(size: usize, seed: u64) -> Vec<Strategy> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            let mut s = Strategy::random(&mut rng);
            s.fitness = -(i as f64);
            s
        })
        .collect()
}

fn bench_operators(c: &mut Criterion) {
    let parents = population(2, 1);
    let config = CrossoverConfig::default();

    c.bench_function("crossover", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| black_box(crossover(&parents[0], &parents[1], &config, &mut rng)));
    });

    c.bench_function("mutate_impact_0.1", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut child = parents[0];
        b.iter(|| {
            mutate(&mut child, black_box(0.1), &mut rng);
            black_box(child.fitness)
        });
    });
}

fn bench_selection(c: &mut Criterion) {
    let config = SelectionConfig::default();
    let mut pop = population(150, 2);
    let total = prepare_for_selection(&mut pop, &config);

    c.bench_function("tournament_select_150", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| black_box(select_parent(&pop, &config, total, &mut rng)));
    });
}

fn bench_evaluate_generation(c: &mut Criterion) {
    let simulator = Simulator::new(TestConditions {
        hands_per_evaluation: 1_000,
        ..Default::default()
    })
    .unwrap();
    let fitness = simulator_fitness(simulator);
    let mut pop = population(64, 3);

    c.bench_function("evaluate_64_x_1000_hands", |b| {
        b.iter(|| {
            evaluate_population(&mut pop, &fitness, black_box(42));
            black_box(pop[0].fitness)
        });
    });
}

fn bench_short_run(c: &mut Criterion) {
    let simulator = Simulator::new(TestConditions {
        hands_per_evaluation: 500,
        ..Default::default()
    })
    .unwrap();
    let fitness = simulator_fitness(simulator);
    let params = EngineParameters {
        population_size: 32,
        min_generations: 5,
        max_generations: 5,
        ..Default::default()
    };

    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);
    group.bench_function("5_generations_pop_32", |b| {
        b.iter(|| black_box(evolve(&params, &fitness, |_, _| true).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_operators,
    bench_selection,
    bench_evaluate_generation,
    bench_short_run
);
criterion_main!(benches);
