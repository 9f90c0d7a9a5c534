/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::prelude::*;
use maze_solver::prelude::*;
use maze_solver::threads;
use rand::{rngs::StdRng, Rng, SeedableRng};
use webgraph::prelude::VecGraph;

const NUM_SAMPLES: usize = 20;
const SIDES: [usize; 3] = [100, 300, 1000];
const NUM_THREADS: [usize; 3] = [1, 4, 8];

/// A square grid maze in which each passage is kept with probability 0.7.
fn grid(side: usize, rng: &mut StdRng) -> VecGraph {
    let mut arcs = vec![];
    for y in 0..side {
        for x in 0..side {
            let node = y * side + x;
            if x + 1 < side && rng.random_bool(0.7) {
                arcs.extend([(node, node + 1), (node + 1, node)]);
            }
            if y + 1 < side && rng.random_bool(0.7) {
                arcs.extend([(node, node + side), (node + side, node)]);
            }
        }
    }
    // Make sure the goal cell exists
    let last = side * side - 1;
    arcs.extend([(last - 1, last), (last, last - 1)]);
    arcs.sort();
    arcs.dedup();
    VecGraph::from_arcs(arcs)
}

fn bench_fork_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fork/join maze search");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(NUM_SAMPLES);
    let mut rng = StdRng::seed_from_u64(0);

    for side in SIDES {
        let graph = grid(side, &mut rng);
        let goal = side * side - 1;
        group.throughput(Throughput::Elements((side * side) as u64));

        for num_threads in NUM_THREADS {
            let threads = threads![num_threads];
            group.bench_with_input(
                BenchmarkId::new(format!("{}x{}", side, side), num_threads),
                &num_threads,
                |b, _| {
                    b.iter(|| {
                        let maze = GraphMaze::new(&graph, 0, |node| node == goal);
                        ForkJoin::new(&maze).solve(&threads, no_logging![])
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_fork_join);
criterion_main!(benches);
