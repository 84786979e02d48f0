//! Criterion benchmarks for the encoding passes.
//!
//! Uses seeded random instances so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_jsp_csp::encoding::{capacity_pairs, TimeWindows, VariableSpace};
use u_jsp_csp::instances::random_instance;
use u_jsp_csp::{EncoderConfig, Encoding};

fn bench_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacity_pairs");

    for &(jobs, machines) in &[(5, 5), (10, 5), (10, 10)] {
        let shop = random_instance(&mut StdRng::seed_from_u64(11), jobs, machines, 5);
        let horizon = 2 * shop.jobs.iter().filter_map(|j| j.total_duration()).max().unwrap_or(1);
        let windows = TimeWindows::compute(&shop, horizon, true).expect("feasible horizon");
        let space = VariableSpace::build(&shop, windows).expect("consistent machines");
        let label = format!("{jobs}x{machines}");

        group.bench_with_input(BenchmarkId::new("sequential", &label), &space, |b, s| {
            b.iter(|| capacity_pairs(black_box(s), false))
        });
        group.bench_with_input(BenchmarkId::new("parallel", &label), &space, |b, s| {
            b.iter(|| capacity_pairs(black_box(s), true))
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let shop = random_instance(&mut StdRng::seed_from_u64(5), 6, 6, 4);
    let config = EncoderConfig::default().with_parallel(true);

    c.bench_function("encode_6x6", |b| {
        b.iter(|| Encoding::new(black_box(&shop), config.clone()))
    });
}

criterion_group!(benches, bench_capacity, bench_encode);
criterion_main!(benches);
