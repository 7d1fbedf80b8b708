use conteggio::config::HarnessConfig;
use conteggio::counters::atomic::AtomicCounter;
use conteggio::counters::sharded::ShardedCounter;
use conteggio::harness::Harness;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_WORKERS: usize = 8;
const INCREMENTS_PER_WORKER: u64 = 1_000_000;

fn bench_harness(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness_count");
    let harness = Harness::new(HarnessConfig::new(NUM_WORKERS, INCREMENTS_PER_WORKER));
    let label = format!("{}workers x {}iter", NUM_WORKERS, INCREMENTS_PER_WORKER);

    group.bench_function(BenchmarkId::new("AtomicCounter", &label), |b| {
        b.iter(|| {
            let counter = AtomicCounter::new();
            black_box(harness.count(&counter).unwrap().verify().unwrap())
        })
    });

    group.bench_function(BenchmarkId::new("ShardedCounter", &label), |b| {
        b.iter(|| {
            let counter = ShardedCounter::new();
            black_box(harness.count(&counter).unwrap().verify().unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_harness);
criterion_main!(benches);
