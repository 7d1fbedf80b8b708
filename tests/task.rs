#![cfg(feature = "tokio")]

use std::sync::Arc;

use conteggio::counters::sharded::ShardedCounter;
use conteggio::{Harness, HarnessConfig};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn tokio_reference_scenario() {
    let harness = Harness::new(HarnessConfig::new(50, 1000));
    for _ in 0..10 {
        assert_eq!(harness.run_async().await.unwrap(), 50_000);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn tokio_single_and_empty() {
    assert_eq!(
        Harness::new(HarnessConfig::new(1, 1)).run_async().await.unwrap(),
        1
    );
    assert_eq!(
        Harness::new(HarnessConfig::new(10, 0)).run_async().await.unwrap(),
        0
    );
    assert_eq!(
        Harness::new(HarnessConfig::new(0, 10)).run_async().await.unwrap(),
        0
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn tokio_sharded_counter() {
    let counter = Arc::new(ShardedCounter::new());
    let tally = Harness::new(HarnessConfig::new(32, 2000))
        .count_async(counter)
        .await
        .unwrap();
    assert_eq!(tally.verify().unwrap(), 64_000);
}
