use std::thread;

use conteggio::counters::atomic::AtomicCounter;
use conteggio::counters::racy::RacyCounter;
use conteggio::counters::sharded::ShardedCounter;
use conteggio::counters::Counter;
use conteggio::{run, Harness, HarnessConfig, HarnessError};

#[test]
fn exact_total_for_every_shape() {
    for workers in [1, 2, 3, 7, 16, 65] {
        for increments in [1, 2, 10, 333, 1000] {
            assert_eq!(
                run(workers, increments).unwrap(),
                workers as u64 * increments,
                "{workers} workers × {increments} increments"
            );
        }
    }
}

#[test]
fn reference_scenario() {
    assert_eq!(run(50, 1000).unwrap(), 50_000);
}

#[test]
fn single_worker_single_increment() {
    assert_eq!(run(1, 1).unwrap(), 1);
}

#[test]
fn zero_increments_spawns_nothing() {
    assert_eq!(run(10, 0).unwrap(), 0);
}

#[test]
fn reference_scenario_is_repeatable() {
    for _ in 0..100 {
        assert_eq!(run(50, 1000).unwrap(), 50_000);
    }
}

#[test]
fn load_before_any_worker_is_zero() {
    assert_eq!(AtomicCounter::new().load(), 0);
    assert_eq!(ShardedCounter::new().load(), 0);
    assert_eq!(RacyCounter::new().load(), 0);
}

#[test]
fn sharded_counter_is_exact() {
    let harness = Harness::new(HarnessConfig::new(50, 1000));
    for _ in 0..20 {
        let counter = ShardedCounter::new();
        assert_eq!(harness.count(&counter).unwrap().verify().unwrap(), 50_000);
    }
}

#[test]
fn sharded_counter_boundaries() {
    for (workers, increments, total) in [(1, 1, 1), (10, 0, 0), (0, 1000, 0)] {
        let counter = ShardedCounter::new();
        let tally = Harness::new(HarnessConfig::new(workers, increments))
            .count(&counter)
            .unwrap();
        assert_eq!(tally.verify().unwrap(), total, "{workers} × {increments}");
        assert_eq!(counter.load(), total);
    }
}

#[test]
fn lent_counter_is_counted_from_its_current_value() {
    let counter = AtomicCounter::new();
    let harness = Harness::new(HarnessConfig::new(2, 5));
    for _ in 0..3 {
        assert_eq!(harness.count(&counter).unwrap().verify().unwrap(), 10);
    }
    assert_eq!(counter.load(), 30);
}

#[test]
fn racy_counter_loses_updates() {
    let harness = Harness::new(HarnessConfig::new(8, 200_000));
    let mut lost_any = false;

    for _ in 0..20 {
        let counter = RacyCounter::new();
        let tally = harness.count(&counter).unwrap();
        assert!(tally.observed <= tally.expected);

        if !tally.is_exact() {
            assert!(matches!(
                tally.verify(),
                Err(HarnessError::CorrectnessViolation { expected: 1_600_000, .. })
            ));
            lost_any = true;
            break;
        }
    }

    // Without real parallelism the threads may never interleave mid-increment.
    let parallel = thread::available_parallelism().map_or(1, |n| n.get()) > 1;
    if parallel {
        assert!(lost_any, "racy counter never lost an update in 20 runs");
    }
}

#[test]
fn overflowing_configuration_is_rejected() {
    assert!(matches!(
        run(usize::MAX, u64::MAX),
        Err(HarnessError::Overflow { .. })
    ));
}
