//! Benchmarks for eventdb log operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use eventdb::{Event, EventLog};
use tempfile::TempDir;

fn populated_log(events: usize) -> (TempDir, EventLog) {
    let temp_dir = TempDir::new().unwrap();
    let log = EventLog::open(temp_dir.path().join("bench.log")).unwrap();
    for i in 0..events {
        log.append(
            &Event::new(format!("e{}", i), "bench", "accounts", "touch")
                .with_data(["ip=10.0.0.1", "ok"]),
        )
        .unwrap();
    }
    (temp_dir, log)
}

fn append_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let log = EventLog::open(temp_dir.path().join("bench.log")).unwrap();
    let event = Event::new("e1", "bench", "accounts", "touch").with_data(["ip=10.0.0.1", "ok"]);

    c.bench_function("append_flushed", |b| {
        b.iter(|| log.append(&event).unwrap())
    });
}

fn find_benchmarks(c: &mut Criterion) {
    let (_temp, log) = populated_log(1_000);

    c.bench_function("find_first_of_1k", |b| {
        b.iter(|| log.find("e0").unwrap().unwrap())
    });

    c.bench_function("find_last_of_1k", |b| {
        b.iter(|| log.find("e999").unwrap().unwrap())
    });
}

fn replay_benchmarks(c: &mut Criterion) {
    let (_temp, log) = populated_log(1_000);

    c.bench_function("revive_1k", |b| {
        b.iter_batched(
            || 0usize,
            |mut count| {
                log.revive(|_| {
                    count += 1;
                    Ok(())
                })
                .unwrap();
                count
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, append_benchmarks, find_benchmarks, replay_benchmarks);
criterion_main!(benches);
