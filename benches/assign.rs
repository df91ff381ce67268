// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use charhop::engine::{assign, resolve, Outcome};
use charhop::model::Occurrence;

mod profiler;

fn occurrences(n: usize) -> Vec<Occurrence> {
    (0..n).map(|i| Occurrence::new(i * 7 + 3)).collect()
}

// Benchmark identity (keep stable):
// - Group names in this file: `assign.partition`, `assign.narrow`
fn benches_assign(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("assign.partition");

        for (case_id, n) in [("singles", 40usize), ("grouped", 100), ("deep", 5_000)] {
            let occs = occurrences(n);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let assignment = assign(black_box(&occs), 0).expect("non-empty");
                    black_box(assignment.entries().len())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("assign.narrow");

        // Narrow the first group all the way to a jump.
        for (case_id, n) in [("grouped", 100usize), ("deep", 5_000)] {
            let occs = occurrences(n);
            let assignment = assign(&occs, 0).expect("non-empty");
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let mut current = assignment.clone();
                    loop {
                        match resolve(black_box(&current), 'a') {
                            Outcome::Jump(occurrence) => break black_box(occurrence.offset()),
                            Outcome::Narrow(narrowed) => current = narrowed,
                            Outcome::NotFound => unreachable!("label 'a' always exists"),
                        }
                    }
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_assign
}
criterion_main!(benches);
