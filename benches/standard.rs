use criterion::{criterion_group, criterion_main, Criterion};

use polyrepair::tests::util::polygon;
use polyrepair::{repair_odd_even, repair_point_set, RepairOptions};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("star_501", |b| {
        b.iter(|| {
            let geometry = polygon::large_star(501);
            repair_odd_even(&geometry, &RepairOptions::default()).expect("Repair failed")
        })
    });

    c.bench_function("overlapping_squares_point_set", |b| {
        b.iter(|| {
            let geometry = polygon::overlapping_squares();
            repair_point_set(&geometry, &RepairOptions::default()).expect("Repair failed")
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
