use block_planner::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn config(entries: &[(&str, [f64; 3])]) -> ProblemConfig {
    entries.iter().map(|(name, pos)| (name.to_string(), EntityConfig { position: *pos })).collect()
}

fn pick_and_place_domain() -> Domain {
    let init = config(&[("robot1", [0.0, 0.0, 0.0]), ("block1", [1.0, 0.0, 0.0])]);
    let goal = config(&[("block1", [2.0, 0.0, 0.0])]);
    Domain::from_configs(&init, &goal).unwrap()
}

fn unstack_domain() -> Domain {
    let init =
        config(&[("robot1", [5.0, 5.0, 0.0]), ("block1", [0.0, 0.0, 0.0]), ("block2", [0.0, 0.0, 1.0])]);
    let goal = config(&[("block1", [0.0, 0.0, 0.0]), ("block2", [3.0, 0.0, 0.0])]);
    Domain::from_configs(&init, &goal).unwrap()
}

fn bench_pick_and_place(c: &mut Criterion) {
    let domain = pick_and_place_domain();

    c.bench_function("plan_pick_and_place", |b| {
        b.iter(|| {
            let plan = AcyclicPlanner::new(black_box(&domain)).run();
            black_box(plan);
        })
    });
}

fn bench_unstack(c: &mut Criterion) {
    let domain = unstack_domain();

    c.bench_function("plan_unstack_covered_block", |b| {
        b.iter(|| {
            let plan = AcyclicPlanner::new(black_box(&domain)).run();
            black_box(plan);
        })
    });
}

fn bench_dtg_construction(c: &mut Criterion) {
    let domain = unstack_domain();

    c.bench_function("build_dtg", |b| {
        b.iter(|| {
            let dtg = build_dtg(black_box(&domain));
            black_box(dtg);
        })
    });
}

criterion_group!(benches, bench_pick_and_place, bench_unstack, bench_dtg_construction);
criterion_main!(benches);
