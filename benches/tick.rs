//! Tick-loop benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use skirmish_sim::{SimConfig, SimWorld};

fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("tick_40_units", |b| {
        b.iter_batched(
            || SimWorld::with_config(SimConfig { unit_count: 40, seed: 1 }),
            |mut sim| {
                sim.tick();
                black_box(sim.current_tick())
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("run_100_ticks_40_units", |b| {
        b.iter_batched(
            || SimWorld::with_config(SimConfig { unit_count: 40, seed: 1 }),
            |mut sim| {
                sim.run_ticks(100);
                black_box(sim.is_game_over())
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("pathfind_corner_to_corner", |b| {
        use skirmish_sim::{find_path, GridCell, GridMap};
        let map = GridMap::with_center_wall();
        b.iter(|| {
            black_box(find_path(
                &map,
                black_box(GridCell::new(2, 2)),
                black_box(GridCell::new(27, 27)),
            ))
        })
    });
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
