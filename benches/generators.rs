use criterion::{criterion_group, criterion_main, Criterion};
use maze_carver::{
    generators,
    grids::{large_rect_grid, medium_rect_grid},
    units::{ColumnsCount, RowsCount},
};

fn bench_recursive_backtracker_maze_32_u16(c: &mut Criterion) {
    let mut g = medium_rect_grid(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = generators::seeded_rng(Some(32));
    c.bench_function("recursive_backtracker_maze_32_u16", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &mut rng, None))
    });
}

fn bench_recursive_backtracker_maze_128_u32(c: &mut Criterion) {
    let mut g = large_rect_grid(RowsCount(128), ColumnsCount(128)).unwrap();
    let mut rng = generators::seeded_rng(Some(128));
    c.bench_function("recursive_backtracker_maze_128_u32", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &mut rng, None))
    });
}

fn bench_carve_maze_32_fixed_seed(c: &mut Criterion) {
    c.bench_function("carve_maze_32_fixed_seed", |b| {
        b.iter(|| {
            generators::carve_maze::<u16>(RowsCount(32), ColumnsCount(32), Some(42), None)
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32_u16,
    bench_recursive_backtracker_maze_128_u32,
    bench_carve_maze_32_fixed_seed
);
criterion_main!(benches);
