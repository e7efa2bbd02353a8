use criterion::{criterion_group, criterion_main, Criterion};
use maze_carver::{
    blocks::BlockMap,
    cells::CellCoordinate,
    generators,
    grids::{large_rect_grid, medium_rect_grid, small_rect_grid},
    units::{ColumnsCount, RowsCount},
};

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("maze_11_u8", |b| {
        b.iter(|| small_rect_grid(RowsCount(11), ColumnsCount(11)).unwrap())
    });
    c.bench_function("maze_128_u16", |b| {
        b.iter(|| medium_rect_grid(RowsCount(128), ColumnsCount(128)).unwrap())
    });
    c.bench_function("maze_500_u32", |b| {
        b.iter(|| large_rect_grid(RowsCount(500), ColumnsCount(500)).unwrap())
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let g = large_rect_grid(RowsCount(11), ColumnsCount(11)).unwrap();
    let corner = CellCoordinate::new(0, 0);
    let mid = CellCoordinate::new(5, 5);
    c.bench_function("neighbours_corner_of_grid", |b| b.iter(|| g.neighbours(corner)));
    c.bench_function("neighbours_middle_of_grid", |b| b.iter(|| g.neighbours(mid)));
}

fn bench_inspection(c: &mut Criterion) {
    let g = generators::carve_maze::<u32>(RowsCount(128), ColumnsCount(128), Some(7), None)
        .unwrap();
    c.bench_function("open_cells_128", |b| b.iter(|| g.open_cells()));
    c.bench_function("block_map_128", |b| b.iter(|| BlockMap::from_grid(&g)));
    c.bench_function("text_render_128", |b| b.iter(|| g.to_string()));
}

criterion_group!(benches, bench_grid_construction, bench_neighbours, bench_inspection);
criterion_main!(benches);
