use bit_set::BitSet;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, trace};

use crate::cells::{CellCoordinate, CoordinateSmallVec};
use crate::grid::{Grid, GridError, IndexType};
use crate::units::{ColumnsCount, RowsCount};

/// What a single maze generation run did to its grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Carving {
    pub start: CellCoordinate,
    pub passages_carved: usize,
}

/// A fast, seedable generator for the carving algorithms.
/// Without a seed it is seeded from the operating system's entropy source.
pub fn seeded_rng(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    }
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomized depth first search: from the current cell carve a passage to a random unvisited
/// neighbour and move there, and when every neighbour has been visited backtrack along the route
/// taken so far until a cell with an unvisited neighbour turns up. The search is driven by an
/// explicit stack rather than by recursion, so memory use is bounded by the grid size whatever
/// the grid's shape.
///
/// Every cell is visited exactly once, so the result is a perfect maze: all cells open, and one
/// passage fewer than there are cells.
///
/// `start` defaults to a random cell. Any existing passages are removed first. An out of bounds
/// start is rejected before the grid is touched.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                               rng: &mut R,
                                               start: Option<CellCoordinate>)
                                               -> Result<Carving, GridError>
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    let start = match start {
        Some(coord) if grid.is_valid_coordinate(coord) => coord,
        Some(coord) => return Err(GridError::OutOfBounds(coord)),
        None => grid.random_cell(rng),
    };
    debug!(rows = grid.rows().0, columns = grid.columns().0, %start, "carving maze");

    grid.reset();
    grid.set_open(start)?;

    let mut visited = BitSet::with_capacity(grid.size());
    let _ = visited.insert(visited_index(grid, start)?);

    let mut passages_carved = 0;
    let mut stack = Vec::with_capacity(grid.size());
    stack.push(start);

    while let Some(&current) = stack.last() {

        let unvisited_neighbours = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|coord| {
                grid.grid_coordinate_to_index(*coord)
                    .map_or(false, |index| !visited.contains(index))
            })
            .collect::<CoordinateSmallVec>();

        if unvisited_neighbours.is_empty() {
            trace!(cell = %current, "backtracking");
            let _ = stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen_range(0..unvisited_neighbours.len())];
            grid.link(current, next)?;
            let _ = visited.insert(visited_index(grid, next)?);
            passages_carved += 1;
            stack.push(next);
        }
    }

    debug!(passages_carved, open_cells = grid.open_count(), "maze carved");

    Ok(Carving {
        start,
        passages_carved,
    })
}

/// Create a `rows * columns` grid and carve a maze into it.
///
/// With a seed the maze is reproducible: the same dimensions, seed and start always carve the
/// same maze.
pub fn carve_maze<GridIndexType>(rows: RowsCount,
                                 columns: ColumnsCount,
                                 seed: Option<u64>,
                                 start: Option<CellCoordinate>)
                                 -> Result<Grid<GridIndexType>, GridError>
    where GridIndexType: IndexType
{
    let mut grid = Grid::new(rows, columns)?;
    let mut rng = seeded_rng(seed);
    let _ = recursive_backtracker(&mut grid, &mut rng, start)?;
    Ok(grid)
}

fn visited_index<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                           coord: CellCoordinate)
                                           -> Result<usize, GridError> {
    grid.grid_coordinate_to_index(coord).ok_or(GridError::OutOfBounds(coord))
}

#[cfg(test)]
mod tests {

    use quickcheck::{QuickCheck, TestResult};

    use super::*;
    use crate::grids::{small_rect_grid, LargeRectangularGrid, SmallRectangularGrid};
    use crate::pathing::{is_fully_connected, is_perfect_maze, Distances};

    fn gc(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate::new(row, column)
    }

    fn seeded(rows: usize, columns: usize, seed: u64) -> LargeRectangularGrid {
        carve_maze(RowsCount(rows), ColumnsCount(columns), Some(seed), None)
            .expect("valid dimensions")
    }

    fn links_of(grid: &LargeRectangularGrid) -> Vec<(CellCoordinate, CellCoordinate)> {
        let mut links = grid.iter_links()
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect::<Vec<_>>();
        links.sort();
        links
    }

    #[test]
    fn three_by_three_with_seed_42() {
        let g = seeded(3, 3, 42);
        assert_eq!(g.open_cells().len(), 9);
        assert!(g.wall_cells().is_empty());
        assert_eq!(g.links_count(), 8);
        assert!(is_fully_connected(&g, gc(0, 0)));
        assert!(is_perfect_maze(&g));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = seeded(3, 3, 42);
        let b = seeded(3, 3, 42);
        assert_eq!(links_of(&a), links_of(&b));
        assert_eq!(a.open_cells(), b.open_cells());

        let big_a = seeded(20, 30, 1234);
        let big_b = seeded(20, 30, 1234);
        assert_eq!(links_of(&big_a), links_of(&big_b));
    }

    #[test]
    fn different_seed_different_maze() {
        let a = seeded(3, 3, 42);
        let b = seeded(3, 3, 7);
        assert!(is_perfect_maze(&b));
        assert_ne!(links_of(&a), links_of(&b));
    }

    #[test]
    fn seeds_produce_a_variety_of_mazes() {
        let mut layouts = (0..20).map(|seed| links_of(&seeded(4, 4, seed))).collect::<Vec<_>>();
        layouts.sort();
        layouts.dedup();
        assert!(layouts.len() > 1);
    }

    #[test]
    fn single_cell_maze() {
        let mut g = small_rect_grid(RowsCount(1), ColumnsCount(1)).unwrap();
        let mut rng = seeded_rng(Some(1));
        let carving = recursive_backtracker(&mut g, &mut rng, None).unwrap();
        assert_eq!(carving, Carving { start: gc(0, 0), passages_carved: 0 });
        assert_eq!(g.links_count(), 0);
        assert_eq!(g.open_cells(), vec![gc(0, 0)]);
        assert!(is_perfect_maze(&g));
    }

    #[test]
    fn single_row_and_column_mazes_are_corridors() {
        for &(rows, columns) in &[(1, 6), (6, 1)] {
            let g = seeded(rows, columns, 9);
            assert_eq!(g.links_count(), 5);
            assert!(is_perfect_maze(&g));
        }
    }

    #[test]
    fn fixed_start_is_used() {
        let mut g = small_rect_grid(RowsCount(5), ColumnsCount(4)).unwrap();
        let mut rng = seeded_rng(Some(5));
        let carving = recursive_backtracker(&mut g, &mut rng, Some(gc(4, 3))).unwrap();
        assert_eq!(carving.start, gc(4, 3));
        assert_eq!(carving.passages_carved, 19);
        assert!(is_fully_connected(&g, gc(4, 3)));
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let mut g = small_rect_grid(RowsCount(3), ColumnsCount(3)).unwrap();
        g.link(gc(0, 0), gc(0, 1)).unwrap();
        let mut rng = seeded_rng(Some(5));
        let result = recursive_backtracker(&mut g, &mut rng, Some(gc(3, 3)));
        assert_eq!(result, Err(GridError::OutOfBounds(gc(3, 3))));

        // untouched
        assert_eq!(g.links_count(), 1);
        assert_eq!(g.open_count(), 2);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let result = carve_maze::<u32>(RowsCount(0), ColumnsCount(3), Some(1), None);
        assert_eq!(result.unwrap_err(), GridError::InvalidDimensions { rows: 0, columns: 3 });
    }

    #[test]
    fn regenerating_replaces_the_previous_maze() {
        let mut g: SmallRectangularGrid = small_rect_grid(RowsCount(6), ColumnsCount(6)).unwrap();
        let mut rng = seeded_rng(Some(11));
        for _ in 0..5 {
            let carving = recursive_backtracker(&mut g, &mut rng, None).unwrap();
            assert_eq!(carving.passages_carved, 35);
            assert_eq!(g.links_count(), 35);
            assert!(is_perfect_maze(&g));
        }
    }

    #[test]
    fn inspection_is_idempotent() {
        let g = seeded(7, 5, 3);
        assert_eq!(g.open_cells(), g.open_cells());
        assert_eq!(g.wall_cells(), g.wall_cells());
    }

    #[test]
    fn large_maze_does_not_recurse() {
        // A long corridor is the worst case for recursion depth.
        let g = seeded(1, 100_000, 2);
        assert_eq!(g.links_count(), 99_999);
        let distances = Distances::<u32>::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.max(), 99_999);
    }

    #[test]
    fn quickcheck_carved_mazes_are_perfect() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 24, columns as usize % 24);
            if rows == 0 || columns == 0 {
                return TestResult::discard();
            }
            let g = seeded(rows, columns, seed);
            let all_open = g.open_count() == rows * columns;
            let spanning_tree = g.links_count() == rows * columns - 1;
            TestResult::from_bool(all_open && spanning_tree && is_perfect_maze(&g))
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_every_cell_reachable_from_start() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 15 + 1, columns as usize % 15 + 1);
            let mut g = small_rect_grid(RowsCount(rows), ColumnsCount(columns)).unwrap();
            let mut rng = seeded_rng(Some(seed));
            let carving = recursive_backtracker(&mut g, &mut rng, None).unwrap();
            let distances = Distances::<u32>::new(&g, carving.start).unwrap();
            TestResult::from_bool(distances.reached_count() == rows * columns)
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
