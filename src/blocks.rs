//! A brick view of a carved maze.
//!
//! Every cell and every gap between cells becomes a square brick, either wall or floor. A grid
//! of `rows * columns` cells gives `(2 * rows + 1) * (2 * columns + 1)` bricks, the outermost ring
//! of which is always wall. Tile and sprite based renderers can place one block per brick.

use bit_set::BitSet;
use itertools::iproduct;
use std::fmt;
use std::u32;

use crate::cells::CellCoordinate;
use crate::grid::{Grid, GridError, IndexType};
use crate::units::{ColumnsCount, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Bricks {
    Walls,
    Floor,
}

/// Wall and floor bricks. Brick coordinates use the same row/column layout as cell coordinates:
/// cell `(r, c)` sits on brick `(2r + 1, 2c + 1)`.
#[derive(Clone, Debug)]
pub struct BlockMap {
    rows: RowsCount,
    columns: ColumnsCount,
    floor: BitSet,
}

impl BlockMap {
    pub fn from_grid<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> Result<BlockMap, GridError> {
        let (RowsCount(cell_rows), ColumnsCount(cell_columns)) = (grid.rows(), grid.columns());
        let too_large = GridError::InvalidDimensions { rows: cell_rows, columns: cell_columns };

        let rows = cell_rows.checked_mul(2).and_then(|r| r.checked_add(1)).ok_or(too_large)?;
        let columns = cell_columns.checked_mul(2).and_then(|c| c.checked_add(1)).ok_or(too_large)?;
        if rows > u32::MAX as usize || columns > u32::MAX as usize {
            return Err(too_large);
        }
        let bricks_count = rows.checked_mul(columns).ok_or(too_large)?;

        let mut blocks = BlockMap {
            rows: RowsCount(rows),
            columns: ColumnsCount(columns),
            floor: BitSet::with_capacity(bricks_count),
        };

        for cell in grid.open_cells() {
            let brick = CellCoordinate::new(2 * cell.row + 1, 2 * cell.column + 1);
            blocks.set_floor(brick);
        }
        for (a, b) in grid.iter_links() {
            // The brick between two adjacent cells' bricks.
            let brick = CellCoordinate::new(a.row + b.row + 1, a.column + b.column + 1);
            blocks.set_floor(brick);
        }

        Ok(blocks)
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// None when the brick is outside the map.
    pub fn is_floor(&self, brick: CellCoordinate) -> Option<bool> {
        self.brick_index(brick).map(|index| self.floor.contains(index))
    }

    /// Floor bricks in row major order.
    pub fn floor(&self) -> Vec<CellCoordinate> {
        self.bricks(Bricks::Floor)
    }

    /// Wall bricks in row major order.
    pub fn walls(&self) -> Vec<CellCoordinate> {
        self.bricks(Bricks::Walls)
    }

    pub fn bricks(&self, kind: Bricks) -> Vec<CellCoordinate> {
        let want_floor = kind == Bricks::Floor;
        iproduct!(0..self.rows.0, 0..self.columns.0)
            .filter(|&(row, column)| self.floor.contains(row * self.columns.0 + column) == want_floor)
            .map(|(row, column)| CellCoordinate::new(row as u32, column as u32))
            .collect()
    }

    /// Centre points `(x, y)` of the chosen bricks when each brick is a `brick_width` square and
    /// brick `(0, 0)` has its top left corner at the origin. `x` grows with the column and `y`
    /// with the row.
    pub fn brick_centres(&self, brick_width: f32, kind: Bricks) -> Vec<(f32, f32)> {
        let half_width = brick_width / 2.0;
        self.bricks(kind)
            .into_iter()
            .map(|brick| {
                (brick.column as f32 * brick_width + half_width,
                 brick.row as f32 * brick_width + half_width)
            })
            .collect()
    }

    fn set_floor(&mut self, brick: CellCoordinate) {
        if let Some(index) = self.brick_index(brick) {
            let _ = self.floor.insert(index);
        }
    }

    fn brick_index(&self, brick: CellCoordinate) -> Option<usize> {
        let (row, column) = (brick.row as usize, brick.column as usize);
        if row < self.rows.0 && column < self.columns.0 {
            Some(row * self.columns.0 + column)
        } else {
            None
        }
    }
}

impl fmt::Display for BlockMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows.0 {
            let line = (0..self.columns.0)
                .map(|column| if self.floor.contains(row * self.columns.0 + column) { ' ' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
