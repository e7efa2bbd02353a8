use crate::grid::{Grid, GridError};
use crate::units::{ColumnsCount, RowsCount};

/// Up to 255 cells.
pub type SmallRectangularGrid = Grid<u8>;
/// Up to 65535 cells.
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

pub fn small_rect_grid(rows: RowsCount,
                       columns: ColumnsCount)
                       -> Result<SmallRectangularGrid, GridError> {
    SmallRectangularGrid::new(rows, columns)
}

pub fn medium_rect_grid(rows: RowsCount,
                        columns: ColumnsCount)
                        -> Result<MediumRectangularGrid, GridError> {
    MediumRectangularGrid::new(rows, columns)
}

pub fn large_rect_grid(rows: RowsCount,
                       columns: ColumnsCount)
                       -> Result<LargeRectangularGrid, GridError> {
    LargeRectangularGrid::new(rows, columns)
}
