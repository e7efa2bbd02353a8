use std::u32;

use crate::cells::CellCoordinate;
use crate::grid::GridError;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// Validated size of a rectangular grid. Cells are numbered in row major order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl RectGridDimensions {
    /// Both counts must be at least 1, each must fit a `u32` coordinate and the cell count
    /// must fit a `usize`.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<RectGridDimensions, GridError> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        let invalid = GridError::InvalidDimensions { rows: r, columns: c };

        if r == 0 || c == 0 || r > u32::MAX as usize || c > u32::MAX as usize {
            return Err(invalid);
        }
        if r.checked_mul(c).is_none() {
            return Err(invalid);
        }

        Ok(RectGridDimensions { rows, columns })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Capacity hints for the passage graph. A perfect maze is a spanning tree, so it has
    /// one passage fewer than it has cells.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (cells_count, EdgesCount(cells_count.0.saturating_sub(1)))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    /// Inverse of `grid_coordinate_to_index`. The index is not bounds checked.
    #[inline]
    pub fn coordinate_from_row_major_index(&self, index: usize) -> CellCoordinate {
        let ColumnsCount(width) = self.columns;
        CellCoordinate::new((index / width) as u32, (index % width) as u32)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dims(rows: usize, columns: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap()
    }

    #[test]
    fn zero_sized_dimensions_are_rejected() {
        assert_eq!(RectGridDimensions::new(RowsCount(0), ColumnsCount(3)),
                   Err(GridError::InvalidDimensions { rows: 0, columns: 3 }));
        assert_eq!(RectGridDimensions::new(RowsCount(3), ColumnsCount(0)),
                   Err(GridError::InvalidDimensions { rows: 3, columns: 0 }));
        assert!(RectGridDimensions::new(RowsCount(1), ColumnsCount(1)).is_ok());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let huge = u32::MAX as usize;
        assert!(RectGridDimensions::new(RowsCount(huge + 1), ColumnsCount(1)).is_err());
        assert!(RectGridDimensions::new(RowsCount(usize::MAX), ColumnsCount(2)).is_err());
    }

    #[test]
    fn size_and_graph_hints() {
        let d = dims(3, 4);
        assert_eq!(d.size(), NodesCount(12));
        assert_eq!(d.graph_size(), (NodesCount(12), EdgesCount(11)));
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
    }

    #[test]
    fn coordinate_index_mapping_is_row_major() {
        let d = dims(2, 3);
        let gc = |r, c| CellCoordinate::new(r, c);
        let coords = [gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)];
        for (expected_index, coord) in coords.iter().enumerate() {
            assert_eq!(d.grid_coordinate_to_index(*coord), Some(expected_index));
            assert_eq!(d.coordinate_from_row_major_index(expected_index), *coord);
        }
        assert_eq!(d.grid_coordinate_to_index(gc(2, 0)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(0, 3)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }
}
