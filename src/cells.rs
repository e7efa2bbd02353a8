use smallvec::SmallVec;
use std::fmt;
use crate::units::{ColumnIndex, RowIndex};

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<CellCoordinate>; 4]>;

/// Position of a cell in a rectangular grid. Row 0 is the northern edge, column 0 the western edge.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: u32,
    pub column: u32,
}

impl CellCoordinate {
    pub fn new(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> CellCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        CellCoordinate::new(row as u32, col as u32)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable, i.e. north of row 0 or west of column 0.
    /// Nothing here knows about the grid's southern or eastern boundary.
    pub fn offset(self, dir: CompassPrimary) -> Option<CellCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::North => row.checked_sub(1).map(|r| CellCoordinate::new(r, column)),
            CompassPrimary::South => row.checked_add(1).map(|r| CellCoordinate::new(r, column)),
            CompassPrimary::East => column.checked_add(1).map(|c| CellCoordinate::new(row, c)),
            CompassPrimary::West => column.checked_sub(1).map(|c| CellCoordinate::new(row, c)),
        }
    }

    /// The direction to travel from `self` to reach an orthogonally adjacent `other`.
    pub fn direction_to(self, other: CellCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|&dir| self.offset(dir) == Some(other))
    }
}

impl From<(u32, u32)> for CellCoordinate {
    fn from(row_column_pair: (u32, u32)) -> CellCoordinate {
        CellCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Neighbour lookup order. Carving picks among neighbours in this order, so changing it
    /// changes the maze produced for a given seed.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::u32;

    #[test]
    fn offsets_from_origin() {
        let origin = CellCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::South), Some(CellCoordinate::new(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::East), Some(CellCoordinate::new(0, 1)));
    }

    #[test]
    fn offsets_at_representable_limit() {
        let corner = CellCoordinate::new(u32::MAX, u32::MAX);
        assert_eq!(corner.offset(CompassPrimary::South), None);
        assert_eq!(corner.offset(CompassPrimary::East), None);
        assert_eq!(corner.offset(CompassPrimary::North),
                   Some(CellCoordinate::new(u32::MAX - 1, u32::MAX)));
    }

    #[test]
    fn direction_between_cells() {
        let c = CellCoordinate::new(2, 2);
        for dir in CompassPrimary::ALL.iter().cloned() {
            let neighbour = c.offset(dir).unwrap();
            assert_eq!(c.direction_to(neighbour), Some(dir));
            assert_eq!(neighbour.direction_to(c), Some(dir.opposite()));
        }
        assert_eq!(c.direction_to(c), None);
        assert_eq!(c.direction_to(CellCoordinate::new(3, 3)), None);
        assert_eq!(c.direction_to(CellCoordinate::new(2, 4)), None);
    }

    #[test]
    fn from_row_column_pair() {
        assert_eq!(CellCoordinate::from((3, 7)), CellCoordinate { row: 3, column: 7 });
        assert_eq!(CellCoordinate::from_row_column_indices(RowIndex(3), ColumnIndex(7)),
                   CellCoordinate::new(3, 7));
    }
}
