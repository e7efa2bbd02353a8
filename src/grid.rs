use bit_set::BitSet;
use petgraph::{Graph, Undirected};
use petgraph::graph;
pub use petgraph::graph::IndexType;
use rand::Rng;
use std::fmt;
use std::rc::Rc;
use std::slice;

use crate::cells::{CellCoordinate, CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_displays::GridDisplay;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// A rectangular maze grid.
///
/// Every cell is either a wall or open. Passages carved between adjacent cells are the edges of
/// an undirected graph whose nodes are the cells in row major order. `GridIndexType` bounds the
/// number of cells the graph can address, smaller index types make for a more compact graph.
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
    open: BitSet,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, thiserror::Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows} rows x {columns} columns")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("cell {0} is outside the grid")]
    OutOfBounds(CellCoordinate),
    #[error("a cell cannot be linked to itself")]
    SelfLink,
    #[error("only adjacent cells can be linked")]
    NotNeighbours,
    #[error("the grid cannot hold more than {0} passages")]
    TooManyLinks(usize),
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}, open cells: {:?}",
               self.graph, self.rows(), self.columns(), self.open.len())
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {

    /// A grid of `rows * columns` cells, all walls, with no passages.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid<GridIndexType>, GridError> {

        let dimensions = RectGridDimensions::new(rows, columns)?;
        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();

        // `IndexType::max()` is reserved by petgraph as the invalid index.
        if nodes > <GridIndexType as IndexType>::max().index() {
            return Err(GridError::InvalidDimensions { rows: rows.0, columns: columns.0 });
        }

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            dimensions,
            open: BitSet::with_capacity(nodes),
            grid_display: None,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// Number of passages carved between cells.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> CellCoordinate {
        let index = rng.gen_range(0..self.size());
        self.dimensions.coordinate_from_row_major_index(index)
    }

    pub fn is_wall(&self, coord: CellCoordinate) -> Result<bool, GridError> {
        self.is_open(coord).map(|open| !open)
    }

    pub fn is_open(&self, coord: CellCoordinate) -> Result<bool, GridError> {
        let index = self.checked_index(coord)?;
        Ok(self.open.contains(index))
    }

    pub fn set_open(&mut self, coord: CellCoordinate) -> Result<(), GridError> {
        let index = self.checked_index(coord)?;
        let _ = self.open.insert(index);
        Ok(())
    }

    /// Back to the freshly constructed state: every cell a wall and no passages.
    pub fn reset(&mut self) {
        self.graph.clear_edges();
        self.open.clear();
    }

    /// Carve a passage between two adjacent cells, opening both of them.
    ///
    /// Linking an already linked pair changes nothing.
    /// Passages are indexed with the grid's index type too, so at most `Ix::max()` of them fit.
    /// A carved maze always fits, having one passage fewer than cells.
    pub fn link(&mut self, a: CellCoordinate, b: CellCoordinate) -> Result<(), GridError> {
        let a_index = self.checked_index(a)?;
        let b_index = self.checked_index(b)?;
        if a == b {
            return Err(GridError::SelfLink);
        }
        if a.direction_to(b).is_none() {
            return Err(GridError::NotNeighbours);
        }

        let (a_node, b_node) = (graph::NodeIndex::new(a_index), graph::NodeIndex::new(b_index));
        if self.graph.find_edge(a_node, b_node).is_none() {
            let links_limit = <GridIndexType as IndexType>::max().index();
            if self.graph.edge_count() >= links_limit {
                return Err(GridError::TooManyLinks(links_limit));
            }
            let _ = self.graph.add_edge(a_node, b_node, ());
        }
        let _ = self.open.insert(a_index);
        let _ = self.open.insert(b_index);
        Ok(())
    }

    /// Unlink two cells, if the grid coordinates are valid and a link exists between them.
    /// Returns true if an unlink occurred. Both cells stay open.
    pub fn unlink(&mut self, a: CellCoordinate, b: CellCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_graph_index(a),
                                                 self.grid_coordinate_graph_index(b)) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Invalidates the last edge index in the graph, which is fine as none are stored.
                let _ = self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: CellCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord).map(|node_index| {
            self.graph
                .neighbors(node_index)
                .map(|linked| self.dimensions.coordinate_from_row_major_index(linked.index()))
                .collect()
        })
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage. Empty if the coordinate is not in the grid.
    pub fn neighbours(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }

        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: CellCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: CellCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<CellCoordinate> {
        coord.offset(direction)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_graph_index(a),
                                                 self.grid_coordinate_graph_index(b)) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: CellCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        self.dimensions.grid_coordinate_to_index(coord)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            dimensions: &self.dimensions,
        }
    }

    /// Open cells in row major order.
    pub fn open_cells(&self) -> Vec<CellCoordinate> {
        self.iter().filter(|coord| self.is_open_unchecked(*coord)).collect()
    }

    /// Wall cells in row major order.
    pub fn wall_cells(&self) -> Vec<CellCoordinate> {
        self.iter().filter(|coord| !self.is_open_unchecked(*coord)).collect()
    }

    fn is_open_unchecked(&self, coord: CellCoordinate) -> bool {
        self.grid_coordinate_to_index(coord).map_or(false, |index| self.open.contains(index))
    }

    fn checked_index(&self, coord: CellCoordinate) -> Result<usize, GridError> {
        self.grid_coordinate_to_index(coord).ok_or(GridError::OutOfBounds(coord))
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: CellCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    dimensions: &'a RectGridDimensions,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (CellCoordinate, CellCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = self.dimensions.coordinate_from_row_major_index(edge.source().index());
            let dst_cell_coord = self.dimensions.coordinate_from_row_major_index(edge.target().index());
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {
} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
