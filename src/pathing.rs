use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use num::traits::{Bounded, CheckedAdd, One, Unsigned, Zero};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::CellCoordinate;
use crate::grid::{Grid, IndexType};

// Generic parameter type aliases are not in the language, so a blanket implemented trait stands in.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + CheckedAdd + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T> MaxDistance for T
    where T: Zero + One + Bounded + Unsigned + Add + CheckedAdd + Debug + Clone + Copy + Display + LowerHex + Ord
{
}

/// Flood fill step counts from a start cell to every cell reachable through passages.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// None if the start coordinate is not on the grid, or if a reachable cell is further from the
    /// start than `MaxDistanceT` can count.
    pub fn new<GridIndexType>(grid: &Grid<GridIndexType>,
                              start_coordinate: CellCoordinate)
                              -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max: MaxDistanceT = Zero::zero();
        let mut distances: FnvHashMap<CellCoordinate, MaxDistanceT> =
            FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start_coordinate, Zero::zero());

        // Every passage is one step, so the first time a cell is reached is by a shortest route and
        // its distance never needs revisiting. The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in links.iter() {
                    if !distances.contains_key(link_coordinate) {
                        let link_distance = distance_to_cell.checked_add(&One::one())?;
                        distances.insert(*link_coordinate, link_distance);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// Number of cells reached from the start, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// The cells at the maximum distance from the start, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[CellCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[CellCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to the linked
/// cell closest to the start. None if the end point is unreachable.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: CellCoordinate)
                                                  -> Option<Vec<CellCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let mut current_distance_to_start = distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                current_distance_to_start = closer_distance;
                path.push(current_coord);
            }
            // The grid changed since the distances were calculated.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path through a perfect maze: the cell furthest from an arbitrary open cell is one
/// end of it, and the cell furthest from that end is the other.
/// On a maze with loops or disconnected regions this is only some long path.
pub fn dijkstra_longest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>)
                                                          -> Option<Vec<CellCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let arbitrary_start_point = *grid.open_cells().first()?;

    let first_distances = Distances::<MaxDistanceT>::new(grid, arbitrary_start_point)?;
    let long_path_start_coordinate = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::<MaxDistanceT>::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    let path = shortest_path(grid, &distances_from_start, end_point);
    debug!(start = %long_path_start_coordinate,
           end = %end_point,
           length = path.as_ref().map_or(0, |p| p.len()),
           "longest path");
    path
}

/// Every open cell can be reached from `start` through passages, and nothing else can.
pub fn is_fully_connected<GridIndexType>(grid: &Grid<GridIndexType>, start: CellCoordinate) -> bool
    where GridIndexType: IndexType
{
    match Distances::<usize>::new(grid, start) {
        Some(distances) => {
            distances.reached_count() == grid.open_count() &&
            grid.open_cells().iter().all(|c| distances.distance_from_start_to(*c).is_some())
        }
        None => false,
    }
}

/// Fully connected with exactly one passage fewer than open cells: a spanning tree over the
/// open cells, so exactly one route between any two of them.
pub fn is_perfect_maze<GridIndexType>(grid: &Grid<GridIndexType>) -> bool
    where GridIndexType: IndexType
{
    match grid.open_cells().first() {
        Some(first_open) => {
            grid.links_count() == grid.open_count() - 1 && is_fully_connected(grid, *first_open)
        }
        None => false,
    }
}
