//! **maze_carver** generates perfect mazes on rectangular grids.
//!
//! A [`grid::Grid`] starts as all walls. [`generators::recursive_backtracker`] carves passages
//! into it with a randomized depth first search driven by any `rand::Rng`, so a seeded generator
//! always carves the same maze. The carved maze is read back through `open_cells`, `wall_cells`
//! and the passage links, as a box drawn text grid, or as a [`blocks::BlockMap`] of wall and
//! floor bricks for tile based renderers.

pub mod blocks;
pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grids;
pub mod pathing;
pub mod units;
