use docopt::Docopt;
use serde_derive::Deserialize;
use maze_carver::{
    blocks::BlockMap,
    cells::CellCoordinate,
    generators,
    grid::Grid,
    grid_displays::{GridDisplay, PathDisplay},
    grids::LargeRectangularGrid,
    pathing,
    units::{ColumnsCount, RowsCount},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    io::BufWriter,
    rc::Rc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Maze Carver

Usage:
    maze_driver -h | --help
    maze_driver [--rows=<r>] [--columns=<c>] [--seed=<n>] [--start-row=<r> --start-column=<c>] [--show-path | --show-distances] [--blocks] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of rows of cells in the maze [default: 10].
    --columns=<c>          Number of columns of cells in the maze [default: 10].
    --seed=<n>             Seed for the random number generator. The same seed and dimensions always carve the same maze. A random seed is used if not given.
    --start-row=<r>        Row of the cell carving starts from. A random cell is used if not given.
    --start-column=<c>     Column of the cell carving starts from.
    --show-path            Mark the longest path through the maze.
    --show-distances       Show the distance in steps (hexadecimal) from the carving start cell to every other cell.
    --blocks               Render the maze as wall (#) and floor bricks instead of box drawing lines.
    --text-out=<path>      Write the rendered maze to a file instead of standard output.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_start_row: Option<u32>,
    flag_start_column: Option<u32>,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_blocks: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

// error_chain! creates the Error, ErrorKind, ResultExt and Result types, with From conversions
// for the foreign errors so `?` works on them.
mod errors {
    use error_chain::*;
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
            Grid(::maze_carver::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                             .unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut maze_grid =
        LargeRectangularGrid::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))
            .chain_err(|| "Invalid maze dimensions")?;

    let start = match (args.flag_start_row, args.flag_start_column) {
        (Some(row), Some(column)) => Some(CellCoordinate::new(row, column)),
        _ => None,
    };
    let mut rng = generators::seeded_rng(args.flag_seed);
    let carving = generators::recursive_backtracker(&mut maze_grid, &mut rng, start)
        .chain_err(|| "Failed to carve the maze")?;
    info!(start = %carving.start, passages = carving.passages_carved, "maze ready");

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let rendering = if args.flag_blocks {
        BlockMap::from_grid(&maze_grid)?.to_string()
    } else {
        set_maze_griddisplay(&mut maze_grid, &args, carving.start);
        maze_grid.to_string()
    };

    if args.flag_text_out.is_empty() {
        print!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Choose what, if anything, is drawn inside each cell of the text rendering.
fn set_maze_griddisplay(maze_grid: &mut LargeRectangularGrid,
                        maze_args: &MazeArgs,
                        carving_start: CellCoordinate) {

    if maze_args.flag_show_distances {
        let distances = pathing::Distances::<u32>::new(&*maze_grid, carving_start);
        maze_grid.set_grid_display(distances.map(|d| Rc::new(d) as Rc<dyn GridDisplay>));

    } else if maze_args.flag_show_path {
        let path = pathing::dijkstra_longest_path::<u32, u32>(&*maze_grid).unwrap_or_default();
        let display_path = Rc::new(PathDisplay::new(&path));
        maze_grid.set_grid_display(Some(display_path as Rc<dyn GridDisplay>));
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let write_graph = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(file_path)?);
        writeln!(out, "{} {}", maze_grid.size(), maze_grid.links_count())?;

        for (src, dst) in maze_grid.iter_links() {
            // Links only ever join valid coordinates.
            let to_vertex = |coord| maze_grid.grid_coordinate_to_index(coord).map_or(0, |i| i + 1);
            writeln!(out, "{} {}", to_vertex(src), to_vertex(dst))?;
        }
        out.flush()
    };

    write_graph().chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!(path = file_path, "maze graph saved");

    Ok(())
}
