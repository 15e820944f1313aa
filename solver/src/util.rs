use std::path::Path as FsPath;

use image::{DynamicImage, Rgb, RgbImage};

use crate::{
    error::MazeError,
    find::{PathFinder, SolveOptions},
    graph::Graph,
    grid::{PixelSource, Point, WallGrid},
    path::Path,
};

pub const WALL_PIXEL: Rgb<u8> = Rgb([0, 0, 0]);
pub const OPEN_PIXEL: Rgb<u8> = Rgb([255, 255, 255]);
pub const PATH_PIXEL: Rgb<u8> = Rgb([255, 0, 0]);

pub fn load_maze(path: impl AsRef<FsPath>) -> Result<DynamicImage, anyhow::Error> {
    Ok(image::open(path)?)
}

/// Run classify, build, search and emit on an already classified grid
pub fn solve_grid(grid: &WallGrid, options: &SolveOptions) -> Result<Path, MazeError> {
    let mut graph = Graph::from_grid(grid);
    let exit = PathFinder::new(&mut graph, options)?.finish(&mut graph)?;
    Path::emit(&graph, exit)
}

/// The whole pipeline for one pixel source
pub fn solve<S: PixelSource>(
    source: &S,
    options: &SolveOptions,
) -> Result<(WallGrid, Path), MazeError> {
    let grid = WallGrid::classify(source)?;
    let path = solve_grid(&grid, options)?;
    Ok((grid, path))
}

/// Redraw the grid in black and white with the path painted on top.
///
/// Each path cell's parent is the cell the search processed just before it,
/// so dead ends the search walked into are painted too and consecutive cells
/// need not be adjacent after backing out of one.
pub fn render_solution(grid: &WallGrid, path: impl IntoIterator<Item = Point>) -> RgbImage {
    let mut img = RgbImage::new(grid.width() as u32, grid.height() as u32);

    for (i, wall) in grid.walls().iter().enumerate() {
        let (x, y) = (i % grid.width(), i / grid.width());
        let color = if *wall { WALL_PIXEL } else { OPEN_PIXEL };
        img.put_pixel(x as u32, y as u32, color);
    }

    for point in path {
        img.put_pixel(point.x as u32, point.y as u32, PATH_PIXEL);
    }

    img
}

pub fn save_solution(
    grid: &WallGrid,
    path: impl IntoIterator<Item = Point>,
    out: impl AsRef<FsPath>,
) -> Result<(), anyhow::Error> {
    render_solution(grid, path).save(out.as_ref())?;
    log::info!("Solution written to {}", out.as_ref().display());
    Ok(())
}
