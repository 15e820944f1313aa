use crate::error::MazeError;
use std::{fmt::Display, str::FromStr};

use image::{DynamicImage, GenericImageView, RgbImage};
use serde::{Deserialize, Serialize};

/// Pure white on an 8-bit scale, the only color that counts as open
pub const OPEN_COLOR: [u8; 3] = [255, 255, 255];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Anything that can hand out 8-bit RGB triples for a rectangle of pixels
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// The color at `(x, y)`, alpha dropped
    fn pixel(&self, x: usize, y: usize) -> Result<[u8; 3], MazeError>;
}

impl PixelSource for DynamicImage {
    fn width(&self) -> usize {
        GenericImageView::width(self) as usize
    }

    fn height(&self) -> usize {
        GenericImageView::height(self) as usize
    }

    // deeper samples are truncated down to 8 bits, never rounded, so only a
    // full-scale sample at the native depth reads as 255
    fn pixel(&self, x: usize, y: usize) -> Result<[u8; 3], MazeError> {
        if x >= PixelSource::width(self) || y >= PixelSource::height(self) {
            return Err(MazeError::PixelOutOfBounds { x, y });
        }
        let (x, y) = (x as u32, y as u32);

        Ok(match self {
            DynamicImage::ImageLuma16(img) => [truncate_u16(img.get_pixel(x, y).0[0]); 3],
            DynamicImage::ImageLumaA16(img) => [truncate_u16(img.get_pixel(x, y).0[0]); 3],
            DynamicImage::ImageRgb16(img) => {
                let [r, g, b] = img.get_pixel(x, y).0;
                [r, g, b].map(truncate_u16)
            }
            DynamicImage::ImageRgba16(img) => {
                let [r, g, b, _] = img.get_pixel(x, y).0;
                [r, g, b].map(truncate_u16)
            }
            DynamicImage::ImageRgb32F(img) => {
                let [r, g, b] = img.get_pixel(x, y).0;
                [r, g, b].map(truncate_f32)
            }
            DynamicImage::ImageRgba32F(img) => {
                let [r, g, b, _] = img.get_pixel(x, y).0;
                [r, g, b].map(truncate_f32)
            }
            _ => {
                let [r, g, b, _] = self.get_pixel(x, y).0;
                [r, g, b]
            }
        })
    }
}

fn truncate_u16(sample: u16) -> u8 {
    (sample / 257) as u8
}

fn truncate_f32(sample: f32) -> u8 {
    (sample.clamp(0.0, 1.0) * 255.0) as u8
}

impl PixelSource for RgbImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn pixel(&self, x: usize, y: usize) -> Result<[u8; 3], MazeError> {
        if x >= PixelSource::width(self) || y >= PixelSource::height(self) {
            return Err(MazeError::PixelOutOfBounds { x, y });
        }
        Ok(self.get_pixel(x as u32, y as u32).0)
    }
}

/// A rectangular wall/open grid, stored row-major in one vec
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WallGrid {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl WallGrid {
    /// Create a grid from row-major wall flags, `walls.len()` must equal `width * height`
    pub fn new(width: usize, height: usize, walls: Vec<bool>) -> Result<Self, anyhow::Error> {
        if walls.len() != width * height {
            return Err(anyhow::anyhow!(
                "expected {} cells for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                walls.len()
            ));
        }
        Ok(Self {
            width,
            height,
            walls,
        })
    }

    /// Classify every pixel of the source: pure white is open, everything else is a wall
    pub fn classify<S: PixelSource>(source: &S) -> Result<Self, MazeError> {
        let width = source.width();
        let height = source.height();

        let mut walls = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                walls.push(source.pixel(x, y)? != OPEN_COLOR);
            }
        }

        log::info!("Image is {} x {}", width, height);

        Ok(Self {
            width,
            height,
            walls,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// `None` for points outside of the grid
    pub fn is_wall(&self, point: Point) -> Option<bool> {
        if point.x >= self.width || point.y >= self.height {
            return None;
        }
        Some(self.walls[point.y * self.width + point.x])
    }

    /// Row-major wall flags
    pub fn walls(&self) -> &[bool] {
        &self.walls
    }
}

impl Display for WallGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.walls.chunks(self.width.max(1)) {
            for wall in row {
                write!(f, "{}", if *wall { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses the `Display` format: one line per row, `#` for walls and `.` for open cells
impl FromStr for WallGrid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map_or(0, |r| r.chars().count());

        let mut walls = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(anyhow::anyhow!("row {} is not {} cells wide", y, width));
            }
            for c in row.chars() {
                walls.push(match c {
                    '#' => true,
                    '.' => false,
                    _ => return Err(anyhow::anyhow!("Invalid cell: {}", c)),
                });
            }
        }

        WallGrid::new(width, rows.len(), walls)
    }
}
