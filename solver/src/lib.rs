pub mod error;
pub mod find;
pub mod graph;
pub mod grid;
pub mod path;
pub mod util;

pub use error::{BoundaryRow, MazeError};
pub use find::{PathFinder, PathFinderState, SolveOptions, WallPolicy};
pub use graph::{Graph, Node, NodeId};
pub use grid::{PixelSource, Point, WallGrid};
pub use path::Path;
