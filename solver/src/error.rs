use std::fmt::Display;

/// The boundary row a [`MazeError::NoOpenCell`] refers to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundaryRow {
    Top,
    Bottom,
}

impl Display for BoundaryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BoundaryRow::Top => "top (entrance)",
                BoundaryRow::Bottom => "bottom (exit)",
            }
        )
    }
}

/// Everything that can end a solver run. None of these are retried: the
/// computation is deterministic, a second attempt would fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("the {row} row has no open cell")]
    NoOpenCell { row: BoundaryRow },

    #[error("no path found, the maze is disconnected")]
    NoPathFound,

    #[error("parent chain did not reach the entrance after {steps} steps")]
    BrokenParentChain { steps: usize },

    #[error("pixel ({x}, {y}) is outside of the image")]
    PixelOutOfBounds { x: usize, y: usize },
}
