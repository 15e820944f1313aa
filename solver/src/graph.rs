use crate::{
    error::{BoundaryRow, MazeError},
    grid::{Point, WallGrid},
};

/// Index of a node inside a [`Graph`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One grid cell as seen by the traversal. Neighbor and parent links are
/// indices into the owning graph, never references.
#[derive(Clone, Debug, Default)]
pub struct Node {
    is_wall: bool,
    visited: bool,
    parent: Option<NodeId>,
    up: Option<NodeId>,
    down: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn up(&self) -> Option<NodeId> {
        self.up
    }

    pub fn down(&self) -> Option<NodeId> {
        self.down
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Neighbors in push order: up, down, left, right
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> {
        [self.up, self.down, self.left, self.right]
            .into_iter()
            .flatten()
    }
}

/// Arena of nodes in row-major order, with four-directional adjacency
#[derive(Clone, Debug)]
pub struct Graph {
    width: usize,
    height: usize,
    nodes: Vec<Node>,
}

impl Graph {
    /// Build the node arena for a classified grid. Adjacency is purely
    /// geometric, wall nodes are linked like any other.
    pub fn from_grid(grid: &WallGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let len = grid.len();

        let nodes = grid
            .walls()
            .iter()
            .enumerate()
            .map(|(i, &is_wall)| {
                let col = i % width;
                Node {
                    is_wall,
                    visited: false,
                    parent: None,
                    up: i.checked_sub(width).map(NodeId),
                    down: Some(i + width).filter(|&d| d < len).map(NodeId),
                    // decided by column, the flat index alone would wrap rows
                    left: (col > 0).then(|| NodeId(i - 1)),
                    right: (col + 1 < width).then(|| NodeId(i + 1)),
                }
            })
            .collect();

        Self {
            width,
            height,
            nodes,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `id` was handed out by a different, smaller graph
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn id_of(&self, point: Point) -> Option<NodeId> {
        (point.x < self.width && point.y < self.height)
            .then(|| NodeId(point.y * self.width + point.x))
    }

    pub fn point_of(&self, id: NodeId) -> Point {
        Point {
            x: id.0 % self.width,
            y: id.0 / self.width,
        }
    }

    /// Mark `id` visited and record where it was reached from. Returns false
    /// and leaves the node untouched if it was already visited, so a parent is
    /// only ever written once.
    pub fn visit(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        let node = &mut self.nodes[id.0];
        if node.visited {
            return false;
        }
        node.visited = true;
        node.parent = parent;
        true
    }

    /// First open cell of the top row, scanning left to right
    pub fn entrance(&self) -> Result<NodeId, MazeError> {
        self.first_open_in_row(0)
            .ok_or(MazeError::NoOpenCell {
                row: BoundaryRow::Top,
            })
    }

    /// First open cell of the bottom row, scanning left to right
    pub fn exit(&self) -> Result<NodeId, MazeError> {
        self.height
            .checked_sub(1)
            .and_then(|row| self.first_open_in_row(row))
            .ok_or(MazeError::NoOpenCell {
                row: BoundaryRow::Bottom,
            })
    }

    fn first_open_in_row(&self, row: usize) -> Option<NodeId> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        (start..start + self.width)
            .find(|&i| !self.nodes[i].is_wall)
            .map(NodeId)
    }
}
