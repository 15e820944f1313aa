use std::iter::Rev;

use crate::{
    error::MazeError,
    graph::{Graph, NodeId},
    grid::Point,
};

/// The discovered path, entrance first. Consumed once: walk the parent chain
/// again to get a second copy.
///
/// The chain is walked and checked in full before the first point is handed
/// out, so a broken chain never reaches a writer half-way through.
#[derive(Debug)]
pub struct Path {
    width: usize,
    nodes: Rev<std::vec::IntoIter<NodeId>>,
}

impl Path {
    /// Follow the parent chain of `exit` back to the parent-less entrance.
    ///
    /// The chain is checked up front, a walk longer than the graph means a
    /// cycle and yields [`MazeError::BrokenParentChain`] instead of a path.
    pub fn emit(graph: &Graph, exit: NodeId) -> Result<Self, MazeError> {
        let mut chain = vec![exit];
        let mut current = exit;

        while let Some(parent) = graph.node(current).parent() {
            if chain.len() >= graph.len() {
                return Err(MazeError::BrokenParentChain { steps: chain.len() });
            }
            chain.push(parent);
            current = parent;
        }

        log::info!("Solution is {} cells long", chain.len());

        Ok(Self {
            width: graph.width(),
            nodes: chain.into_iter().rev(),
        })
    }

    fn to_point(&self, id: NodeId) -> Point {
        Point {
            x: id.index() % self.width,
            y: id.index() / self.width,
        }
    }
}

impl Iterator for Path {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.nodes.next()?;
        Some(self.to_point(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for Path {}
