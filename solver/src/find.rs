use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::MazeError,
    graph::{Graph, NodeId},
};

/// Whether wall nodes may enter the frontier
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallPolicy {
    /// Never push a wall node
    #[default]
    Skip,
    /// Push neighbors on the visited flag alone, walls included
    Traverse,
}

impl Display for WallPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WallPolicy::Skip => "skip",
                WallPolicy::Traverse => "traverse",
            }
        )
    }
}

impl FromStr for WallPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(WallPolicy::Skip),
            "traverse" => Ok(WallPolicy::Traverse),
            _ => Err(anyhow::anyhow!("Invalid wall policy: {}", s)),
        }
    }
}

/// Knobs for a solver run
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct SolveOptions {
    pub wall_policy: WallPolicy,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    /// The exit was reached, its parent chain leads back to the entrance
    PathFound(NodeId),
}

impl PathFinderState {
    fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Depth-first search from the entrance to the exit with an explicit stack.
///
/// Every processed node gets the previously processed node as its parent (the
/// lineage cursor), so the parent chain of the exit is the order in which the
/// search walked the maze.
#[derive(Debug)]
pub struct PathFinder {
    entrance: NodeId,
    exit: NodeId,
    policy: WallPolicy,
    stack: Vec<NodeId>,
    cursor: NodeId,
    processed: usize,
    state: PathFinderState,
}

impl PathFinder {
    /// Locate entrance and exit and seed the frontier. Fails with
    /// [`MazeError::NoOpenCell`] before anything in the graph is touched.
    pub fn new(graph: &mut Graph, options: &SolveOptions) -> Result<Self, MazeError> {
        let entrance = graph.entrance()?;
        let exit = graph.exit()?;

        log::info!("Got starting position at: {}", graph.point_of(entrance));
        log::info!("Got end position at: {}", graph.point_of(exit));

        graph.visit(entrance, None);

        let mut finder = Self {
            entrance,
            exit,
            policy: options.wall_policy,
            stack: Vec::new(),
            cursor: entrance,
            processed: 0,
            state: PathFinderState::Computing,
        };

        if entrance == exit {
            finder.state = PathFinderState::PathFound(exit);
            return Ok(finder);
        }

        // the entrance only seeds downwards, unless that way is closed
        match graph
            .node(entrance)
            .down()
            .filter(|&down| finder.can_push(graph, down))
        {
            Some(down) => finder.stack.push(down),
            None => finder.push_neighbors(graph, entrance),
        }

        Ok(finder)
    }

    pub fn finish(mut self, graph: &mut Graph) -> Result<NodeId, MazeError> {
        loop {
            match self.step(graph) {
                PathFinderState::Computing => {}
                PathFinderState::NoPathFound => return Err(MazeError::NoPathFound),
                PathFinderState::PathFound(exit) => return Ok(exit),
            }
        }
    }

    /// Process at most one node from the frontier
    pub fn step(&mut self, graph: &mut Graph) -> PathFinderState {
        if self.state.is_done() {
            return self.state;
        }

        let Some(node) = self.stack.pop() else {
            log::debug!("Ran out of items after {} nodes", self.processed);
            self.state = PathFinderState::NoPathFound;
            return self.state;
        };

        // pushed more than once before being reached, already handled
        if !graph.visit(node, Some(self.cursor)) {
            return self.state;
        }
        self.cursor = node;
        self.processed += 1;

        if node == self.exit {
            log::debug!("Got to the end after {} nodes", self.processed);
            self.state = PathFinderState::PathFound(node);
            return self.state;
        }

        self.push_neighbors(graph, node);

        self.state
    }

    fn can_push(&self, graph: &Graph, id: NodeId) -> bool {
        let node = graph.node(id);
        !node.visited() && (self.policy == WallPolicy::Traverse || !node.is_wall())
    }

    fn push_neighbors(&mut self, graph: &Graph, id: NodeId) {
        for neighbor in graph.node(id).neighbors() {
            if self.can_push(graph, neighbor) {
                self.stack.push(neighbor);
            }
        }
    }

    pub fn state(&self) -> PathFinderState {
        self.state
    }

    /// Nodes currently waiting on the stack, bottom first
    pub fn frontier(&self) -> &[NodeId] {
        &self.stack
    }

    pub fn entrance(&self) -> NodeId {
        self.entrance
    }

    pub fn exit(&self) -> NodeId {
        self.exit
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::{
        error::BoundaryRow,
        grid::{Point, WallGrid},
    };

    fn graph(text: &str) -> Graph {
        Graph::from_grid(&text.parse::<WallGrid>().unwrap())
    }

    /// Points of the parent chain, entrance first
    fn lineage(graph: &Graph, exit: NodeId) -> Vec<Point> {
        let mut points = vec![graph.point_of(exit)];
        let mut current = exit;
        while let Some(parent) = graph.node(current).parent() {
            points.push(graph.point_of(parent));
            current = parent;
        }
        points.reverse();
        points
    }

    fn solve(text: &str, policy: WallPolicy) -> Result<Vec<Point>, MazeError> {
        let mut graph = graph(text);
        let options = SolveOptions {
            wall_policy: policy,
        };
        let exit = PathFinder::new(&mut graph, &options)?.finish(&mut graph)?;
        Ok(lineage(&graph, exit))
    }

    fn points(coords: &[(usize, usize)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_corridor_around_walls() {
        let path = solve(
            "...
             ##.
             ...",
            WallPolicy::Skip,
        );

        assert_eq!(
            path,
            Ok(points(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]))
        );
    }

    #[test]
    fn test_open_square_goes_straight_down() {
        let path = solve("..\n..", WallPolicy::Skip);
        assert_eq!(path, Ok(points(&[(0, 0), (0, 1)])));
    }

    #[test]
    fn test_right_is_explored_first() {
        // from (1, 1) both (1, 2) and (2, 1) are pushed, right pops first
        let path = solve(
            "..#
             ...
             #.#",
            WallPolicy::Skip,
        );

        // the dead end at (2, 1) stays in the lineage
        assert_eq!(
            path,
            Ok(points(&[(0, 0), (0, 1), (1, 1), (2, 1), (1, 2)]))
        );
    }

    #[test]
    fn test_no_entrance() {
        let mut graph = graph("###\n...\n.##");
        let err = PathFinder::new(&mut graph, &SolveOptions::default()).unwrap_err();

        assert_eq!(
            err,
            MazeError::NoOpenCell {
                row: BoundaryRow::Top
            }
        );
        // nothing was visited
        for y in 0..graph.height() {
            for x in 0..graph.width() {
                let id = graph.id_of(Point::new(x, y)).unwrap();
                assert!(!graph.node(id).visited());
            }
        }
    }

    #[test]
    fn test_no_exit() {
        assert_eq!(
            solve("..\n##", WallPolicy::Skip),
            Err(MazeError::NoOpenCell {
                row: BoundaryRow::Bottom
            })
        );
    }

    #[test]
    fn test_unbroken_wall() {
        assert_eq!(
            solve("...\n###\n...", WallPolicy::Skip),
            Err(MazeError::NoPathFound)
        );
    }

    #[test]
    fn test_traverse_walks_through_walls() {
        let path = solve("...\n###\n...", WallPolicy::Traverse).unwrap();

        // the seeded wall below the entrance is processed like an open cell
        assert_eq!(
            path,
            points(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2), (1, 2), (0, 2)])
        );
    }

    #[test]
    fn test_single_row_is_its_own_exit() {
        assert_eq!(solve("#..", WallPolicy::Skip), Ok(points(&[(1, 0)])));
    }

    #[test]
    fn test_every_node_processed_once() {
        let path = solve(
            ".....
             .....
             .....
             .....
             ####.",
            WallPolicy::Skip,
        )
        .unwrap();

        let mut unique = path.clone();
        unique.sort_by_key(|p| (p.y, p.x));
        unique.dedup();

        assert_eq!(unique.len(), path.len());
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn test_deterministic() {
        let maze = "..#..
                    .#...
                    ...#.
                    #.#..
                    ...#.";
        assert_eq!(solve(maze, WallPolicy::Skip), solve(maze, WallPolicy::Skip));
    }

    #[test]
    fn test_step_by_step() {
        let mut graph = graph("..\n..");
        let mut finder = PathFinder::new(&mut graph, &SolveOptions::default()).unwrap();

        assert_eq!(finder.state(), PathFinderState::Computing);
        assert_eq!(finder.frontier(), &[graph.id_of(Point::new(0, 1)).unwrap()]);

        let exit = finder.exit();
        assert_eq!(finder.step(&mut graph), PathFinderState::PathFound(exit));
        // finished finders stay finished
        assert_eq!(finder.step(&mut graph), PathFinderState::PathFound(exit));
        assert_eq!(graph.node(exit).parent(), Some(finder.entrance()));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("skip".parse::<WallPolicy>().unwrap(), WallPolicy::Skip);
        assert_eq!(
            "traverse".parse::<WallPolicy>().unwrap(),
            WallPolicy::Traverse
        );
        assert!("walls".parse::<WallPolicy>().is_err());
        assert_eq!(WallPolicy::Traverse.to_string(), "traverse");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.wall_policy, WallPolicy::Skip);

        let options: SolveOptions =
            serde_json::from_str(r#"{ "wall_policy": "traverse" }"#).unwrap();
        assert_eq!(options.wall_policy, WallPolicy::Traverse);
    }
}
