//! Adjacency view over the passages of a maze

use std::collections::HashMap;

use tracing::debug;

use crate::{Maze, Point};

/// Build the passage graph of `maze`. Shorthand for [Graph::from_maze].
pub fn build_graph(maze: &Maze) -> Graph {
    Graph::from_maze(maze)
}

/// Undirected unit-cost graph, stored as adjacency lists
///
/// Nodes are grid coordinates. The graph is never modified after it has
/// been built, so one instance can be shared by any number of searches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<Point, Vec<Point>>,
}

impl Graph {
    /// Offsets to the direct neighbors: up, down, left, right
    const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Add every passage square, with edges to its passage neighbors.
    ///
    /// Neighbor lists are ordered up, down, left, right. The order decides
    /// which branch a depth-first search tries first.
    pub fn from_maze(maze: &Maze) -> Self {
        let mut adjacency = HashMap::new();

        for (y, row) in maze.rows().iter().enumerate() {
            for x in 0..row.len() {
                let p = Point::new(y, x);
                if !maze.is_passage(p) {
                    continue;
                }
                let neighbors = Self::DIRECTIONS
                    .iter()
                    .filter_map(|&(dy, dx)| {
                        let next = Point::new(y.checked_add_signed(dy)?, x.checked_add_signed(dx)?);
                        maze.is_passage(next).then_some(next)
                    })
                    .collect();
                adjacency.insert(p, neighbors);
            }
        }

        debug!(nodes = adjacency.len(), "graph_built");
        Graph { adjacency }
    }

    /// Neighbors of `p`, empty if `p` is not in the graph
    pub fn neighbors(&self, p: Point) -> &[Point] {
        self.adjacency.get(&p).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.adjacency.contains_key(&p)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All nodes, in no particular order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }
}

impl FromIterator<(Point, Vec<Point>)> for Graph {
    fn from_iter<I: IntoIterator<Item = (Point, Vec<Point>)>>(iter: I) -> Self {
        Graph {
            adjacency: iter.into_iter().collect(),
        }
    }
}
