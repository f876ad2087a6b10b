//! Route finding over a [Graph]
//!
//! Two strategies share the [PathFinder] interface:
//! - [AStar] expands cells in order of cost so far plus Manhattan distance
//!   to the goal, and always returns a shortest path.
//! - [DepthFirst] follows the adjacency order as deep as it can and
//!   returns the first path it stumbles upon.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::{Graph, Point};

/// Outcome of a single search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells from start to goal, both included; `None` if goal is unreachable
    pub path: Option<Vec<Point>>,
    /// Number of distinct cells closed or marked visited, including the
    /// goal when it is found
    pub visited: usize,
}

impl SearchResult {
    /// Path length in steps (edges)
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }

    fn logged(self, algorithm: &str) -> Self {
        debug!(algorithm, visited = self.visited, path_len = ?self.path_len(), "search_done");
        self
    }
}

/// Search strategy from one cell to another
pub trait PathFinder: Send + Sync {
    /// Human readable name of the algorithm
    fn name(&self) -> &'static str;

    /// Find a path from `start` to `goal`.
    ///
    /// An unreachable goal is not an error: the result has no path, and
    /// reports how many cells were visited before giving up.
    fn search(&self, graph: &Graph, start: Point, goal: Point) -> SearchResult;
}

/// A* search with the Manhattan distance heuristic
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl PathFinder for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    /// Stale queue entries are not removed when a cheaper route to the
    /// same cell is found; they are skipped when popped, because by then
    /// the cell is already closed.
    ///
    /// Equal priorities pop in [Point] order, so results are
    /// deterministic.
    fn search(&self, graph: &Graph, start: Point, goal: Point) -> SearchResult {
        let mut open = BinaryHeap::new();
        let mut came_from: HashMap<Point, Point> = HashMap::new();
        let mut cost_so_far: HashMap<Point, usize> = HashMap::from([(start, 0)]);
        let mut closed: HashSet<Point> = HashSet::new();

        open.push(Reverse((start.manhattan(&goal), start)));

        while let Some(Reverse((_, current))) = open.pop() {
            if !closed.insert(current) {
                continue;
            }
            if current == goal {
                let path = rebuild_path(&came_from, goal);
                return SearchResult {
                    path: Some(path),
                    visited: closed.len(),
                }
                .logged(self.name());
            }

            let new_cost = cost_so_far[&current] + 1;
            for &next in graph.neighbors(current) {
                if cost_so_far.get(&next).map_or(true, |&old| new_cost < old) {
                    cost_so_far.insert(next, new_cost);
                    came_from.insert(next, current);
                    open.push(Reverse((new_cost + next.manhattan(&goal), next)));
                }
            }
        }

        SearchResult {
            path: None,
            visited: closed.len(),
        }
        .logged(self.name())
    }
}

/// Walk predecessors back from `end` until a cell without one
fn rebuild_path(came_from: &HashMap<Point, Point>, end: Point) -> Vec<Point> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Depth-first search with an explicit stack
///
/// Each stack entry carries its own copy of the path leading to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl PathFinder for DepthFirst {
    fn name(&self) -> &'static str {
        "DFS"
    }

    /// The goal is recognized when popped, not when pushed. Neighbors are
    /// pushed in reverse, so the first one in adjacency order is explored
    /// first.
    fn search(&self, graph: &Graph, start: Point, goal: Point) -> SearchResult {
        let mut stack = vec![(start, vec![start])];
        let mut visited: HashSet<Point> = HashSet::new();

        while let Some((current, path)) = stack.pop() {
            if current == goal {
                visited.insert(current);
                return SearchResult {
                    path: Some(path),
                    visited: visited.len(),
                }
                .logged(self.name());
            }
            if !visited.insert(current) {
                continue;
            }
            for &next in graph.neighbors(current).iter().rev() {
                if !visited.contains(&next) {
                    let mut next_path = path.clone();
                    next_path.push(next);
                    stack.push((next, next_path));
                }
            }
        }

        SearchResult {
            path: None,
            visited: visited.len(),
        }
        .logged(self.name())
    }
}
