use super::{Graph, Vertex};
use crate::error::{GraphError, Result};
use ahash::RandomState;
use std::collections::{HashSet, VecDeque};

/// Lazy breadth-first traversal yielding `(vertex, depth)` pairs in level
/// order.
///
/// The traversal borrows the graph for its whole lifetime, so the borrow
/// checker rules out structural mutation while it is alive. Each reachable
/// vertex is produced exactly once, at its discovery depth; neighbours are
/// expanded in sorted identifier order. The sequence ends with `None` when
/// the frontier empties, end of sequence is not an error.
#[derive(Debug)]
pub struct Bfs<'g> {
    graph: &'g Graph,
    visited: HashSet<Vertex, RandomState>,
    frontier: VecDeque<(Vertex, usize)>,
    current_depth: Option<usize>,
}

/// Depth-first counterpart of [`Bfs`]: same protocol, LIFO frontier.
#[derive(Debug)]
pub struct Dfs<'g> {
    graph: &'g Graph,
    visited: HashSet<Vertex, RandomState>,
    frontier: Vec<(Vertex, usize)>,
    current_depth: Option<usize>,
}

impl Graph {
    /// Fails with [`GraphError::UnknownVertex`] when the start vertex is
    /// absent.
    pub fn bfs(&self, start: impl Into<Vertex>) -> Result<Bfs<'_>> {
        let (visited, start) = self.seed(start.into())?;
        let mut frontier = VecDeque::new();
        frontier.push_back((start, 0));
        Ok(Bfs {
            graph: self,
            visited,
            frontier,
            current_depth: None,
        })
    }

    pub fn dfs(&self, start: impl Into<Vertex>) -> Result<Dfs<'_>> {
        let (visited, start) = self.seed(start.into())?;
        Ok(Dfs {
            graph: self,
            visited,
            frontier: vec![(start, 0)],
            current_depth: None,
        })
    }

    fn seed(&self, start: Vertex) -> Result<(HashSet<Vertex, RandomState>, Vertex)> {
        if !self.contains_vertex(start.as_str()) {
            return Err(GraphError::UnknownVertex(start));
        }
        let mut visited = HashSet::with_hasher(RandomState::new());
        visited.insert(start.clone());
        Ok((visited, start))
    }
}

impl Bfs<'_> {
    /// Depth of the most recently produced vertex, `None` before the first
    /// advance.
    pub fn current_depth(&self) -> Option<usize> {
        self.current_depth
    }
}

impl Dfs<'_> {
    pub fn current_depth(&self) -> Option<usize> {
        self.current_depth
    }
}

impl Iterator for Bfs<'_> {
    type Item = (Vertex, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (vertex, depth) = self.frontier.pop_front()?;
        for neighbour in self.graph.outbound_of(vertex.as_str()) {
            if !self.visited.contains(neighbour.as_str()) {
                self.visited.insert(neighbour.clone());
                self.frontier.push_back((neighbour.clone(), depth + 1));
            }
        }
        self.current_depth = Some(depth);
        Some((vertex, depth))
    }
}

impl Iterator for Dfs<'_> {
    type Item = (Vertex, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (vertex, depth) = self.frontier.pop()?;
        for neighbour in self.graph.outbound_of(vertex.as_str()) {
            if !self.visited.contains(neighbour.as_str()) {
                self.visited.insert(neighbour.clone());
                self.frontier.push((neighbour.clone(), depth + 1));
            }
        }
        self.current_depth = Some(depth);
        Some((vertex, depth))
    }
}
