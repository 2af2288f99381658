use crate::error::{GraphError, Result};
use crate::graph::{Graph, Vertex, Weight};
use ahash::RandomState;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Builds a minimum spanning tree with Kruskal's algorithm.
///
/// Edges are taken in ascending `(weight, key)` order, so ties resolve the
/// same way on every run. The result is a fresh graph in the default mode
/// holding every vertex of the input and exactly the selected edges at
/// their stored weights. Weights are read straight from the edge map, not
/// through [`Graph::weight`], so the lookup counter is unaffected.
///
/// Fails with [`GraphError::DisconnectedGraph`] when the edges run out
/// before the tree spans all vertices.
#[tracing::instrument(skip(graph), fields(vertices = graph.vertex_size(), edges = graph.edge_size()))]
pub fn kruskal(graph: &Graph) -> Result<Graph> {
    let vertices = graph.vertices();
    let index: HashMap<&Vertex, usize, RandomState> = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();

    let mut ranked: Vec<(Weight, _)> = graph.iter_edges().map(|(k, w)| (w, k.clone())).collect();
    ranked.sort();

    let mut tree = Graph::new();
    for vertex in &vertices {
        tree.add_vertex(vertex.clone())?;
    }

    let wanted = vertices.len().saturating_sub(1);
    let mut sets = DisjointSets::new(vertices.len());
    let mut chosen = 0;
    for (weight, key) in ranked {
        if chosen == wanted {
            break;
        }
        if sets.union(index[&key.tail], index[&key.head]) {
            tree.add_edge(key, Some(weight))?;
            chosen += 1;
        }
    }
    if chosen < wanted {
        return Err(GraphError::DisconnectedGraph);
    }
    debug!(edges = chosen, "spanning tree complete");
    Ok(tree)
}

/// Height of a tree counted in levels, the root alone being 1.
///
/// Walks the tree breadth-first through the neighbour-cursor protocol and
/// fails with [`GraphError::UnknownVertex`] for an absent root.
pub fn tree_height(tree: &Graph, root: impl Into<Vertex>) -> Result<usize> {
    let root = root.into();
    if !tree.contains_vertex(root.as_str()) {
        return Err(GraphError::UnknownVertex(root));
    }

    let mut visited: HashSet<Vertex, RandomState> = HashSet::with_hasher(RandomState::new());
    visited.insert(root.clone());
    let mut queue = VecDeque::from(vec![(root, 1)]);
    let mut height = 1;

    while let Some((vertex, level)) = queue.pop_front() {
        height = height.max(level);
        let mut neighbours = tree.neighbours(vertex);
        while neighbours.valid(tree)? {
            let neighbour = neighbours.current(tree)?;
            if !visited.contains(neighbour.as_str()) {
                visited.insert(neighbour.clone());
                queue.push_back((neighbour, level + 1));
            }
            neighbours.advance(tree)?;
        }
    }
    Ok(height)
}

/// Union-find over vertex indexes, with path compression and union by
/// rank.
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = item;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    /// Merges the two sets; false when they already were one.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}
