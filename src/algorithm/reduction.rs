use crate::error::Result;
use crate::graph::{EdgeKey, Graph, Vertex};
use std::collections::BTreeSet;
use tracing::debug;

/// One step taken by [`reduce_towards`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// A degree-2 vertex was removed and its neighbours bridged.
    Smoothed { removed: Vertex, bridged: EdgeKey },
    /// An edge was split by inserting a degree-2 vertex on it.
    Subdivided { inserted: Vertex, split: EdgeKey },
}

/// Whether the two graphs have the same vertices and the same connections.
///
/// Edge orientation and weights are ignored: every edge is compared in its
/// canonical form, so a directed pair `(a, b)`/`(b, a)` and a single
/// undirected edge count as the same connection.
pub fn same_shape(graph: &Graph, target: &Graph) -> bool {
    let ours: BTreeSet<Vertex> = graph.vertices().into_iter().collect();
    let theirs: BTreeSet<Vertex> = target.vertices().into_iter().collect();
    if ours != theirs {
        return false;
    }
    let our_edges: BTreeSet<EdgeKey> = graph.iter_edges().map(|(k, _)| k.canonical()).collect();
    let their_edges: BTreeSet<EdgeKey> = target.iter_edges().map(|(k, _)| k.canonical()).collect();
    our_edges == their_edges
}

/// Rewrites `graph` towards the shape of `target` by degree-2 smoothing
/// and subdivision, the two moves that preserve homeomorphism.
///
/// First every degree-2 vertex the target does not have is removed and its
/// neighbours are bridged; then every degree-2 vertex the target has on an
/// edge of `graph` is inserted by splitting that edge. Both phases are
/// best-effort: a vertex whose situation does not match the move (its
/// degree changed, the bridge edge already exists, the edge to split is
/// missing) is skipped, not an error. Meant for undirected graphs; bridged
/// and inserted edges take the default weight.
///
/// Returns the applied rewrites. `graph` and `target` have the same shape
/// afterwards exactly when they were homeomorphic up to these moves.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_size(), target_vertices = target.vertex_size()))]
pub fn reduce_towards(graph: &mut Graph, target: &Graph) -> Result<Vec<Rewrite>> {
    let mut rewrites = Vec::new();

    for vertex in degree_two(graph) {
        if target.contains_vertex(vertex.as_str()) {
            continue;
        }
        // earlier rewrites may have changed this vertex's degree
        let (left, right) = match neighbour_pair(graph, &vertex)? {
            Some(pair) => pair,
            None => continue,
        };
        if graph.is_edge(left.clone(), right.clone()) {
            continue;
        }
        let bridged = EdgeKey::from((left, right));
        graph.add_edge(bridged.clone(), None)?;
        graph.remove_vertex(vertex.clone())?;
        debug!(removed = %vertex, bridged = %bridged, "smoothed");
        rewrites.push(Rewrite::Smoothed {
            removed: vertex,
            bridged,
        });
    }

    for vertex in degree_two(target) {
        if graph.contains_vertex(vertex.as_str()) {
            continue;
        }
        let (left, right) = match neighbour_pair(target, &vertex)? {
            Some(pair) => pair,
            None => continue,
        };
        if !graph.is_edge(left.clone(), right.clone()) {
            continue;
        }
        graph.remove_edge((left.clone(), right.clone()))?;
        graph.add_vertex(vertex.clone())?;
        graph.add_edge((vertex.clone(), left.clone()), None)?;
        graph.add_edge((vertex.clone(), right.clone()), None)?;
        let split = EdgeKey::from((left, right));
        debug!(inserted = %vertex, split = %split, "subdivided");
        rewrites.push(Rewrite::Subdivided {
            inserted: vertex,
            split,
        });
    }

    Ok(rewrites)
}

fn degree_two(graph: &Graph) -> Vec<Vertex> {
    graph
        .iter_vertices()
        .filter(|v| graph.neighbour_count(v.as_str()) == 2)
        .cloned()
        .collect()
}

/// The two neighbours of a degree-2 vertex, read through the cursor
/// protocol; `None` when the degree is not 2.
fn neighbour_pair(graph: &Graph, vertex: &Vertex) -> Result<Option<(Vertex, Vertex)>> {
    if graph.neighbour_count(vertex.as_str()) != 2 {
        return Ok(None);
    }
    let mut cursor = graph.neighbours(vertex.clone());
    let first = cursor.current(graph)?;
    cursor.advance(graph)?;
    let second = cursor.current(graph)?;
    Ok(Some((first, second)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(vertices: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for v in vertices {
            g.add_vertex(*v).unwrap();
        }
        for (a, b) in edges {
            g.add_edge((*a, *b), None).unwrap();
        }
        g
    }

    #[test]
    fn shape_ignores_orientation_and_weights() {
        let mut left = Graph::with_modes(true, true);
        left.add_vertex("a").unwrap();
        left.add_vertex("b").unwrap();
        left.add_edge(("b", "a"), Some(9)).unwrap();

        let right = graph_of(&["a", "b"], &[("a", "b")]);
        assert!(same_shape(&left, &right));

        let other = graph_of(&["a", "b", "c"], &[("a", "b")]);
        assert!(!same_shape(&left, &other));
        assert!(!same_shape(&right, &graph_of(&["a", "b"], &[])));
    }

    #[test]
    fn smoothing_removes_a_pass_through_vertex() {
        let mut g = graph_of(&["a", "v", "b"], &[("a", "v"), ("v", "b")]);
        let target = graph_of(&["a", "b"], &[("a", "b")]);
        let rewrites = reduce_towards(&mut g, &target).unwrap();
        assert!(same_shape(&g, &target));
        assert_eq!(
            rewrites,
            vec![Rewrite::Smoothed {
                removed: Vertex::from("v"),
                bridged: EdgeKey::from(("a", "b")),
            }]
        );
    }

    #[test]
    fn smoothing_walks_down_a_chain() {
        let mut g = graph_of(
            &["a", "x", "y", "b"],
            &[("a", "x"), ("x", "y"), ("y", "b")],
        );
        let target = graph_of(&["a", "b"], &[("a", "b")]);
        let rewrites = reduce_towards(&mut g, &target).unwrap();
        assert!(same_shape(&g, &target));
        assert_eq!(rewrites.len(), 2);
    }

    #[test]
    fn a_triangle_vertex_is_not_smoothed() {
        let mut g = graph_of(
            &["a", "v", "b"],
            &[("a", "v"), ("v", "b"), ("a", "b")],
        );
        let target = graph_of(&["a", "b"], &[("a", "b")]);
        let before = g.to_string();
        let rewrites = reduce_towards(&mut g, &target).unwrap();
        assert!(rewrites.is_empty());
        assert_eq!(g.to_string(), before);
        assert!(!same_shape(&g, &target));
    }

    #[test]
    fn subdivision_inserts_the_missing_vertex() {
        let mut g = graph_of(&["a", "b"], &[("a", "b")]);
        let target = graph_of(&["a", "v", "b"], &[("a", "v"), ("v", "b")]);
        let rewrites = reduce_towards(&mut g, &target).unwrap();
        assert!(same_shape(&g, &target));
        assert!(!g.is_edge("a", "b"));
        assert_eq!(
            rewrites,
            vec![Rewrite::Subdivided {
                inserted: Vertex::from("v"),
                split: EdgeKey::from(("a", "b")),
            }]
        );
    }

    #[test]
    fn both_phases_combine() {
        // u has to go, w has to appear
        let mut g = graph_of(&["a", "u", "b", "c"], &[("a", "u"), ("u", "b"), ("b", "c")]);
        let target = graph_of(&["a", "b", "w", "c"], &[("a", "b"), ("b", "w"), ("w", "c")]);
        reduce_towards(&mut g, &target).unwrap();
        assert!(same_shape(&g, &target));
    }

    #[test]
    fn already_matching_graphs_need_no_rewrites() {
        let mut g = graph_of(&["a", "b"], &[("a", "b")]);
        let target = graph_of(&["a", "b"], &[("a", "b")]);
        let rewrites = reduce_towards(&mut g, &target).unwrap();
        assert!(rewrites.is_empty());
        assert!(same_shape(&g, &target));
    }
}
