use crate::error::{GraphError, Result};
use crate::graph::{Graph, Vertex, Weight};
use crate::io::CoordinateTable;
use ahash::RandomState;
use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What a shortest-path search discovered.
///
/// `distances` holds the cost of the best known walk per reached vertex;
/// a vertex that was never reached is simply absent, there is no infinity
/// sentinel. `parents` records the predecessor each reached vertex was
/// discovered through. `pushes` and `pops` count priority-queue traffic and
/// are reported for comparing algorithms, not as a contract; pair them with
/// [`Graph::weight_lookups`] to see how much edge inspection a search cost.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub source: Vertex,
    pub parents: HashMap<Vertex, Vertex, RandomState>,
    pub distances: HashMap<Vertex, Weight, RandomState>,
    pub pushes: u64,
    pub pops: u64,
}

impl SearchOutcome {
    fn new(source: Vertex) -> Self {
        let mut distances = HashMap::with_hasher(RandomState::new());
        distances.insert(source.clone(), 0);
        Self {
            source,
            parents: HashMap::with_hasher(RandomState::new()),
            distances,
            pushes: 0,
            pops: 0,
        }
    }

    /// Cost of the best walk found to the vertex, `None` when unreached.
    pub fn distance(&self, vertex: &str) -> Option<Weight> {
        self.distances.get(vertex).copied()
    }

    /// The walk from the source to `goal`, both inclusive, rebuilt from the
    /// parent records. Empty when the parent chain does not lead back to
    /// the source, which is how an unreached goal shows up.
    pub fn path_to(&self, goal: &str) -> Vec<Vertex> {
        let mut current = Vertex::from(goal);
        let mut path = vec![current.clone()];
        while let Some(parent) = self.parents.get(current.as_str()) {
            path.push(parent.clone());
            current = parent.clone();
        }
        if current == self.source {
            path.reverse();
            path
        } else {
            Vec::new()
        }
    }
}

/// Dijkstra's algorithm over the outbound-neighbour relation.
///
/// Edge costs are read through [`Graph::weight`], so the graph's lookup
/// counter measures the search and an unweighted graph fails the search
/// with [`GraphError::UnweightedGraph`] at the first inspected edge.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_size(), edges = graph.edge_size()))]
pub fn dijkstra(graph: &Graph, source: impl Into<Vertex>) -> Result<SearchOutcome> {
    let source = source.into();
    if !graph.contains_vertex(source.as_str()) {
        return Err(GraphError::UnknownVertex(source));
    }
    debug!(source = %source, "dijkstra");

    let mut outcome = SearchOutcome::new(source.clone());
    let mut visited: HashSet<Vertex, RandomState> = HashSet::with_hasher(RandomState::new());
    let mut queue: KeyedPriorityQueue<Vertex, Reverse<Weight>, RandomState> =
        KeyedPriorityQueue::with_capacity_and_hasher(graph.vertex_size(), RandomState::new());
    queue.push(source, Reverse(0));

    while let Some((current, _)) = queue.pop() {
        outcome.pops += 1;
        if !visited.insert(current.clone()) {
            continue;
        }
        let travelled = outcome.distances[&current];
        for neighbour in graph.outbound_of(current.as_str()) {
            let relaxed = travelled + graph.weight((current.clone(), neighbour.clone()))?;
            let improves = outcome
                .distances
                .get(neighbour.as_str())
                .map_or(true, |best| relaxed < *best);
            if !visited.contains(neighbour.as_str()) && improves {
                if queue.set_priority(neighbour, Reverse(relaxed)).is_err() {
                    queue.push(neighbour.clone(), Reverse(relaxed));
                }
                outcome.pushes += 1;
                outcome.parents.insert(neighbour.clone(), current.clone());
                outcome.distances.insert(neighbour.clone(), relaxed);
            }
        }
    }
    Ok(outcome)
}

/// A* search towards `goal`, guided by the straight-line distance between
/// vertex coordinates.
///
/// Returns the moment the goal comes off the queue; that final pop is
/// counted. Vertices beyond the goal are left untouched, which is the
/// point of the heuristic. Every vertex the search meets must be present
/// in the coordinate table.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_size(), edges = graph.edge_size()))]
pub fn a_star(
    graph: &Graph,
    source: impl Into<Vertex>,
    goal: impl Into<Vertex>,
    coordinates: &CoordinateTable,
) -> Result<SearchOutcome> {
    let source = source.into();
    let goal = goal.into();
    if !graph.contains_vertex(source.as_str()) {
        return Err(GraphError::UnknownVertex(source));
    }
    if !graph.contains_vertex(goal.as_str()) {
        return Err(GraphError::UnknownVertex(goal));
    }
    debug!(source = %source, goal = %goal, "a_star");

    let (goal_x, goal_y) = coordinates.get(&goal)?;
    let remaining = |vertex: &Vertex| -> Result<f64> {
        let (x, y) = coordinates.get(vertex)?;
        Ok(((x - goal_x).powi(2) + (y - goal_y).powi(2)).sqrt())
    };

    let mut outcome = SearchOutcome::new(source.clone());
    let mut queue: KeyedPriorityQueue<Vertex, Reverse<FCost>, RandomState> =
        KeyedPriorityQueue::with_capacity_and_hasher(graph.vertex_size(), RandomState::new());
    let seed = FCost(remaining(&source)?);
    queue.push(source, Reverse(seed));

    while let Some((current, _)) = queue.pop() {
        outcome.pops += 1;
        if current == goal {
            return Ok(outcome);
        }
        let travelled = outcome.distances[&current];
        for neighbour in graph.outbound_of(current.as_str()) {
            let relaxed = travelled + graph.weight((current.clone(), neighbour.clone()))?;
            let improves = outcome
                .distances
                .get(neighbour.as_str())
                .map_or(true, |best| relaxed < *best);
            if improves {
                outcome.parents.insert(neighbour.clone(), current.clone());
                outcome.distances.insert(neighbour.clone(), relaxed);
                let estimate = FCost(relaxed as f64 + remaining(neighbour)?);
                if queue.set_priority(neighbour, Reverse(estimate)).is_err() {
                    queue.push(neighbour.clone(), Reverse(estimate));
                }
                outcome.pushes += 1;
            }
        }
    }
    Ok(outcome)
}

/// f-score of a frontier entry: path cost so far plus the heuristic. Wraps
/// the float with a total order so it can key the priority queue; the
/// inputs are finite, so the fallback ordering never actually decides.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FCost(f64);

impl Eq for FCost {}

impl PartialOrd for FCost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FCost {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}
