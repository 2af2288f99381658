use super::{EdgeKey, Vertex, Weight};
use crate::error::{GraphError, Result};
use ahash::RandomState;
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A mutable graph that can switch between directed/undirected and
/// weighted/unweighted modes.
///
/// The vertex list keeps insertion order. Edges live in an ordered map keyed
/// by [`EdgeKey`]; in undirected mode only the canonical orientation of each
/// unordered pair is stored, while the neighbour maps stay symmetric. The
/// neighbour maps are derived state and always reflect exactly the stored
/// edges under the current mode.
///
/// Every structural mutation bumps an internal stamp. Cursors remember the
/// stamp they were created under and refuse to run once it changes, so a
/// stale cursor is a checked error instead of silent misbehaviour.
///
/// Reading a weight through [`Graph::weight`] increments a counter visible
/// via [`Graph::weight_lookups`]. The shortest-path routines report it as a
/// measure of how many edge inspections they spent.
#[derive(Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: BTreeMap<EdgeKey, Weight>,
    outbound: HashMap<Vertex, BTreeSet<Vertex>, RandomState>,
    inbound: HashMap<Vertex, BTreeSet<Vertex>, RandomState>,
    directed: bool,
    weighted: bool,
    weight_lookups: Cell<u64>,
    stamp: u64,
}

impl Graph {
    /// An empty graph in the default mode, undirected and weighted.
    pub fn new() -> Self {
        Self::with_modes(true, false)
    }

    pub fn with_modes(weighted: bool, directed: bool) -> Self {
        Self {
            vertices: Vec::new(),
            edges: BTreeMap::new(),
            outbound: HashMap::with_hasher(RandomState::new()),
            inbound: HashMap::with_hasher(RandomState::new()),
            directed,
            weighted,
            weight_lookups: Cell::new(0),
            stamp: 0,
        }
    }

    /// O(v) because of the duplicate scan.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> Result<()> {
        let vertex = vertex.into();
        if self.vertices.contains(&vertex) {
            return Err(GraphError::DuplicateVertex(vertex));
        }
        self.vertices.push(vertex);
        self.touch();
        Ok(())
    }

    /// Stores the edge and updates both neighbour maps.
    ///
    /// The weight defaults to 1 when left unspecified; in unweighted mode it
    /// is 1 no matter what was passed. In undirected mode the edge is stored
    /// under its canonical orientation and an existing edge in either
    /// orientation counts as a duplicate.
    pub fn add_edge(&mut self, key: impl Into<EdgeKey>, weight: Option<Weight>) -> Result<()> {
        let key = key.into();
        if !self.vertices.contains(&key.tail) {
            return Err(GraphError::UnknownVertex(key.tail));
        }
        if !self.vertices.contains(&key.head) {
            return Err(GraphError::UnknownVertex(key.head));
        }
        let stored = if self.directed { key.clone() } else { key.canonical() };
        if self.edges.contains_key(&stored) {
            return Err(GraphError::DuplicateEdge(key));
        }
        let weight = if self.weighted { weight.unwrap_or(1) } else { 1 };
        self.link_neighbours(&stored);
        self.edges.insert(stored, weight);
        self.touch();
        Ok(())
    }

    /// Removes the vertex, every incident edge and every neighbour-set entry
    /// mentioning it.
    pub fn remove_vertex(&mut self, vertex: impl Into<Vertex>) -> Result<()> {
        let vertex = vertex.into();
        if !self.vertices.contains(&vertex) {
            return Err(GraphError::UnknownVertex(vertex));
        }
        self.vertices.retain(|v| *v != vertex);
        self.edges.retain(|k, _| k.tail != vertex && k.head != vertex);
        self.outbound.remove(vertex.as_str());
        self.inbound.remove(vertex.as_str());
        for set in self.outbound.values_mut() {
            set.remove(vertex.as_str());
        }
        for set in self.inbound.values_mut() {
            set.remove(vertex.as_str());
        }
        self.touch();
        Ok(())
    }

    pub fn remove_edge(&mut self, key: impl Into<EdgeKey>) -> Result<()> {
        let key = key.into();
        let stored = match self.stored_key(&key) {
            Some(stored) => stored,
            None => return Err(GraphError::UnknownEdge(key)),
        };
        self.edges.remove(&stored);
        self.unlink_neighbours(&stored);
        self.touch();
        Ok(())
    }

    /// Fails with [`GraphError::UnweightedGraph`] in unweighted mode. Does
    /// not invalidate cursors: the neighbour sets are untouched.
    pub fn set_weight(&mut self, key: impl Into<EdgeKey>, weight: Weight) -> Result<()> {
        let key = key.into();
        if !self.weighted {
            return Err(GraphError::UnweightedGraph);
        }
        let stored = match self.stored_key(&key) {
            Some(stored) => stored,
            None => return Err(GraphError::UnknownEdge(key)),
        };
        self.edges.insert(stored, weight);
        Ok(())
    }

    /// Looks the weight up in whichever orientation is stored and counts the
    /// lookup.
    pub fn weight(&self, key: impl Into<EdgeKey>) -> Result<Weight> {
        let key = key.into();
        if !self.weighted {
            return Err(GraphError::UnweightedGraph);
        }
        let stored = if self.directed { key.clone() } else { key.canonical() };
        match self.edges.get(&stored) {
            Some(weight) => {
                self.weight_lookups.set(self.weight_lookups.get() + 1);
                Ok(*weight)
            }
            None => Err(GraphError::UnknownEdge(key)),
        }
    }

    /// True iff the edge is stored as given or, in undirected mode, in
    /// either orientation. Never counts as a weight lookup.
    pub fn is_edge(&self, tail: impl Into<Vertex>, head: impl Into<Vertex>) -> bool {
        let key = EdgeKey::from((tail.into(), head.into()));
        self.stored_key(&key).is_some()
    }

    /// Toggles directedness, rewriting storage in bulk.
    ///
    /// Directed to undirected deduplicates each unordered pair down to its
    /// canonical orientation; when both orientations were stored the
    /// canonical one keeps its weight. Undirected to directed materializes
    /// the implicit reverse of every stored edge at the same weight.
    pub fn toggle_directed(&mut self) {
        if self.directed {
            let mut deduped = BTreeMap::new();
            for (key, weight) in std::mem::take(&mut self.edges) {
                deduped.entry(key.canonical()).or_insert(weight);
            }
            self.edges = deduped;
            self.directed = false;
        } else {
            let mut mirrored = std::mem::take(&mut self.edges);
            for (key, weight) in mirrored.clone() {
                if !key.is_loop() {
                    mirrored.entry(key.reversed()).or_insert(weight);
                }
            }
            self.edges = mirrored;
            self.directed = true;
        }
        self.rebuild_neighbours();
        self.touch();
    }

    /// Toggles weightedness. Lossy: switching to unweighted rewrites every
    /// stored weight to 1, switching back to weighted rewrites them to 0.
    pub fn toggle_weighted(&mut self) {
        let sentinel = if self.weighted { 1 } else { 0 };
        for weight in self.edges.values_mut() {
            *weight = sentinel;
        }
        self.weighted = !self.weighted;
        self.touch();
    }

    /// Snapshot of the vertex list in insertion order. Mutating the copy
    /// does not affect the graph.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }

    /// Snapshot of the edge map. Mutating the copy does not affect the
    /// graph.
    pub fn edges(&self) -> BTreeMap<EdgeKey, Weight> {
        self.edges.clone()
    }

    pub fn iter_vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// Stored edges in key order, canonical orientations first.
    pub fn iter_edges(&self) -> impl Iterator<Item = (&EdgeKey, Weight)> + '_ {
        self.edges.iter().map(|(k, w)| (k, *w))
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.iter().any(|v| v.as_str() == id)
    }

    /// Number of outbound neighbours; an absent vertex has zero.
    pub fn neighbour_count(&self, id: &str) -> usize {
        self.outbound_size(id)
    }

    pub fn outbound_size(&self, id: &str) -> usize {
        self.outbound.get(id).map_or(0, |set| set.len())
    }

    pub fn inbound_size(&self, id: &str) -> usize {
        self.inbound.get(id).map_or(0, |set| set.len())
    }

    pub fn vertex_size(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_size(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// How many times [`Graph::weight`] has succeeded since the last reset.
    pub fn weight_lookups(&self) -> u64 {
        self.weight_lookups.get()
    }

    pub fn reset_weight_lookups(&self) {
        self.weight_lookups.set(0);
    }

    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    /// The n-th outbound neighbour in sorted identifier order.
    pub(crate) fn nth_outbound(&self, id: &str, n: usize) -> Option<&Vertex> {
        self.outbound.get(id).and_then(|set| set.iter().nth(n))
    }

    pub(crate) fn nth_inbound(&self, id: &str, n: usize) -> Option<&Vertex> {
        self.inbound.get(id).and_then(|set| set.iter().nth(n))
    }

    /// Outbound neighbours in sorted identifier order, empty for an absent
    /// vertex.
    pub(crate) fn outbound_of(&self, id: &str) -> impl Iterator<Item = &Vertex> + '_ {
        self.outbound.get(id).into_iter().flatten()
    }

    pub(crate) fn inbound_of(&self, id: &str) -> impl Iterator<Item = &Vertex> + '_ {
        self.inbound.get(id).into_iter().flatten()
    }

    fn touch(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }

    /// The orientation under which the given edge is stored, if any.
    fn stored_key(&self, key: &EdgeKey) -> Option<EdgeKey> {
        let candidate = if self.directed { key.clone() } else { key.canonical() };
        if self.edges.contains_key(&candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    fn link_neighbours(&mut self, stored: &EdgeKey) {
        self.outbound
            .entry(stored.tail.clone())
            .or_default()
            .insert(stored.head.clone());
        self.inbound
            .entry(stored.head.clone())
            .or_default()
            .insert(stored.tail.clone());
        if !self.directed {
            self.outbound
                .entry(stored.head.clone())
                .or_default()
                .insert(stored.tail.clone());
            self.inbound
                .entry(stored.tail.clone())
                .or_default()
                .insert(stored.head.clone());
        }
    }

    fn unlink_neighbours(&mut self, stored: &EdgeKey) {
        if let Some(set) = self.outbound.get_mut(stored.tail.as_str()) {
            set.remove(stored.head.as_str());
        }
        if let Some(set) = self.inbound.get_mut(stored.head.as_str()) {
            set.remove(stored.tail.as_str());
        }
        if !self.directed {
            if let Some(set) = self.outbound.get_mut(stored.head.as_str()) {
                set.remove(stored.tail.as_str());
            }
            if let Some(set) = self.inbound.get_mut(stored.tail.as_str()) {
                set.remove(stored.head.as_str());
            }
        }
    }

    fn rebuild_neighbours(&mut self) {
        self.outbound = HashMap::with_hasher(RandomState::new());
        self.inbound = HashMap::with_hasher(RandomState::new());
        let keys: Vec<EdgeKey> = self.edges.keys().cloned().collect();
        for key in &keys {
            self.link_neighbours(key);
        }
    }

    fn is_isolated(&self, vertex: &Vertex) -> bool {
        self.outbound_size(vertex.as_str()) == 0 && self.inbound_size(vertex.as_str()) == 0
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Mode line, then one `tail head weight` line per stored edge, then one
/// line per isolated vertex.
impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.directed { "directed" } else { "undirected" },
            if self.weighted { "weighted" } else { "unweighted" },
        )?;
        for (key, weight) in self.edges.iter() {
            writeln!(f, "{} {} {}", key.tail, key.head, weight)?;
        }
        for vertex in self.vertices.iter().filter(|v| self.is_isolated(v)) {
            writeln!(f, "{}", vertex)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {} graph ({} vertices, {} edges)",
            if self.directed { "directed" } else { "undirected" },
            if self.weighted { "weighted" } else { "unweighted" },
            self.vertex_size(),
            self.edge_size(),
        )?;
        for vertex in self.vertices.iter() {
            writeln!(f, "{}", vertex)?;
            for neighbour in self.outbound_of(vertex.as_str()) {
                writeln!(f, "  --> {}", neighbour)?;
            }
        }
        Ok(())
    }
}
