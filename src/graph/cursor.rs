use super::{Graph, Vertex};
use crate::error::{GraphError, Result};

/// Explicit-advance cursor over the outbound neighbours of one vertex.
///
/// The cursor is detached: it holds no reference into the graph, only the
/// target vertex, a position and the stamp the graph had when the cursor was
/// made. Every operation takes the graph again and fails with
/// [`GraphError::ConcurrentModification`] once the graph has been mutated
/// structurally in between.
///
/// Neighbours are enumerated in sorted identifier order, so `current` is
/// deterministic and repeatable at a given position. A vertex that is not in
/// the graph has an empty neighbour set and yields a cursor that is never
/// valid.
pub struct NeighbourCursor(Cursor);

/// Counterpart of [`NeighbourCursor`] for inbound neighbours.
pub struct InboundNeighbourCursor(Cursor);

struct Cursor {
    vertex: Vertex,
    position: usize,
    stamp: u64,
    inbound: bool,
}

impl Graph {
    pub fn neighbours(&self, vertex: impl Into<Vertex>) -> NeighbourCursor {
        NeighbourCursor(Cursor::new(self, vertex.into(), false))
    }

    pub fn inbound_neighbours(&self, vertex: impl Into<Vertex>) -> InboundNeighbourCursor {
        InboundNeighbourCursor(Cursor::new(self, vertex.into(), true))
    }
}

impl NeighbourCursor {
    /// True while the position points at a neighbour.
    pub fn valid(&self, graph: &Graph) -> Result<bool> {
        self.0.valid(graph)
    }

    /// Fails with [`GraphError::ExhaustedIterator`] past the end, never
    /// silently no-ops.
    pub fn advance(&mut self, graph: &Graph) -> Result<()> {
        self.0.advance(graph)
    }

    pub fn current(&self, graph: &Graph) -> Result<Vertex> {
        self.0.current(graph)
    }
}

impl InboundNeighbourCursor {
    pub fn valid(&self, graph: &Graph) -> Result<bool> {
        self.0.valid(graph)
    }

    pub fn advance(&mut self, graph: &Graph) -> Result<()> {
        self.0.advance(graph)
    }

    pub fn current(&self, graph: &Graph) -> Result<Vertex> {
        self.0.current(graph)
    }
}

impl Cursor {
    fn new(graph: &Graph, vertex: Vertex, inbound: bool) -> Self {
        Self {
            vertex,
            position: 0,
            stamp: graph.stamp(),
            inbound,
        }
    }

    fn size(&self, graph: &Graph) -> usize {
        if self.inbound {
            graph.inbound_size(self.vertex.as_str())
        } else {
            graph.outbound_size(self.vertex.as_str())
        }
    }

    fn valid(&self, graph: &Graph) -> Result<bool> {
        if graph.stamp() != self.stamp {
            return Err(GraphError::ConcurrentModification);
        }
        Ok(self.position < self.size(graph))
    }

    fn advance(&mut self, graph: &Graph) -> Result<()> {
        if !self.valid(graph)? {
            return Err(GraphError::ExhaustedIterator);
        }
        self.position += 1;
        Ok(())
    }

    fn current(&self, graph: &Graph) -> Result<Vertex> {
        if !self.valid(graph)? {
            return Err(GraphError::ExhaustedIterator);
        }
        let found = if self.inbound {
            graph.nth_inbound(self.vertex.as_str(), self.position)
        } else {
            graph.nth_outbound(self.vertex.as_str(), self.position)
        };
        found.cloned().ok_or(GraphError::ExhaustedIterator)
    }
}
