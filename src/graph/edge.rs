use super::Vertex;

/// Edge weights.
///
/// Unweighted graphs store every edge with weight `1`; switching a graph to
/// unweighted mode rewrites all stored weights to `1` and is lossy.
pub type Weight = i64;

/// An edge named by its endpoints.
///
/// In a directed graph the key reads tail to head. In an undirected graph
/// edges are stored under their canonical orientation, `tail <= head` by
/// vertex order, and looked up under both.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub tail: Vertex,
    pub head: Vertex,
}

impl EdgeKey {
    pub fn new(tail: impl Into<Vertex>, head: impl Into<Vertex>) -> Self {
        Self { tail: tail.into(), head: head.into() }
    }

    /// The orientation with the smaller endpoint first.
    pub fn canonical(&self) -> Self {
        if self.tail <= self.head {
            self.clone()
        } else {
            self.reversed()
        }
    }

    pub fn reversed(&self) -> Self {
        Self { tail: self.head.clone(), head: self.tail.clone() }
    }

    pub fn is_loop(&self) -> bool {
        self.tail == self.head
    }
}

impl From<(Vertex, Vertex)> for EdgeKey {
    fn from((tail, head): (Vertex, Vertex)) -> Self {
        Self { tail, head }
    }
}

impl From<(&str, &str)> for EdgeKey {
    fn from((tail, head): (&str, &str)) -> Self {
        Self { tail: tail.into(), head: head.into() }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.tail, self.head)
    }
}
