//! A graph that can switch between directed/undirected and
//! weighted/unweighted modes, with checked neighbour cursors, BFS/DFS
//! iterators, and the classic algorithms on top: Kruskal, Dijkstra, A*,
//! isomorphism-driven reduction, and binary-tree reconstruction.
//!
//! [`graph::Graph`] is the central type; [`io`] reads and writes its
//! edge-list format; [`algorithm`] operates on it.
pub mod algorithm;
pub mod error;
pub mod graph;
pub mod io;

pub use self::error::{GraphError, Result};
