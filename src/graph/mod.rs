//! The mode-switching graph and its iteration protocol.
//!
//! # Modes
//!
//! A [`Graph`] starts undirected and weighted and can toggle either flag at
//! any time. Toggling rewrites storage in bulk: dropping directedness
//! deduplicates the two orientations of each pair down to one canonical
//! edge, gaining it materializes the reverse of every stored edge, and the
//! weighted toggle is deliberately lossy in both directions.
//!
//! # Iteration
//!
//! Neighbour enumeration comes in two shapes. [`NeighbourCursor`] and
//! [`InboundNeighbourCursor`] follow an explicit `valid`/`advance`/`current`
//! protocol and re-check the graph's mutation stamp on every call, so using
//! a cursor across a structural change is a checked error. [`Bfs`] and
//! [`Dfs`] are ordinary lazy iterators over `(vertex, depth)` pairs; they
//! borrow the graph instead, which rules the same misuse out at compile
//! time.

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod adjacency;
pub use self::adjacency::*;
mod cursor;
pub use self::cursor::*;
mod traversal;
pub use self::traversal::*;

#[cfg(test)]
pub use self::tests::*;
