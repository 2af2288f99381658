//! Reading and writing the on-disk graph formats: the edge-list form a
//! graph serializes to, and the vertex-coordinate CSV the A* heuristic
//! consumes.

pub mod coordinates;
pub mod edge_list;

pub use self::coordinates::CoordinateTable;
