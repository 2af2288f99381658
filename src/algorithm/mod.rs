//! Graph algorithms
mod kruskal;
pub use self::kruskal::*;
mod reduction;
pub use self::reduction::*;
mod shortest_path;
pub use self::shortest_path::*;
mod tree_reconstruction;
pub use self::tree_reconstruction::*;
