//! Result tree and traversal engine
//!
//! The traversal turns a possibly-cyclic memory graph into a tree by
//! recording at most one node per address; the tree arena keeps nodes in
//! discovery order and ready for pre-order rendering.

pub mod traversal;
pub mod tree;

pub use traversal::Traversal;
pub use tree::{NodeId, ResultNode, ResultTree};
