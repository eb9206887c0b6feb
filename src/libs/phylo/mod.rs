pub mod build;
pub mod node;
pub mod tree;
pub mod writer;

pub use node::{Node, NodeId};
pub use tree::Tree;
