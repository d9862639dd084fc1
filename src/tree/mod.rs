//! The RGA tree (§4.2, §4.5): an AST with every ordered child collection
//! replaced by an `Rga`, plus the operations that build, flatten, and
//! converge it.

mod build;
mod merge;
mod node;

pub use build::{to_ast, to_rga_tree};
pub use merge::merge_trees;
pub use node::{RgaTreeNode, RgaTreeParent, tree_node_fingerprint};
