pub mod error;
pub mod node;
pub mod traversal;
pub mod tree;
pub mod utils;

pub use error::{Result, TreeError};
pub use node::{Node, NodeId};
pub use tree::Forest;
