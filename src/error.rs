use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Unknown node id {0}: handle does not belong to this forest")]
    UnknownNode(NodeId),
}

pub type Result<T> = std::result::Result<T, TreeError>;
