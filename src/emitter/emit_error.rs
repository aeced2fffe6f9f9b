use thiserror::Error;

use crate::tree::{Key, NodeTag};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("Can't get SQL for node type: {tag} key: {key}")]
    UnsupportedNodeKind { tag: NodeTag, key: Key },
}
