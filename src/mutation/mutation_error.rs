use thiserror::Error;

use crate::tree::Key;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("mutation path is empty")]
    EmptyPath,
    #[error("path not found: node {parent} has no child {key}")]
    PathNotFound { parent: Key, key: Key },
}
