use thiserror::Error;

use crate::tree::Key;

/// A pick that points at something no longer in scope, e.g. a column of a
/// table that has since been swapped out. Rendering degrades to the
/// placeholder; this only reports it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedReference {
    #[error("table node {node} references unknown table {key}")]
    Table { node: Key, key: Key },
    #[error("var node {node} references unknown column {key}")]
    Column { node: Key, key: Key },
}
