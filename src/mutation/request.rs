use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    mutation::{MutationError, Mutator},
    tree::{JoinType, Key, Node, NodeBuilder, NodeData, NodeTag},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Replace the whole subtree at `path`.
    #[default]
    Replace,
}

/// A single edit sent by whoever renders the tree.
///
/// Every helper below turns an editing gesture into one `Replace` of the
/// target node. `target` is the node as the caller currently sees it and
/// `path` is the key path from the document root down to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    #[serde(rename = "op")]
    pub operation: Operation,
    pub path: Vec<Key>,
    pub replacement: Node,
}

impl MutationRequest {
    pub fn replace(path: Vec<Key>, replacement: Node) -> Self {
        Self { operation: Operation::Replace, path, replacement }
    }

    pub fn add_child(target: &Node, path: Vec<Key>, child: Node, at_front: bool) -> Self {
        Self::replace(path, target.with_child_added(child, at_front))
    }

    pub fn remove_child(target: &Node, path: Vec<Key>, child: &Key) -> Self {
        Self::replace(path, target.with_child_removed(child))
    }

    /// Add an empty `Alias` child to a Column or Table, or drop the one it has.
    pub fn toggle_alias(target: &Node, path: Vec<Key>, builder: &NodeBuilder) -> Self {
        match target.child_of_tag(NodeTag::Alias) {
            Some(alias) => Self::remove_child(target, path, &alias.key),
            None => Self::add_child(target, path, builder.alias(), false),
        }
    }

    pub fn set_alias(alias: &Node, path: Vec<Key>, text: impl Into<String>) -> Self {
        let data = NodeData { alias: Some(text.into()), ..alias.data.clone() };
        Self::replace(path, alias.replace_data(data))
    }

    /// Switch a Var between raw text and column-pick mode. Both the raw text
    /// and the picked column survive the switch.
    pub fn toggle_raw(var: &Node, path: Vec<Key>) -> Self {
        let data = NodeData { is_raw: !var.data.is_raw, ..var.data.clone() };
        Self::replace(path, var.replace_data(data))
    }

    pub fn set_raw_sql(var: &Node, path: Vec<Key>, text: impl Into<String>) -> Self {
        let data = NodeData { raw_sql: Some(text.into()), ..var.data.clone() };
        Self::replace(path, var.replace_data(data))
    }

    /// Pick a column (on a Var) or a table (on a Table); `None` clears it.
    pub fn select_value(target: &Node, path: Vec<Key>, key: Option<Key>) -> Self {
        let data = NodeData { selected_value: key, ..target.data.clone() };
        Self::replace(path, target.replace_data(data))
    }

    pub fn set_join_type(join: &Node, path: Vec<Key>, join_type: JoinType) -> Self {
        let data = NodeData { join_type: Some(join_type), ..join.data.clone() };
        Self::replace(path, join.replace_data(data))
    }

    pub fn apply(self, root: &Node) -> Result<Arc<Node>, MutationError> {
        match self.operation {
            Operation::Replace => Mutator::apply(root, &self.path, self.replacement),
        }
    }
}
