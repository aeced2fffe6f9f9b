use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tree::{Key, NodeData, NodeTag};

/// One element of a query document.
///
/// Children are held behind `Arc` so that a mutation can rebuild the nodes on
/// its path and share every other subtree with the previous tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: Key,
    #[serde(rename = "type")]
    pub tag: NodeTag,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Arc<Node>>>,
}

impl Node {
    /// A leaf node with an empty payload.
    pub fn new(key: Key, tag: NodeTag) -> Self {
        Self { key, tag, data: NodeData::default(), children: None }
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    /// Same key, tag and payload, with `children` swapped in.
    pub fn replace_children(&self, children: Vec<Arc<Node>>) -> Node {
        Node {
            key: self.key.clone(),
            tag: self.tag,
            data: self.data.clone(),
            children: Some(children),
        }
    }

    /// Same key, tag and children, with `data` swapped in.
    pub fn replace_data(&self, data: NodeData) -> Node {
        Node {
            key: self.key.clone(),
            tag: self.tag,
            data,
            children: self.children.clone(),
        }
    }

    /// Direct children; empty for leaf kinds.
    pub fn children(&self) -> &[Arc<Node>] {
        self.children.as_deref().unwrap_or_default()
    }

    /// First direct child carrying `tag`.
    pub fn child_of_tag(&self, tag: NodeTag) -> Option<&Arc<Node>> {
        self.children().iter().find(|c| c.tag == tag)
    }

    /// Every direct child carrying `tag`, in document order.
    pub fn children_of_tag(&self, tag: NodeTag) -> Vec<&Arc<Node>> {
        self.children().iter().filter(|c| c.tag == tag).collect()
    }

    pub fn child(&self, key: &Key) -> Option<&Arc<Node>> {
        self.children().iter().find(|c| &c.key == key)
    }

    /// Text of the `Alias` child, or `""` when there is none.
    pub fn alias_text(&self) -> &str {
        self.child_of_tag(NodeTag::Alias)
            .and_then(|a| a.data.alias())
            .unwrap_or_default()
    }

    pub fn with_child_added(&self, child: Node, at_front: bool) -> Node {
        let child = Arc::new(child);
        let mut children = Vec::with_capacity(self.children().len() + 1);
        if at_front {
            children.push(child);
            children.extend(self.children().iter().cloned());
        } else {
            children.extend(self.children().iter().cloned());
            children.push(child);
        }
        self.replace_children(children)
    }

    pub fn with_child_removed(&self, key: &Key) -> Node {
        let children = self.children()
            .iter()
            .filter(|c| &c.key != key)
            .cloned()
            .collect();
        self.replace_children(children)
    }

    /// Follow `path` (which starts with this node's own key) one shallow
    /// lookup at a time.
    pub fn node_at(&self, path: &[Key]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        if first != &self.key {
            return None;
        }
        let mut current = self;
        for key in rest {
            current = current.child(key)?.as_ref();
        }
        Some(current)
    }

    /// Key path from this node down to the descendant `key`, both ends included.
    pub fn path_to(&self, key: &Key) -> Option<Vec<Key>> {
        if &self.key == key {
            return Some(vec![self.key.clone()]);
        }
        self.children().iter().find_map(|child| {
            child.path_to(key).map(|mut path| {
                path.insert(0, self.key.clone());
                path
            })
        })
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
