use std::sync::Arc;

use tracing::trace;

use crate::{mutation::MutationError, tree::{Key, Node}};

/// Copy-on-write, path-addressed subtree replacement. The only way a
/// document changes.
pub struct Mutator;

impl Mutator {
    /// Replace the node addressed by `path` (root key first, target key last)
    /// with `replacement`.
    ///
    /// The replacement is total: whatever `replacement` lacks, children
    /// included, is absent from the result. Nodes on the path are rebuilt;
    /// every other subtree is shared with `root`.
    pub fn apply(root: &Node, path: &[Key], replacement: Node) -> Result<Arc<Node>, MutationError> {
        let (_, tail) = path.split_first().ok_or(MutationError::EmptyPath)?;
        let Some(next) = tail.first() else {
            return Ok(Arc::new(replacement));
        };

        let index = root.children()
            .iter()
            .position(|c| &c.key == next)
            .ok_or_else(|| MutationError::PathNotFound { parent: root.key.clone(), key: next.clone() })?;

        trace!(node = %root.key, child = %next, depth = tail.len(), "descending");
        let updated = Self::apply(&root.children()[index], tail, replacement)?;

        let mut children = root.children().to_vec();
        children[index] = updated;
        Ok(Arc::new(root.replace_children(children)))
    }

    /// Find the node addressed by `path`, reporting the first missing segment.
    pub fn locate<'a>(root: &'a Node, path: &[Key]) -> Result<&'a Node, MutationError> {
        let (_, tail) = path.split_first().ok_or(MutationError::EmptyPath)?;
        let mut current = root;
        for key in tail {
            current = current.child(key)
                .ok_or_else(|| MutationError::PathNotFound { parent: current.key.clone(), key: key.clone() })?
                .as_ref();
        }
        Ok(current)
    }

    pub fn add_child(root: &Node, path: &[Key], child: Node, at_front: bool) -> Result<Arc<Node>, MutationError> {
        let target = Self::locate(root, path)?;
        Self::apply(root, path, target.with_child_added(child, at_front))
    }

    pub fn remove_child(root: &Node, path: &[Key], child: &Key) -> Result<Arc<Node>, MutationError> {
        let target = Self::locate(root, path)?;
        Self::apply(root, path, target.with_child_removed(child))
    }
}
