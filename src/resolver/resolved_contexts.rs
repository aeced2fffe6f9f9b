use indexmap::IndexMap;

use crate::{resolver::NodeContext, tree::Key};

/// Per-node contexts of a whole tree, in pre-order document order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedContexts {
    pub contexts: IndexMap<Key, NodeContext>,
}

impl ResolvedContexts {
    pub fn get(&self, key: &Key) -> Option<&NodeContext> {
        self.contexts.get(key)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &NodeContext)> {
        self.contexts.iter()
    }
}
