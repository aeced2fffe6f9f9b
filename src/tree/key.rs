use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::tree::KeyGenerator;

/// Stable identity of a node or of a catalog entry.
///
/// Keys are cheap to clone and compare. A table picked in a `Table` node and a
/// column picked in a `Var` node are stored as the `Key` of the catalog entry
/// (or of the CTE / Column node that synthesizes it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Arc<str>);

impl Key {
    /// Allocate a fresh process-unique key using the default strategy.
    pub fn generate() -> Self {
        KeyGenerator::default().next_key()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}
