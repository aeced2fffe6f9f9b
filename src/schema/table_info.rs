use serde::{Deserialize, Serialize};

use crate::{schema::ColumnInfo, tree::Key};

/// A table as seen by name resolution: either a catalog table or a CTE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub key: Key,
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// An ordered list of resolvable tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub from: Vec<TableInfo>,
}

impl Schema {
    pub fn new(from: Vec<TableInfo>) -> Self {
        Self { from }
    }

    pub fn find(&self, key: &Key) -> Option<&TableInfo> {
        self.from.iter().find(|t| &t.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }
}

/// Columns a column picker may offer inside a select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableColumns {
    pub columns: Vec<ColumnInfo>,
}

impl AvailableColumns {
    pub fn find(&self, key: &Key) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| &c.key == key)
    }
}
