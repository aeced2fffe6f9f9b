use std::sync::Arc;

use crate::{
    schema::{AvailableColumns, ColumnInfo, Schema, TableInfo},
    tree::Key,
};

/// What is name-resolvable at one point of the tree.
///
/// Contexts are derived top-down and never stored in the tree; each node gets
/// its parent's context, specialized where the tree introduces new names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeContext {
    /// global tables from the catalog
    pub schema: Arc<Schema>,
    /// CTEs visible inside the current query
    pub local_schema: Arc<Schema>,
    /// columns offered to pickers inside the current select
    pub available_columns: Arc<AvailableColumns>,
}

impl NodeContext {
    pub fn new(schema: Schema) -> Self {
        Self { schema: Arc::new(schema), ..Self::default() }
    }

    pub fn with_local_schema(&self, local_schema: Schema) -> Self {
        Self { local_schema: Arc::new(local_schema), ..self.clone() }
    }

    pub fn with_available_columns(&self, available_columns: AvailableColumns) -> Self {
        Self { available_columns: Arc::new(available_columns), ..self.clone() }
    }

    /// Local tables first, then global ones; this is the table picker order
    /// and the lookup order.
    pub fn visible_tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.local_schema.from.iter().chain(self.schema.from.iter())
    }

    pub fn find_table(&self, key: &Key) -> Option<&TableInfo> {
        self.visible_tables().find(|t| &t.key == key)
    }

    pub fn find_column(&self, key: &Key) -> Option<&ColumnInfo> {
        self.available_columns.find(key)
    }
}
