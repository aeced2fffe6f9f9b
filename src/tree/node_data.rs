use serde::{Deserialize, Serialize};

use crate::tree::{JoinType, Key};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Tag-specific payload carried by a [`Node`](crate::tree::Node).
///
/// Every field is optional; which ones are meaningful depends on the tag:
///
/// - `Alias`: `alias`
/// - `Var`: `is_raw` + `raw_sql`, or `selected_value` (a column key)
/// - `Table`: `selected_value` (a table key)
/// - `Join`: `join_type`
/// - `SourceTable`: `alias` (table name) + `columns`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_raw: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_value: Option<Key>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub join_type: Option<JoinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl NodeData {
    /// Alias text, treating an empty string as unset.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.is_empty())
    }

    /// Picked table or column key, treating an empty key as nothing picked.
    pub fn selected(&self) -> Option<&Key> {
        self.selected_value.as_ref().filter(|k| !k.as_str().is_empty())
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_raw_sql(mut self, raw_sql: impl Into<String>) -> Self {
        self.is_raw = true;
        self.raw_sql = Some(raw_sql.into());
        self
    }

    pub fn with_selected(mut self, key: Key) -> Self {
        self.selected_value = Some(key);
        self
    }

    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = Some(join_type);
        self
    }
}
