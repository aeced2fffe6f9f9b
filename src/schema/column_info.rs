use serde::{Deserialize, Serialize};

use crate::tree::Key;

/// A column as seen by name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub key: Key,
    /// table name or alias the column is qualified with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pk: Option<bool>,
}

impl ColumnInfo {
    pub fn new(key: Key, name: impl Into<String>) -> Self {
        Self { key, from: None, name: name.into(), is_pk: None }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// `from.name` when qualified, otherwise the bare name.
    pub fn label(&self) -> String {
        match &self.from {
            Some(from) => format!("{from}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
