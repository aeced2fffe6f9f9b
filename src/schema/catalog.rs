use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    schema::{ColumnInfo, ColumnType, Schema, SchemaProvider, TableInfo},
    tree::Key,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogColumn {
    #[serde(default = "Key::generate")]
    pub id: Key,
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: ColumnType,
    #[serde(default)]
    pub is_pk: bool,
}

impl CatalogColumn {
    pub fn new(name: &str, ty: ColumnType, is_pk: bool) -> Self {
        Self { id: Key::generate(), name: name.to_string(), ty, is_pk }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    #[serde(default = "Key::generate")]
    pub id: Key,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<CatalogColumn>,
}

impl CatalogTable {
    pub fn new(name: &str, columns: Vec<CatalogColumn>) -> Self {
        Self { id: Key::generate(), name: name.to_string(), columns }
    }

    pub fn column(&self, name: &str) -> Option<&CatalogColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Database tables available to every query. Ids missing from a JSON source
/// are filled with fresh keys, stable for the lifetime of the loaded value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<CatalogTable>,
}

impl SchemaCatalog {
    pub fn new(name: &str, tables: Vec<CatalogTable>) -> Self {
        Self { name: name.to_string(), tables }
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn table(&self, name: &str) -> Option<&CatalogTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl From<&SchemaCatalog> for Schema {
    fn from(catalog: &SchemaCatalog) -> Self {
        let from = catalog.tables.iter()
            .map(|t| TableInfo {
                key: t.id.clone(),
                name: t.name.clone(),
                columns: t.columns.iter()
                    .map(|c| ColumnInfo {
                        key: c.id.clone(),
                        from: Some(t.name.clone()),
                        name: c.name.clone(),
                        is_pk: Some(c.is_pk),
                    })
                    .collect(),
            })
            .collect();
        Schema { from }
    }
}

impl SchemaProvider for SchemaCatalog {
    fn schema(&self) -> Schema {
        Schema::from(self)
    }
}
