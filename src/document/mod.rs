pub mod document_config;
pub use document_config::*;

pub mod query_document;
pub use query_document::*;
