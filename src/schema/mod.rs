pub mod column_type;
pub use column_type::*;

pub mod column_info;
pub use column_info::*;

pub mod table_info;
pub use table_info::*;

pub mod catalog;
pub use catalog::*;

pub trait SchemaProvider {
    /// The global tables visible to every query for one render cycle.
    fn schema(&self) -> Schema;
}

impl SchemaProvider for Schema {
    fn schema(&self) -> Schema {
        self.clone()
    }
}
