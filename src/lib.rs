pub mod tree;
pub use tree::{Key, KeyKind, Node, NodeBuilder, NodeData, NodeTag, JoinType};

pub mod schema;
pub use schema::{Schema, SchemaCatalog, SchemaProvider, ColumnType};

pub mod mutation;
pub use mutation::{MutationError, MutationRequest};

pub mod resolver;
pub use resolver::{ContextResolver, NodeContext};

pub mod emitter;
pub use emitter::{EmitError, EmitterConfig, SqlEmitter};

pub mod document;
pub use document::{DocumentConfig, QueryDocument};
