pub mod node_context;
pub use node_context::*;

pub mod resolved_contexts;
pub use resolved_contexts::*;

pub mod unresolved_reference;
pub use unresolved_reference::*;

pub mod context_resolver;
pub use context_resolver::*;
