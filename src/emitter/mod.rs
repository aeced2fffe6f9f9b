pub mod emitter_config;
pub use emitter_config::*;

pub mod emit_error;
pub use emit_error::*;

pub mod sql_emitter;
pub use sql_emitter::*;
