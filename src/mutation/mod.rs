pub mod mutation_error;
pub use mutation_error::*;

pub mod mutator;
pub use mutator::*;

pub mod request;
pub use request::*;
