pub mod key;
pub use key::*;

pub mod key_generator;
pub use key_generator::*;

pub mod node_tag;
pub use node_tag::*;

pub mod join_type;
pub use join_type::*;

pub mod node_data;
pub use node_data::*;

pub mod node;
pub use node::*;

pub mod builder;
pub use builder::*;

pub mod shape;
pub use shape::*;
