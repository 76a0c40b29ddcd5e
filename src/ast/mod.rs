//! Typed template AST and its builder

pub mod attribute;
pub mod builder;
pub mod dump;
pub mod node;
pub mod position;

pub use attribute::{parse_interpolations, split_directive_attributes, Attribute, ValueFragment};
pub use builder::{build, AstBuilder, Parent};
pub use dump::dump;
pub use node::*;
pub use position::Position;
