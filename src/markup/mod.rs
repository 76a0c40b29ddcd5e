//! Raw markup parsing: the untyped tree the AST builder works from

mod grammar;
mod implied;
pub mod lexer;
pub mod raw;

pub use grammar::parse;
pub use raw::*;
