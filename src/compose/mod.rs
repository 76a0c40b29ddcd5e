//! Composition resolver
//!
//! A [`Root`] owns the top-level nodes of one parsed document. Composition
//! runs in two passes over it:
//!
//! 1. [`Root::resolve_includes`] loads every included file, parses it and
//!    puts its nodes in front of the include's own `content` blocks.
//! 2. [`Root::match_slots_and_contents`] binds each `content` block to the
//!    same-named `slot` of its include, then unwraps includes and slots so
//!    only their children remain.

mod ids;
mod includes;
mod loader;
mod slots;

use crate::ast::{self, Node};
use crate::error::{Error, Result};
use crate::markup;

pub use ids::{CtxId, IdSource, RandomIds, SequentialIds};
pub use loader::{FsLoader, MemoryLoader, SourceLoader};

/// A parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub children: Vec<Node>,
    pub file_name: String,
}

/// Parse a document, drawing include ids from fresh random ids
pub fn parse(source: &str, file_name: &str) -> Result<Root> {
    parse_with(source, file_name, &mut RandomIds::new())
}

/// Parse a document, drawing include ids from `ids`
pub fn parse_with(source: &str, file_name: &str, ids: &mut dyn IdSource) -> Result<Root> {
    let fragment = markup::parse(source).map_err(|errors| Error::Syntax {
        file: file_name.to_string(),
        errors,
    })?;
    let children = ast::build(&fragment, file_name, ids)?;
    Ok(Root {
        children,
        file_name: file_name.to_string(),
    })
}
