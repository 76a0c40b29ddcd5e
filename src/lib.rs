//! Tempile - front end of a markup template compiler
//!
//! This library turns HTML-superset template markup into a validated, typed
//! AST and resolves cross-file composition: `include` inlines another file,
//! and named `content` blocks at the include site fill the included file's
//! named `slot`s.
//!
//! # Example
//!
//! ```rust,ignore
//! use tempile::{compile_file, CompileConfig};
//!
//! let root = compile_file("views/index.html", &CompileConfig::default())?;
//! print!("{}", tempile::ast::dump(&root.children));
//! ```

pub mod ast;
pub mod compose;
pub mod config;
pub mod error;
pub mod markup;

use std::path::Path;

pub use ast::{Node, NodeKind, Position};
pub use compose::{parse, parse_with, FsLoader, IdSource, MemoryLoader, Root, SourceLoader};
pub use config::{CompileConfig, ConfigError, IdStrategy};
pub use error::{Error, Result, SyntaxError};

/// Parse and compose a template with files read from disk
///
/// Includes resolve against `config.source_dir`, or the directory of
/// `file_name` when that is unset.
pub fn compile(source: &str, file_name: &str, config: &CompileConfig) -> Result<Root> {
    compile_with(source, file_name, config, &FsLoader)
}

/// Parse and compose a template, reading included files through `loader`
pub fn compile_with(
    source: &str,
    file_name: &str,
    config: &CompileConfig,
    loader: &dyn SourceLoader,
) -> Result<Root> {
    let mut ids = config.ids.source();
    let mut root = parse_with(source, file_name, ids.as_mut())?;
    if !config.resolve {
        return Ok(root);
    }

    let source_dir = match &config.source_dir {
        Some(dir) => dir.clone(),
        None => Path::new(file_name)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    log::debug!("resolving {} against {}", file_name, source_dir.display());

    root.resolve_includes_with(&source_dir, loader, ids.as_mut())?;
    root.match_slots_and_contents();
    Ok(root)
}

/// Read, parse and compose a template file
pub fn compile_file(path: impl AsRef<Path>, config: &CompileConfig) -> Result<Root> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
        pos: Position::synthetic(file_name.clone()),
    })?;
    compile(&source, &file_name, config)
}
