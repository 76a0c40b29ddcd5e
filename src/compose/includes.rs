//! Include inlining

use std::path::{Component, Path, PathBuf};

use log::{debug, trace};

use super::{parse_with, FsLoader, IdSource, RandomIds, Root, SourceLoader};
use crate::ast::{Include, Node, Position};
use crate::error::{Error, Result};

/// State shared across one include resolution
struct IncludeResolver<'a> {
    source_dir: &'a Path,
    loader: &'a dyn SourceLoader,
    ids: &'a mut dyn IdSource,
    /// Files currently being resolved, outermost first
    resolving: Vec<PathBuf>,
}

impl Root {
    /// Inline every include, reading files from disk relative to `source_dir`
    pub fn resolve_includes(&mut self, source_dir: impl AsRef<Path>) -> Result<()> {
        self.resolve_includes_with(source_dir.as_ref(), &FsLoader, &mut RandomIds::new())
    }

    /// Inline every include, reading files through `loader`
    ///
    /// Included files are parsed with ids drawn from `ids`; pass the source
    /// the root itself was parsed with to keep every id unique.
    pub fn resolve_includes_with(
        &mut self,
        source_dir: &Path,
        loader: &dyn SourceLoader,
        ids: &mut dyn IdSource,
    ) -> Result<()> {
        let mut resolver = IncludeResolver {
            source_dir,
            loader,
            ids,
            resolving: Vec::new(),
        };
        resolver.resolve_root(self)
    }
}

impl IncludeResolver<'_> {
    fn resolve_root(&mut self, root: &mut Root) -> Result<()> {
        self.resolve_nodes(&mut root.children, &root.file_name)
    }

    fn resolve_nodes(&mut self, nodes: &mut [Node], file_name: &str) -> Result<()> {
        for node in nodes {
            match node {
                Node::Include(include) => self.resolve_include(include, file_name)?,
                other => {
                    if let Some(children) = other.children_mut() {
                        self.resolve_nodes(children, file_name)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve_include(&mut self, include: &mut Include, file_name: &str) -> Result<()> {
        let target = include.path.value.clone();
        let pos = include
            .path
            .pos
            .clone()
            .or_else(|| include.pos.clone())
            .unwrap_or_else(|| Position::synthetic(file_name));

        if includes_itself(&target, file_name) {
            return Err(self.circular(file_name, &target, pos));
        }

        let path = normalize(&self.source_dir.join(&target));
        if self.is_resolving(&path) {
            return Err(self.circular(file_name, &target, pos));
        }

        let source = self
            .loader
            .load(&path)
            .map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
                pos,
            })?;
        trace!("loaded {} ({} bytes)", path.display(), source.len());

        let mut included = parse_with(&source, &path.display().to_string(), &mut *self.ids)?;

        self.start_resolving(&path);
        let nested = self.resolve_root(&mut included);
        self.done_resolving();
        nested?;

        self.resolve_nodes(&mut include.children, file_name)?;

        debug!(
            "inlined {} into {} (ctx {})",
            path.display(),
            file_name,
            include.ctx_id
        );
        let overrides = std::mem::take(&mut include.children);
        include.children = included.children;
        include.children.extend(overrides);
        Ok(())
    }

    fn is_resolving(&self, path: &Path) -> bool {
        self.resolving.iter().any(|p| p == path)
    }

    fn start_resolving(&mut self, path: &Path) {
        self.resolving.push(path.to_path_buf());
    }

    fn done_resolving(&mut self) {
        self.resolving.pop();
    }

    fn circular(&self, file_name: &str, target: &str, pos: Position) -> Error {
        let mut chain: Vec<String> = self
            .resolving
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        if chain.is_empty() {
            chain.push(file_name.to_string());
        }
        chain.push(target.to_string());
        Error::CircularInclude {
            file: file_name.to_string(),
            path: target.to_string(),
            chain,
            pos,
        }
    }
}

/// An include naming the including file by its own name
///
/// Included roots carry their full resolved path as name, so below the top
/// level this never fires and the resolving chain catches the cycle instead.
fn includes_itself(target: &str, file_name: &str) -> bool {
    Path::new(target)
        .file_name()
        .is_some_and(|base| base == file_name)
}

/// Drop `.` components so the same file always has the same path
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
