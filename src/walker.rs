//! Document discovery: which markdown files under the root get scanned.

use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;
use crate::types::Document;

/// Enumerates markdown documents under a root directory.
/// Each call to `documents` starts a fresh, lazy walk in file-name order.
pub struct Walker<'a> {
    /// Exclusion tables and extension list.
    config: &'a Config,
    /// Whether archived documentation is scanned too.
    include_archived: bool,
    /// Directory to walk.
    root: &'a Path,
}

impl<'a> Walker<'a> {
    /// Create a walker over `root`.
    pub const fn new(root: &'a Path, config: &'a Config, include_archived: bool) -> Self {
        return Self {
            config,
            include_archived,
            root,
        };
    }

    /// Walk the tree and read every document that passes the filters.
    /// Skipped directories are pruned, not descended into.
    ///
    /// Items are `Err` when the walk itself fails or a document cannot be read
    /// as UTF-8. Callers are expected to stop at the first error.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, Error>> + '_ {
        return WalkDir::new(self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| return !self.is_skipped(entry.path()))
            .filter_map(move |entry| return self.accept(entry))
            .map(|candidate| return candidate.and_then(|(path, relative)| return read_document(path, relative)));
    }

    /// Decide whether a walk entry is a document to scan.
    /// A directory we may not list is skipped with a warning; any other walk
    /// error passes through so it reaches the caller.
    fn accept(&self, entry: Result<DirEntry, walkdir::Error>) -> Option<Result<(PathBuf, PathBuf), Error>> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_permission_denied(&e) => {
                let path = e.path().map(|p| return self.relative(p)).unwrap_or_default();
                tracing::warn!(path = %path.display(), "permission denied, skipping");
                return None;
            },
            Err(e) => return Some(Err(Error::Walk(e))),
        };
        let path = entry.path();

        if !path.is_file() || !self.has_markdown_extension(path) {
            return None;
        }

        let relative = self.relative(path);
        if !self.include_archived && self.is_archived(&relative) {
            tracing::debug!(path = %relative.display(), "skipping archived document");
            return None;
        }
        if !self.config.should_scan(&relative.to_string_lossy()) {
            tracing::debug!(path = %relative.display(), "excluded by config");
            return None;
        }

        return Some(Ok((path.to_path_buf(), relative)));
    }

    /// Suffix check against the configured markdown extensions. Compares the
    /// file name, so a file called exactly `.md` counts too.
    fn has_markdown_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        return self.config.extensions.iter().any(|ext| {
            return name
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| return stem.ends_with('.'));
        });
    }

    /// Archived means the relative path has both the docs and archived
    /// components, in any order and at any depth.
    fn is_archived(&self, relative: &Path) -> bool {
        let markers = &self.config.archive_markers;
        return has_component(relative, &markers.docs) && has_component(relative, &markers.archived);
    }

    /// A path is skipped if any component below the root is in the skip set.
    fn is_skipped(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        let skipped = self.config.skip_dirs.iter().any(|dir| return has_component(&relative, dir));
        if skipped {
            tracing::trace!(path = %relative.display(), "pruned");
        }
        return skipped;
    }

    /// Strip the walk root. Only the part under the root is subject to filters.
    fn relative(&self, path: &Path) -> PathBuf {
        return path.strip_prefix(self.root).unwrap_or(path).to_path_buf();
    }
}

/// Whether any normal component of `path` equals `name`.
fn has_component(path: &Path, name: &str) -> bool {
    return path.components().any(|c| return matches!(c, Component::Normal(part) if part == name));
}

/// Whether a walk error is an unreadable directory rather than a broken tree.
fn is_permission_denied(e: &walkdir::Error) -> bool {
    return e
        .io_error()
        .is_some_and(|io| return io.kind() == std::io::ErrorKind::PermissionDenied);
}

/// Read a document once. Invalid UTF-8 is a read failure.
///
/// # Errors
///
/// Returns `Error::ReadFailed` naming the document if reading fails.
fn read_document(path: PathBuf, relative: PathBuf) -> Result<Document, Error> {
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(Error::ReadFailed { path, source }),
    };
    return Ok(Document { path, relative, text });
}
