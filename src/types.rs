/// Core domain types for doclinks documents, links, and resolution outcomes.
use std::path::PathBuf;

/// A markdown file yielded by the walker and read exactly once.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path on disk, as produced by walking the root.
    pub path: PathBuf,
    /// Path relative to the walk root. Used in reports.
    pub relative: PathBuf,
    /// Raw UTF-8 text of the file.
    pub text: String,
}

/// One link target pulled out of a document, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// One-based line number of the link in its document.
    pub line: u32,
    /// Target text exactly as captured, before trimming.
    pub target: String,
}

/// A local target that failed to resolve, with enough context to report it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MissingLink {
    /// The path that was checked for existence.
    pub candidate: PathBuf,
    /// Document containing the link, relative to the walk root.
    pub document: PathBuf,
    /// One-based line number of the link in the document.
    pub line: u32,
    /// Link target after trimming whitespace and angle brackets.
    pub target: String,
}

/// Outcome of resolving a local target against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The candidate path exists.
    Found {
        /// Normalized path that was checked.
        candidate: PathBuf,
    },
    /// The candidate path does not exist.
    Missing {
        /// Normalized path that was checked.
        candidate: PathBuf,
    },
    /// Nothing to check; counts as resolved.
    Skipped {
        /// Why the target was not checked.
        reason: SkipReason,
    },
}

/// Reasons a local target is accepted without an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Windows drive-letter path such as `C:\docs\a.md`.
    DriveLetter,
    /// Nothing left once the `#fragment` suffix is removed.
    EmptyPath,
}

/// Whether a target is subject to filesystem resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Anchor, site-absolute path, protocol-relative or scheme URL. Never checked.
    External,
    /// Relative filesystem path. Must exist.
    Local,
}
