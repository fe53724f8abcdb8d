/// Crate-level error types for doclinks diagnostics.
use std::path::PathBuf;

/// Fatal errors only. A broken link is a finding, not an error, and never
/// shows up here. Each variant names the file or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.doclinks.toml` exists but could not be read.
    #[error("config unreadable: {}: {source}", path.display())]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// The underlying read failure.
        source: std::io::Error,
    },

    /// Underlying I/O error not tied to a specific document.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the report failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A markdown document could not be read as UTF-8 text.
    #[error("cannot read {}: {source}", path.display())]
    ReadFailed {
        /// Document that failed to read.
        path: PathBuf,
        /// The underlying read failure.
        source: std::io::Error,
    },

    /// One of the link patterns failed to compile.
    #[error("regex: {0}")]
    Regex(
        /// The wrapped regex compilation error.
        #[from]
        regex::Error,
    ),

    /// TOML deserialization of `.doclinks.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Directory traversal failed, e.g. a directory could not be listed.
    #[error("walk: {0}")]
    Walk(
        /// The wrapped walkdir error.
        #[from]
        walkdir::Error,
    ),
}
