//! Project configuration: the exclusion, extension and scheme tables, optionally
//! overridden from `.doclinks.toml` in the root.

use std::path::Path;

use crate::error::Error;

/// Config file name, looked up in the walk root.
pub const CONFIG_FILE: &str = ".doclinks.toml";

/// Directory names that exclude any path containing them.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", ".claude", "tmp", "bin", "backups", "node_modules"];

/// File extensions treated as markdown documents.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md"];

/// URI schemes whose targets are external and never resolved.
pub const DEFAULT_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp", "ws", "wss"];

/// Path components that together mark a document as archived.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveMarkers {
    /// Component marking an archive directory, `archived` by default.
    #[serde(default = "default_archived")]
    pub archived: String,
    /// Component marking the documentation root, `docs` by default.
    #[serde(default = "default_docs")]
    pub docs: String,
}

impl Default for ArchiveMarkers {
    fn default() -> Self {
        return Self {
            archived: default_archived(),
            docs: default_docs(),
        };
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Components which, when both present, mark a document as archived.
    pub archive_markers: ArchiveMarkers,
    /// Root-relative path prefixes excluded from scanning.
    pub exclude: Vec<String>,
    /// Markdown file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Root-relative path prefixes to scan. Empty means everything.
    pub include: Vec<String>,
    /// Schemes classified as external.
    pub schemes: Vec<String>,
    /// Directory names pruned from the walk.
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            archive_markers: ArchiveMarkers::default(),
            exclude: Vec::new(),
            extensions: to_owned_table(DEFAULT_EXTENSIONS),
            include: Vec::new(),
            schemes: to_owned_table(DEFAULT_SCHEMES),
            skip_dirs: to_owned_table(DEFAULT_SKIP_DIRS),
        };
    }
}

/// Raw TOML structure for `.doclinks.toml`. Absent keys keep the defaults.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DoclinksTomlConfig {
    /// Override for the archive rule components.
    #[serde(default)]
    archive_markers: Option<ArchiveMarkers>,
    /// Path prefixes to leave out.
    #[serde(default)]
    exclude: Vec<String>,
    /// Replacement extension list.
    extensions: Option<Vec<String>>,
    /// Path prefixes to scan.
    #[serde(default)]
    include: Vec<String>,
    /// Replacement scheme list.
    schemes: Option<Vec<String>>,
    /// Replacement skip set.
    skip_dirs: Option<Vec<String>>,
}

impl Config {
    /// Load config from `.doclinks.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// cannot be read or parsed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigRead` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            },
            Err(source) => return Err(Error::ConfigRead { path, source }),
        };

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        return Ok(config);
    }

    /// Parse config from TOML content, filling gaps with the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the content is not valid TOML or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: DoclinksTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            archive_markers: raw.archive_markers.unwrap_or(defaults.archive_markers),
            exclude: raw.exclude,
            extensions: raw.extensions.unwrap_or(defaults.extensions),
            include: raw.include,
            schemes: raw.schemes.unwrap_or(defaults.schemes),
            skip_dirs: raw.skip_dirs.unwrap_or(defaults.skip_dirs),
        });
    }

    /// Check whether a markdown file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

/// Serde default for `ArchiveMarkers::archived`.
fn default_archived() -> String {
    return "archived".to_string();
}

/// Serde default for `ArchiveMarkers::docs`.
fn default_docs() -> String {
    return "docs".to_string();
}

/// Copy a constant table into owned strings.
fn to_owned_table(table: &[&str]) -> Vec<String> {
    return table.iter().map(|s| return (*s).to_string()).collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.skip_dirs.contains(&"node_modules".to_string()));
        assert_eq!(config.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("schemes = [\"https\"]\n").unwrap();
        assert_eq!(config.schemes, vec!["https".to_string()]);
        assert_eq!(config.skip_dirs, Config::default().skip_dirs);
        assert_eq!(config.archive_markers.docs, "docs");
    }

    #[test]
    fn archive_markers_override() {
        let config = Config::parse("[archive_markers]\ndocs = \"handbook\"\n").unwrap();
        assert_eq!(config.archive_markers.docs, "handbook");
        assert_eq!(config.archive_markers.archived, "archived");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::parse("skip = [\"x\"]\n").unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "skip_dirs = [").unwrap();
        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn include_and_exclude_prefixes() {
        let config = Config::parse("include = [\"docs/\"]\nexclude = [\"docs/drafts/\"]\n").unwrap();
        assert!(config.should_scan("docs/guide.md"));
        assert!(!config.should_scan("docs/drafts/wip.md"));
        assert!(!config.should_scan("README.md"));
    }
}
