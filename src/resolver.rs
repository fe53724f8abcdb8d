//! Filesystem resolution of local link targets.

use std::path::{Component, Path, PathBuf};

use crate::types::{Resolution, SkipReason};

/// Resolve a local target against the directory of the document that contains it.
/// The `#fragment` suffix is ignored; only the path before the first `#` is checked.
/// The joined path is tried as-is, then with `.` and `..` collapsed lexically.
pub fn resolve(document: &Path, target: &str) -> Resolution {
    let path_part = target.split_once('#').map_or(target, |(path, _)| return path);

    if path_part.is_empty() {
        return Resolution::Skipped {
            reason: SkipReason::EmptyPath,
        };
    }
    if is_windows_drive_path(path_part) {
        return Resolution::Skipped {
            reason: SkipReason::DriveLetter,
        };
    }

    let base = document.parent().unwrap_or_else(|| return Path::new(""));
    let joined = base.join(path_part);

    // Let the OS walk `..` first so it follows symlinked directories.
    if joined.exists() {
        let candidate = std::fs::canonicalize(&joined).unwrap_or_else(|_| return joined);
        return Resolution::Found { candidate };
    }

    // `gone/../x.md` fails at the OS but names an existing file once collapsed.
    let candidate = normalize_path(&joined);
    if candidate.exists() {
        return Resolution::Found { candidate };
    }
    tracing::debug!(document = %document.display(), link = target, candidate = %candidate.display(), "missing");
    return Resolution::Missing { candidate };
}

/// `C:\...`: one ASCII letter, a colon, a backslash.
fn is_windows_drive_path(path: &str) -> bool {
    let mut chars = path.chars();
    return chars.next().is_some_and(|c| return c.is_ascii_alphabetic())
        && chars.next() == Some(':')
        && chars.next() == Some('\\');
}

/// Collapse `.` and `..` components in a path without touching the filesystem.
/// Preserves leading `..` when there is nothing left to pop, and never pops
/// past a root or drive prefix.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    if components.is_empty() {
        return PathBuf::from(".");
    }
    return components.iter().collect();
}

/// Handle a single path component during normalization.
fn push_normalized_component<'a>(components: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {},
        Component::ParentDir => match components.last() {
            Some(Component::Normal(_)) => {
                components.pop();
            },
            Some(Component::RootDir | Component::Prefix(_)) => {},
            Some(Component::CurDir | Component::ParentDir) | None => components.push(component),
        },
        other => components.push(other),
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn is_missing(resolution: &Resolution) -> bool {
        matches!(resolution, Resolution::Missing { .. })
    }

    #[test]
    fn resolves_relative_to_containing_document() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/a/page.md");
        touch(tmp.path(), "docs/b/file.md");

        let document = tmp.path().join("docs/a/page.md");
        let resolution = resolve(&document, "../b/file.md");
        assert_eq!(
            resolution,
            Resolution::Found {
                candidate: fs::canonicalize(tmp.path().join("docs/b/file.md")).unwrap(),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_symlinked_directory_follows_the_link() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "real/nested/inner.md");
        touch(tmp.path(), "real/sib.md");
        std::os::unix::fs::symlink(tmp.path().join("real/nested"), tmp.path().join("alias")).unwrap();

        let document = tmp.path().join("README.md");
        assert!(!is_missing(&resolve(&document, "./alias/../sib.md")));
        assert!(is_missing(&resolve(&document, "./alias/../gone.md")));
    }

    #[test]
    fn missing_directory_before_parent_collapses_lexically() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "file.md");

        let document = tmp.path().join("README.md");
        assert_eq!(
            resolve(&document, "nope/../file.md"),
            Resolution::Found {
                candidate: tmp.path().join("file.md"),
            }
        );
    }

    #[test]
    fn not_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/a/page.md");
        touch(tmp.path(), "file.md");

        let document = tmp.path().join("docs/a/page.md");
        assert!(is_missing(&resolve(&document, "file.md")));
        assert!(!is_missing(&resolve(&document, "../../file.md")));
    }

    #[test]
    fn fragment_is_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "guide.md");
        let document = tmp.path().join("README.md");

        assert!(!is_missing(&resolve(&document, "guide.md#install")));
        assert!(is_missing(&resolve(&document, "gone.md#install")));
    }

    #[test]
    fn empty_path_part_is_skipped() {
        let document = Path::new("README.md");
        assert_eq!(
            resolve(document, "#only-fragment"),
            Resolution::Skipped {
                reason: SkipReason::EmptyPath,
            }
        );
    }

    #[test]
    fn drive_letter_paths_are_skipped() {
        let document = Path::new("README.md");
        assert_eq!(
            resolve(document, "C:\\docs\\missing.md"),
            Resolution::Skipped {
                reason: SkipReason::DriveLetter,
            }
        );
        assert!(is_missing(&resolve(document, "C:/docs/missing.md")));
    }

    #[test]
    fn missing_reports_the_candidate_tried() {
        let tmp = TempDir::new().unwrap();
        let document = tmp.path().join("README.md");
        assert_eq!(
            resolve(&document, "./sub/missing.md"),
            Resolution::Missing {
                candidate: tmp.path().join("sub").join("missing.md"),
            }
        );
    }

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize_path(Path::new("./docs/a/../b/./c.md")), PathBuf::from("docs/b/c.md"));
        assert_eq!(normalize_path(Path::new("../../x.md")), PathBuf::from("../../x.md"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new("/../x.md")), PathBuf::from("/x.md"));
    }
}
