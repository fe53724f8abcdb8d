use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold, used for diagnostic headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened and,
/// where the user can act on it, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigRead { path, source } => format!(
            "\
# Error: Config Unreadable

`{}` exists but could not be read: {source}
",
            path.display()
        ),
        Error::Io(e) => format!(
            "\
# Error: I/O

{e}
"
        ),
        Error::Json(e) => format!(
            "\
# Error: JSON Serialization

{e}
"
        ),
        Error::ReadFailed { path, source } => render_read_failed(&path.display().to_string(), source),
        Error::Regex(e) => format!(
            "\
# Error: Link Pattern

{e}
"
        ),
        Error::TomlDe(e) => render_invalid_config(e),
        Error::Walk(e) => render_walk_failed(e),
    };
}

/// Config file present but not valid.
fn render_invalid_config(e: &toml::de::Error) -> String {
    return format!(
        "\
# Error: Invalid Config

{e}

## Fix

Check `{CONFIG_FILE}`. Accepted keys: `skip_dirs`, `extensions`, `schemes`,
`include`, `exclude`, `[archive_markers]` with `docs` and `archived`.
"
    );
}

/// A document that could not be read as text.
fn render_read_failed(path: &str, source: &std::io::Error) -> String {
    let hint = if source.kind() == std::io::ErrorKind::InvalidData {
        "\n## Fix\n\nThe file is not valid UTF-8. Re-encode it or exclude it via `exclude` in `.doclinks.toml`.\n"
    } else {
        ""
    };
    return format!(
        "\
# Error: Unreadable Document

`{path}`: {source}
{hint}"
    );
}

/// A directory that could not be traversed.
fn render_walk_failed(e: &walkdir::Error) -> String {
    let location = e
        .path()
        .map_or_else(String::new, |p| return format!("\n\nWhile reading `{}`.", p.display()));
    return format!(
        "\
# Error: Directory Walk Failed

{e}{location}

## Fix

Check that the directory still exists and has no symlink loop, or add its
name to `skip_dirs` in `{CONFIG_FILE}`.
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_gets_a_fix_section() {
        let e = Error::ReadFailed {
            path: "docs/bad.md".into(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let md = render_error(&e);
        assert!(md.starts_with("# Error: Unreadable Document"));
        assert!(md.contains("`docs/bad.md`"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn permission_failure_has_no_utf8_hint() {
        let e = Error::ReadFailed {
            path: "README.md".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!render_error(&e).contains("UTF-8"));
    }

    #[test]
    fn invalid_config_names_the_file() {
        let e = crate::config::Config::parse("extensions = 3").unwrap_err();
        let md = render_error(&e);
        assert!(md.starts_with("# Error: Invalid Config"));
        assert!(md.contains(".doclinks.toml"));
    }
}
