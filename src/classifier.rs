//! External/local classification of link targets.

use crate::types::TargetKind;

/// Decides whether a target is checked against the filesystem.
/// Owns its scheme table so callers can swap it out per project.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Lowercase schemes that make a target external.
    schemes: Vec<String>,
}

impl Classifier {
    /// Build a classifier recognising the given schemes (matched case-insensitively).
    pub fn new(schemes: &[String]) -> Self {
        return Self {
            schemes: schemes.iter().map(|s| return s.to_ascii_lowercase()).collect(),
        };
    }

    /// Classify an already-normalized target. First matching rule wins:
    /// in-page anchor, protocol-relative URL, site-absolute path, known scheme.
    pub fn classify(&self, target: &str) -> TargetKind {
        if target.starts_with('#') || target.starts_with("//") || target.starts_with('/') {
            return TargetKind::External;
        }

        let known_scheme = uri_scheme(target)
            .is_some_and(|scheme| return self.schemes.iter().any(|s| return s.eq_ignore_ascii_case(scheme)));
        if known_scheme {
            return TargetKind::External;
        }

        return TargetKind::Local;
    }
}

/// Trim surrounding whitespace, then any run of `<` or `>` at either end.
pub fn normalize_target(raw: &str) -> &str {
    return raw.trim().trim_matches(|c: char| return c == '<' || c == '>');
}

/// Extract the scheme of a URI reference, if it has one.
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`, ending at the first `:`.
fn uri_scheme(target: &str) -> Option<&str> {
    let (scheme, _) = target.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| return c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| return c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if starts_with_letter && rest_valid {
        return Some(scheme);
    }
    return None;
}
