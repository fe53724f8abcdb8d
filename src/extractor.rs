use regex::Regex;

use crate::error::Error;
use crate::types::LinkOccurrence;

/// Inline link or image: `[label](target)` / `![alt](target)`. Group 1 is the target.
const INLINE_LINK_PATTERN: &str = r"!?\[[^\]]*\]\(([^)]+)\)";

/// Reference definition at line start: `[label]: target`. Group 1 is the target.
const REFERENCE_DEFINITION_PATTERN: &str = r"^\s*\[[^\]]+\]:\s*(\S+)";

/// Line terminators: CRLF, lone CR or LF, plus the rarer breaks (VT, FF,
/// FS/GS/RS, NEL, LS, PS) so old Mac and mixed files split like any other.
const LINE_BREAK_PATTERN: &str = r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]";

/// Marker that opens and closes a fenced code block.
const FENCE_MARKER: &str = "```";

/// Line-oriented link scanner. Skips fenced code blocks; does not parse
/// inline code spans or indented code.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    /// Compiled `INLINE_LINK_PATTERN`.
    inline: Regex,
    /// Compiled `LINE_BREAK_PATTERN`.
    line_break: Regex,
    /// Compiled `REFERENCE_DEFINITION_PATTERN`.
    reference: Regex,
}

impl LinkExtractor {
    /// Compile the link and line-break patterns.
    ///
    /// # Errors
    ///
    /// Returns `Error::Regex` if a pattern fails to compile.
    pub fn new() -> Result<Self, Error> {
        return Ok(Self {
            inline: Regex::new(INLINE_LINK_PATTERN)?,
            line_break: Regex::new(LINE_BREAK_PATTERN)?,
            reference: Regex::new(REFERENCE_DEFINITION_PATTERN)?,
        });
    }

    /// Extract every link target from markdown content, in order of appearance.
    /// Duplicates are kept. Each fence line flips the code-block state and is
    /// itself never scanned, so unbalanced fences swallow the rest of the file.
    pub fn extract(&self, content: &str) -> Vec<LinkOccurrence> {
        let mut links = Vec::new();
        let mut in_code_block = false;

        for (line_number, line) in (1_u32..).zip(self.line_break.split(content)) {
            if line.trim().starts_with(FENCE_MARKER) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }
            self.extract_from_line(line, line_number, &mut links);
        }

        return links;
    }

    /// Append inline matches, then the reference definition if the line is one.
    fn extract_from_line(&self, line: &str, line_number: u32, links: &mut Vec<LinkOccurrence>) {
        for cap in self.inline.captures_iter(line) {
            push_capture(&cap, line_number, links);
        }
        if let Some(cap) = self.reference.captures(line) {
            push_capture(&cap, line_number, links);
        }
    }
}

/// Record group 1 of a link capture.
fn push_capture(cap: &regex::Captures<'_>, line: u32, links: &mut Vec<LinkOccurrence>) {
    if let Some(target) = cap.get(1) {
        links.push(LinkOccurrence {
            line,
            target: target.as_str().to_string(),
        });
    }
}
