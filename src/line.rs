//! Line normalization: raw robots.txt text to `name: value` pairs.

use tracing::trace;

use crate::constants::COMMENT_START;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One `name: value` pair extracted from a robots.txt line.
///
/// `name` is trimmed and lowercased; `value` is trimmed and has any trailing
/// comment removed. Both are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// Lowercased directive name
    pub name: String,
    /// Directive value
    pub value: &'a str,
}

/// Splits `content` into directive lines, in document order.
///
/// Accepts `\n`, `\r\n` and `\r` line endings, also mixed within one
/// document. Blank lines, comment lines and lines without a `:` separator are
/// skipped, as are pairs whose name or value ends up empty.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::directive_lines;
///
/// let lines: Vec<_> = directive_lines("User-Agent: bot\r\n# note\rDisallow: /x # why\nbroken")
///     .map(|line| (line.name, line.value))
///     .collect();
///
/// assert_eq!(
///     lines,
///     vec![
///         ("user-agent".to_string(), "bot"),
///         ("disallow".to_string(), "/x"),
///     ]
/// );
/// ```
pub fn directive_lines(content: &str) -> impl Iterator<Item = DirectiveLine<'_>> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    content.split(['\r', '\n']).filter_map(parse_line)
}

/// Parses a single line into a directive pair.
///
/// Returns `None` for anything that is not a usable directive line.
#[must_use]
pub fn parse_line(line: &str) -> Option<DirectiveLine<'_>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_START) {
        return None;
    }

    let Some((name, value)) = line.split_once(':') else {
        trace!(line, "skipping robots.txt line without ':' separator");
        return None;
    };

    let name = name.trim().to_lowercase();
    let value = strip_comment(value.trim()).trim_end();
    if name.is_empty() || value.is_empty() {
        return None;
    }

    Some(DirectiveLine { name, value })
}

/// Cuts `value` at the first `#` that starts it or follows whitespace.
///
/// A `#` glued to the end of a token (`/page.html#top`) is kept.
fn strip_comment(value: &str) -> &str {
    let mut previous: Option<char> = None;
    for (i, c) in value.char_indices() {
        if c == COMMENT_START && previous.is_none_or(char::is_whitespace) {
            return &value[..i];
        }
        previous = Some(c);
    }
    value
}
