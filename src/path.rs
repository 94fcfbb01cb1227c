//! Path normalization shared by rule patterns and query URLs.

use std::borrow::Cow;
use std::fmt::Write;

use url::Url;

/// Normalizes a path for matching.
///
/// Percent-decodes the input (keeping it unchanged if decoding fails),
/// collapses runs of `/` into one, and prepends `/` when missing.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::normalize_path;
///
/// assert_eq!(normalize_path("a//b/%7Euser"), "/a/b/~user");
/// assert_eq!(normalize_path("/bad%zzescape"), "/bad%zzescape");
/// ```
#[must_use]
pub fn normalize_path(input: &str) -> String {
    let decoded = percent_decode(input);
    let source = decoded.as_deref().unwrap_or(input);

    let mut normalized = String::with_capacity(source.len() + 1);
    if !source.starts_with('/') {
        normalized.push('/');
    }
    for c in source.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Reduces a query URL to the path that rules are matched against.
///
/// Absolute hierarchical URLs (`https://host/path?q`) yield their path
/// component. Anything else is taken as a path and cut at the first `?` or
/// `#`. Both forms have `.` and `..` segments resolved the same way, and the
/// result is normalized with [`normalize_path`].
///
/// # Examples
///
/// ```
/// use robots_txt_parser::extract_path;
///
/// assert_eq!(extract_path("https://example.com/shop//cart?item=1#top"), "/shop/cart");
/// assert_eq!(extract_path("/search?q=rust"), "/search");
/// assert_eq!(extract_path("https://example.com"), "/");
/// assert_eq!(extract_path("/a/../private"), extract_path("https://example.com/a/../private"));
/// ```
#[must_use]
pub fn extract_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => normalize_path(parsed.path()),
        _ => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            normalize_path(&resolve_dot_segments(&url[..end]))
        }
    }
}

/// Escapes a normalized path so that [`normalize_path`] restores it exactly.
///
/// `%`, `#`, whitespace and control characters are written as `%XX` escapes
/// of their UTF-8 bytes. Everything else, `*` and `$` included, is kept.
pub(crate) fn encode_path(path: &str) -> Cow<'_, str> {
    if !path.chars().any(needs_escape) {
        return Cow::Borrowed(path);
    }

    let mut encoded = String::with_capacity(path.len() + 8);
    let mut buf = [0; 4];
    for c in path.chars() {
        if needs_escape(c) {
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(encoded, "%{byte:02X}");
            }
        } else {
            encoded.push(c);
        }
    }
    Cow::Owned(encoded)
}

fn needs_escape(c: char) -> bool {
    c == '%' || c == '#' || c.is_whitespace() || c.is_control()
}

/// Removes `.` and `..` segments the way URL parsing does for absolute URLs.
///
/// `%2e` counts as a dot. A `..` at the root stays at the root.
fn resolve_dot_segments(path: &str) -> Cow<'_, str> {
    if !path.split('/').any(|segment| is_single_dot(segment) || is_double_dot(segment)) {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());
    for (i, segment) in segments.into_iter().enumerate() {
        if is_double_dot(segment) {
            resolved.pop();
        } else if !is_single_dot(segment) {
            resolved.push(segment);
            continue;
        }
        // A trailing dot segment leaves a trailing slash behind.
        if i == last {
            resolved.push("");
        }
    }
    Cow::Owned(resolved.join("/"))
}

fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot(segment: &str) -> bool {
    ["..", ".%2e", "%2e.", "%2e%2e"]
        .iter()
        .any(|dots| segment.eq_ignore_ascii_case(dots))
}

/// Decodes `%XX` escapes.
///
/// Returns `None` when an escape is malformed or the decoded bytes are not
/// valid UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    if !input.contains('%') {
        return Some(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}
