//! Parser configuration.

/// Options for [`Robots::parse_with_options`](crate::Robots::parse_with_options).
///
/// The defaults parse the whole document.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::{ParseOptions, Robots, DEFAULT_MAX_CONTENT_LENGTH};
///
/// let options = ParseOptions::new().with_max_content_length(DEFAULT_MAX_CONTENT_LENGTH);
/// let robots = Robots::parse_with_options("User-agent: *\nDisallow: /", &options);
/// assert!(robots.reports().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    max_content_length: Option<usize>,
}

impl ParseOptions {
    /// Creates options with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_content_length: None,
        }
    }

    /// Limits how many bytes of content are parsed.
    ///
    /// Longer content is cut at the last character boundary within the limit
    /// and a [`Report::ContentTruncated`](crate::Report::ContentTruncated) is
    /// recorded.
    #[must_use]
    pub const fn with_max_content_length(mut self, max: usize) -> Self {
        self.max_content_length = Some(max);
        self
    }

    /// Returns the content limit in bytes, if one is set.
    #[must_use]
    pub const fn max_content_length(&self) -> Option<usize> {
        self.max_content_length
    }

    /// Returns the part of `content` within the limit, and the limit if the
    /// content had to be cut.
    pub(crate) fn clip<'a>(&self, content: &'a str) -> (&'a str, Option<usize>) {
        match self.max_content_length {
            Some(max) if content.len() > max => {
                let mut end = max;
                while !content.is_char_boundary(end) {
                    end -= 1;
                }
                (&content[..end], Some(max))
            }
            _ => (content, None),
        }
    }
}
