//! Diagnostics collected while parsing.

use std::fmt;

use crate::directive::Directive;

/// A problem found in robots.txt content.
///
/// Reports never stop parsing: the offending directive is skipped and the
/// rest of the document is still applied. The `Display` output is the
/// human-readable message.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::Robots;
///
/// let robots = Robots::parse("User-agent: *\nCrawl-delay: soon\nCrawl-delay: -1");
/// let messages: Vec<String> = robots.reports().iter().map(ToString::to_string).collect();
///
/// assert_eq!(
///     messages,
///     vec![
///         r#"Invalid Crawl-delay directive value: "soon"."#.to_string(),
///         "Crawl-delay must be a positive number. The provided value is -1.".to_string(),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The value does not follow the directive's grammar
    InvalidValue {
        /// Directive that carried the value
        directive: Directive,
        /// The rejected value
        value: String,
    },
    /// A delay value parsed as a number that is zero or negative
    NotPositive {
        /// Directive that carried the value
        directive: Directive,
        /// The rejected value
        value: String,
    },
    /// A time range whose hours or minutes are out of range
    InvalidTimeRange {
        /// Directive that carried the value
        directive: Directive,
        /// Start of the range, as written
        start: String,
        /// End of the range, as written
        end: String,
    },
    /// The content was longer than the configured limit and was cut
    ContentTruncated {
        /// Configured limit in bytes
        max: usize,
        /// Content length in bytes
        actual: usize,
    },
}

impl Report {
    /// Returns the directive this report is about, if any.
    #[must_use]
    pub const fn directive(&self) -> Option<Directive> {
        match self {
            Self::InvalidValue { directive, .. }
            | Self::NotPositive { directive, .. }
            | Self::InvalidTimeRange { directive, .. } => Some(*directive),
            Self::ContentTruncated { .. } => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { directive, value } => {
                write!(f, "Invalid {directive} directive value: \"{value}\".")
            }
            Self::NotPositive { directive, value } => {
                write!(
                    f,
                    "{directive} must be a positive number. The provided value is {value}."
                )
            }
            Self::InvalidTimeRange {
                directive,
                start,
                end,
            } => {
                write!(
                    f,
                    "Invalid {directive} directive start-end time format: \"{start}-{end}\"."
                )
            }
            Self::ContentTruncated { max, actual } => {
                write!(
                    f,
                    "Content length {actual} exceeds maximum {max}; the remainder was ignored."
                )
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
