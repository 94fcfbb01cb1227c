//! Path pattern compilation and matching.
//!
//! A pattern is a normalized path that may contain `*` (any run of
//! characters, including none) and may end in `$` (the path must end where
//! the pattern ends). Matching always starts at the first character of the
//! path; without `$` the pattern only has to match a prefix.

use std::fmt;

use crate::constants::{END_ANCHOR, WILDCARD};

/// A compiled path pattern.
///
/// The pattern is stored as the literal pieces between wildcards. A pattern
/// with no `*` has exactly one piece.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::PathPattern;
///
/// let pattern = PathPattern::compile("/*.php$");
/// assert!(pattern.matches("/index.php"));
/// assert!(pattern.matches("/a/b.php"));
/// assert!(!pattern.matches("/index.php5"));
///
/// let prefix = PathPattern::compile("/private/");
/// assert!(prefix.matches("/private/data"));
/// assert!(!prefix.matches("/Private/data"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    pieces: Vec<String>,
    anchored: bool,
    specificity: Specificity,
}

impl PathPattern {
    /// Compiles a pattern.
    ///
    /// The input is used as given; rule patterns are normalized by
    /// [`Rule`](crate::Rule) before they get here.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let specificity = specificity(pattern);
        let (body, anchored) = match pattern.strip_suffix(END_ANCHOR) {
            Some(body) => (body, true),
            None => (pattern, false),
        };
        let pieces = body.split(WILDCARD).map(str::to_string).collect();

        Self {
            pieces,
            anchored,
            specificity,
        }
    }

    /// Returns true if `path` matches this pattern from its first character.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let Some((first, rest)) = self.pieces.split_first() else {
            return false;
        };

        let Some(mut remaining) = path.strip_prefix(first.as_str()) else {
            return false;
        };

        let Some((last, middle)) = rest.split_last() else {
            // No wildcard: a plain prefix, or exact equality when anchored.
            return !self.anchored || remaining.is_empty();
        };

        for piece in middle {
            match remaining.find(piece.as_str()) {
                Some(index) => remaining = &remaining[index + piece.len()..],
                None => return false,
            }
        }

        if self.anchored {
            remaining.ends_with(last.as_str())
        } else {
            remaining.contains(last.as_str())
        }
    }

    /// Returns true if the pattern ends with the `$` anchor.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns true if the pattern contains at least one `*`.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.pieces.len() > 1
    }

    /// Returns the specificity used to rank overlapping matches.
    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }
}

/// Ranking score of a pattern; a higher score is more specific.
///
/// The score is the pattern's length in characters, lowered by one half if
/// the pattern contains `*` and raised by one half if it ends with `$`. The
/// half steps only break ties between patterns of equal length.
///
/// Stored in half units so that comparisons stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Specificity(usize);

impl Specificity {
    /// Returns the score as a number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f64 {
        self.0 as f64 / 2.0
    }

    /// Returns the score in half units.
    #[must_use]
    pub const fn half_units(self) -> usize {
        self.0
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// Computes the specificity of a pattern.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::specificity;
///
/// assert_eq!(specificity("/page").value(), 5.0);
/// assert_eq!(specificity("/*.htm").value(), 5.5);
/// assert_eq!(specificity("/page$").value(), 6.5);
/// assert!(specificity("/*.htm") > specificity("/page"));
/// ```
#[must_use]
pub fn specificity(pattern: &str) -> Specificity {
    let mut half_units = pattern.chars().count() * 2;
    if pattern.contains(WILDCARD) {
        half_units -= 1;
    }
    if pattern.ends_with(END_ANCHOR) {
        half_units += 1;
    }
    Specificity(half_units)
}
